// src/services/mod.rs

pub mod article;
pub mod comment;
pub mod message;
pub mod user;

pub use article::ArticleService;
pub use comment::CommentService;
pub use message::MessageService;
pub use user::UserService;
