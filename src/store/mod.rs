// src/store/mod.rs

//! Storage seam for the blog. Handlers and services only talk to these traits;
//! `PgStore` backs them with Postgres and `MemoryStore` keeps everything in
//! process for tests and local runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    article::{Article, LikeChange, NewArticle},
    comment::{Comment, NewComment},
    message::{Message, NewMessage},
    user::{ProfileUpdate, UserProfile},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated (e.g. a taken username).
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// All comments of an article, oldest first (ties broken by id).
    async fn list_comments(&self, article_id: i64) -> StoreResult<Vec<Comment>>;

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>>;

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;

    /// Removes every listed comment in one atomic step. Either all rows are
    /// gone afterwards or none of them are. Returns the number of rows removed.
    async fn delete_comments(&self, ids: &[i64]) -> StoreResult<u64>;
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_article(&self, id: i64) -> StoreResult<Option<Article>>;

    async fn insert_article(&self, article: NewArticle) -> StoreResult<Article>;

    /// Records a like by `user_id` and bumps the article's counter in one
    /// atomic step. `Unchanged` if the like already existed.
    async fn like_article(&self, article_id: i64, user_id: i64) -> StoreResult<LikeChange>;

    /// Inverse of `like_article`; `Unchanged` if there was no like to remove.
    async fn unlike_article(&self, article_id: i64, user_id: i64) -> StoreResult<LikeChange>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: i64) -> StoreResult<Option<UserProfile>>;

    /// Applies the present fields; `None` if the user does not exist.
    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> StoreResult<Option<UserProfile>>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Every note on the board, newest first.
    async fn list_messages(&self) -> StoreResult<Vec<Message>>;

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Message>;

    /// Moves a note; `None` if it does not exist.
    async fn move_message(&self, id: i64, x: i32, y: i32) -> StoreResult<Option<Message>>;
}

/// Everything the application needs from storage.
pub trait Store: CommentStore + ArticleStore + UserStore + MessageStore {}

impl<T> Store for T where T: CommentStore + ArticleStore + UserStore + MessageStore {}
