// src/models/mod.rs

pub mod article;
pub mod comment;
pub mod message;
pub mod response;
pub mod user;
