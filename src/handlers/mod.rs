// src/handlers/mod.rs

pub mod article;
pub mod comment;
pub mod message;
pub mod user;
