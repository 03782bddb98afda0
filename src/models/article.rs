use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_PENDING: &str = "pending";

/// Represents the 'articles' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// 'published' or 'pending' (awaiting review).
    pub status: String,
    pub word_count: i32,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new article.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 chars"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 50000,
        message = "Content length must be between 1 and 50000 chars"
    ))]
    pub content: String,

    pub category_id: Option<i64>,

    /// Requested status: 'draft', 'pending' or 'published'.
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: String,
    pub word_count: i32,
}

/// Article as returned from the create endpoint, with the scan result attached.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub article: Article,
    pub sensitive_words: Vec<String>,
}

/// Result of a like or unlike as seen by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeChange {
    /// The like row was added or removed; carries the new counter.
    Applied(i32),
    /// The user had already liked (or had not liked) the article.
    Unchanged,
}

#[derive(Debug, Serialize)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes_count: i32,
}
