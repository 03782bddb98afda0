use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'comments' table in the database.
///
/// `username` and `avatar` are a snapshot of the author's profile taken when
/// the comment was written. Later profile edits do not touch them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub content: String,
    pub parent_id: Option<i64>,
    pub root_id: Option<i64>,
    pub username: String,
    pub avatar: Option<String>,
    pub reply_to_user_id: Option<i64>,
    pub reply_to_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment together with its nested replies, as returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    /// Pre-order ids of this node and everything below it.
    pub fn flatten_ids(&self) -> Vec<i64> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.comment.id);
            stack.extend(node.replies.iter().rev());
        }
        ids
    }
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub content: String,

    /// Optional: the ID of the comment being replied to.
    pub parent_id: Option<i64>,

    /// Optional: top-level ancestor of the reply chain. Derived from the
    /// parent when omitted.
    pub root_id: Option<i64>,

    pub reply_to_user_id: Option<i64>,
    pub reply_to_username: Option<String>,
}

/// Row to insert; everything except the generated id and timestamps.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: i64,
    pub user_id: i64,
    pub content: String,
    pub parent_id: Option<i64>,
    pub root_id: Option<i64>,
    pub username: String,
    pub avatar: Option<String>,
    pub reply_to_user_id: Option<i64>,
    pub reply_to_username: Option<String>,
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteCommentResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "deletedCommentIds")]
    pub deleted_comment_ids: Vec<i64>,
}
