use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A sticky note on the message board, joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    /// Board coordinates in pixels.
    pub x: i32,
    pub y: i32,
    pub color: String,
    /// Rotation in degrees.
    pub rotate: f64,
    pub tape_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "Message length must be between 1 and 500 chars"
    ))]
    pub content: String,

    pub x: i32,
    pub y: i32,

    #[validate(length(min = 1, max = 20, message = "Invalid note color"))]
    pub color: String,

    #[validate(range(min = -180.0, max = 180.0, message = "Rotation out of range"))]
    pub rotate: f64,

    #[validate(length(min = 1, max = 20, message = "Invalid tape color"))]
    pub tape_color: String,
}

/// Drag-and-drop position update.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveMessageRequest {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub user_id: i64,
    pub content: String,
    pub x: i32,
    pub y: i32,
    pub color: String,
    pub rotate: f64,
    pub tape_color: String,
}
