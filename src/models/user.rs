// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Public part of the 'users' table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,

    /// Unique username.
    pub username: String,

    pub avatar: Option<String>,

    /// User role: 'user' or 'admin'.
    pub role: String,
}

/// DTO for editing the current user's profile. Fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: Option<String>,

    #[validate(custom(function = "validate_avatar"))]
    pub avatar: Option<String>,
}

/// Avatars are either http(s) URLs or site-relative paths like `/uploads/a.png`.
fn validate_avatar(avatar: &str) -> Result<(), ValidationError> {
    if avatar.starts_with('/') && !avatar.starts_with("//") {
        return Ok(());
    }
    match url::Url::parse(avatar) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("invalid_avatar")
            .with_message("Avatar must be an http(s) URL or an absolute path".into())),
    }
}
