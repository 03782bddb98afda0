use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppError,
    models::user::{ProfileUpdate, UserProfile},
    store::Store,
};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: i64) -> Result<UserProfile, AppError> {
        self.store
            .find_user(id)
            .await?
            .ok_or(AppError::NotFound("User not found".to_string()))
    }

    /// Edits the live profile. Comment snapshots keep the old values.
    pub async fn update(&self, id: i64, update: ProfileUpdate) -> Result<UserProfile, AppError> {
        let update = ProfileUpdate {
            username: update.username.map(|u| u.trim().to_string()),
            avatar: update.avatar.map(|a| a.trim().to_string()),
        };
        update.validate()?;

        self.store
            .update_profile(id, update)
            .await?
            .ok_or(AppError::NotFound("User not found".to_string()))
    }
}
