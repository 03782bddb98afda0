use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppError,
    models::message::{CreateMessageRequest, Message, MoveMessageRequest, NewMessage},
    store::Store,
    utils::{html::sanitize_user_text, jwt::Claims},
};

/// The public message board.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn Store>,
}

impl MessageService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Message>, AppError> {
        Ok(self.store.list_messages().await?)
    }

    pub async fn create(
        &self,
        claims: &Claims,
        payload: CreateMessageRequest,
    ) -> Result<Message, AppError> {
        let user_id = claims.user_id()?;

        let payload = CreateMessageRequest {
            content: sanitize_user_text(&payload.content),
            color: payload.color.trim().to_string(),
            tape_color: payload.tape_color.trim().to_string(),
            ..payload
        };
        if payload.content.is_empty() {
            return Err(AppError::BadRequest(
                "Message content cannot be empty".to_string(),
            ));
        }
        payload.validate()?;

        self.store
            .find_user(user_id)
            .await?
            .ok_or(AppError::AuthError("User not found".to_string()))?;

        let message = self
            .store
            .insert_message(NewMessage {
                user_id,
                content: payload.content,
                x: payload.x,
                y: payload.y,
                color: payload.color,
                rotate: payload.rotate,
                tape_color: payload.tape_color,
            })
            .await?;

        tracing::info!(message_id = message.id, user_id, "message posted");

        Ok(message)
    }

    /// Repositions a note. Any signed-in user may rearrange the board.
    pub async fn move_to(&self, id: i64, position: MoveMessageRequest) -> Result<Message, AppError> {
        self.store
            .move_message(id, position.x, position.y)
            .await?
            .ok_or(AppError::NotFound("Message not found".to_string()))
    }
}
