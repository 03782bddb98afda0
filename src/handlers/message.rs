use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    extract::{Json, Path},
    models::{
        message::{CreateMessageRequest, MoveMessageRequest},
        response::ApiResponse,
    },
    services::MessageService,
    utils::jwt::Claims,
};

/// All notes on the board, newest first.
pub async fn list_messages(
    State(messages): State<MessageService>,
) -> Result<impl IntoResponse, AppError> {
    let board = messages.list().await?;

    Ok(Json(ApiResponse::success(board)))
}

pub async fn create_message(
    State(messages): State<MessageService>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = messages.create(&claims, payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(message))))
}

/// Drag a note to a new position.
pub async fn move_message(
    State(messages): State<MessageService>,
    Path(id): Path<i64>,
    Json(position): Json<MoveMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = messages.move_to(id, position).await?;

    Ok(Json(ApiResponse::success(message)))
}
