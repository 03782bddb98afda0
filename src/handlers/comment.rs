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
        comment::{CreateCommentRequest, DeleteCommentResponse},
        response::ApiResponse,
    },
    services::CommentService,
    utils::jwt::Claims,
};

/// List all comments for an article as a nested reply forest.
pub async fn list_comments(
    State(comments): State<CommentService>,
    Path(article_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let forest = comments.list(article_id).await?;

    Ok(Json(ApiResponse::success(forest)))
}

/// Create a new comment or reply.
pub async fn create_comment(
    State(comments): State<CommentService>,
    Extension(claims): Extension<Claims>,
    Path(article_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let comment = comments.create(article_id, &claims, payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

/// Delete a comment together with its replies.
/// Requires: Login + (Comment author OR Article author).
pub async fn delete_comment(
    State(comments): State<CommentService>,
    Extension(claims): Extension<Claims>,
    Path(comment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = comments.delete(comment_id, &claims).await?;

    Ok(Json(DeleteCommentResponse {
        success: true,
        message: "Comment deleted".to_string(),
        deleted_comment_ids: deleted,
    }))
}
