use axum::{
    Extension,
    extract::State,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    extract::{Json, Path},
    models::{response::ApiResponse, user::ProfileUpdate},
    services::UserService,
    utils::jwt::Claims,
};

/// Public profile of a user.
pub async fn get_user(
    State(users): State<UserService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = users.get(id).await?;

    Ok(Json(ApiResponse::success(user)))
}

/// Update the current user's username and/or avatar.
pub async fn update_me(
    State(users): State<UserService>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let user = users.update(claims.user_id()?, payload).await?;

    Ok(Json(ApiResponse::success(user)))
}
