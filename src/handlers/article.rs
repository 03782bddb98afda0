use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    extract::{Json, Path},
    models::{article::CreateArticleRequest, response::ApiResponse},
    services::ArticleService,
    utils::jwt::Claims,
};

/// Create a new article.
/// Articles containing sensitive words are stored as 'pending'.
pub async fn create_article(
    State(articles): State<ArticleService>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let article = articles.create(&claims, payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(article))))
}

/// Get a single article by ID.
pub async fn get_article(
    State(articles): State<ArticleService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let article = articles.get(id).await?;

    Ok(Json(ApiResponse::success(article)))
}

/// Like an article. Liking twice is rejected.
pub async fn like_article(
    State(articles): State<ArticleService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let status = articles.like(id, &claims).await?;

    Ok(Json(ApiResponse::success(status)))
}

/// Remove the current user's like.
pub async fn unlike_article(
    State(articles): State<ArticleService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let status = articles.unlike(id, &claims).await?;

    Ok(Json(ApiResponse::success(status)))
}
