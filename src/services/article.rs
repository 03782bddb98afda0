use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppError,
    models::article::{
        Article, ArticleResponse, CreateArticleRequest, LikeChange, LikeStatus, NewArticle,
        STATUS_PENDING, STATUS_PUBLISHED,
    },
    store::Store,
    utils::{html::sanitize_user_text, jwt::Claims, sensitive_words::SensitiveWordScanner},
};

const EXCERPT_CHARS: usize = 200;

#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn Store>,
    scanner: Arc<SensitiveWordScanner>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn Store>, scanner: Arc<SensitiveWordScanner>) -> Self {
        Self { store, scanner }
    }

    pub async fn get(&self, id: i64) -> Result<Article, AppError> {
        self.store
            .find_article(id)
            .await?
            .ok_or(AppError::NotFound("Article not found".to_string()))
    }

    /// Stores a new article. Any sensitive word in the title or body holds the
    /// article for review regardless of the requested status.
    pub async fn create(
        &self,
        claims: &Claims,
        payload: CreateArticleRequest,
    ) -> Result<ArticleResponse, AppError> {
        let author_id = claims.user_id()?;

        let payload = CreateArticleRequest {
            title: payload.title.trim().to_string(),
            content: sanitize_user_text(&payload.content),
            ..payload
        };
        payload.validate()?;

        let report = self.scanner.check_article(&payload.title, &payload.content);
        let status = if report.has_sensitive_words {
            tracing::info!(
                author_id,
                words = ?report.matched_words,
                "article held for review"
            );
            STATUS_PENDING
        } else {
            requested_status(payload.status.as_deref())
        };

        let word_count = i32::try_from(payload.content.chars().count())
            .map_err(|_| AppError::BadRequest("Article is too long".to_string()))?;

        let article = self
            .store
            .insert_article(NewArticle {
                author_id,
                category_id: payload.category_id,
                title: payload.title,
                excerpt: excerpt(&payload.content),
                content: payload.content,
                status: status.to_string(),
                word_count,
            })
            .await?;

        Ok(ArticleResponse {
            article,
            sensitive_words: report.matched_words,
        })
    }

    pub async fn like(&self, article_id: i64, claims: &Claims) -> Result<LikeStatus, AppError> {
        let user_id = claims.user_id()?;
        self.get(article_id).await?;

        match self.store.like_article(article_id, user_id).await? {
            LikeChange::Applied(likes_count) => Ok(LikeStatus {
                liked: true,
                likes_count,
            }),
            LikeChange::Unchanged => Err(AppError::BadRequest(
                "Article already liked".to_string(),
            )),
        }
    }

    pub async fn unlike(&self, article_id: i64, claims: &Claims) -> Result<LikeStatus, AppError> {
        let user_id = claims.user_id()?;
        self.get(article_id).await?;

        match self.store.unlike_article(article_id, user_id).await? {
            LikeChange::Applied(likes_count) => Ok(LikeStatus {
                liked: false,
                likes_count,
            }),
            LikeChange::Unchanged => Err(AppError::BadRequest(
                "Article has not been liked".to_string(),
            )),
        }
    }
}

/// Maps the status the editor asked for onto a stored status.
fn requested_status(status: Option<&str>) -> &'static str {
    match status {
        Some("draft") | Some("pending") => STATUS_PENDING,
        _ => STATUS_PUBLISHED,
    }
}

fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
