use std::sync::Arc;

use validator::Validate;

use crate::{
    comments::{cascade, thread},
    config::OrphanPolicy,
    error::AppError,
    models::comment::{Comment, CommentNode, CreateCommentRequest, NewComment},
    store::Store,
    utils::{html::sanitize_user_text, jwt::Claims},
};

/// Create / list / delete of article comments.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn Store>,
    orphans: OrphanPolicy,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>, orphans: OrphanPolicy) -> Self {
        Self { store, orphans }
    }

    /// The article's comments as a forest, oldest first at every level.
    pub async fn list(&self, article_id: i64) -> Result<Vec<CommentNode>, AppError> {
        self.store
            .find_article(article_id)
            .await?
            .ok_or(AppError::NotFound("Article not found".to_string()))?;

        let comments = self.store.list_comments(article_id).await?;

        Ok(thread::assemble(comments, self.orphans))
    }

    pub async fn create(
        &self,
        article_id: i64,
        claims: &Claims,
        payload: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        let user_id = claims.user_id()?;

        // 1. Validate content
        let payload = CreateCommentRequest {
            content: sanitize_user_text(&payload.content),
            ..payload
        };
        if payload.content.is_empty() {
            return Err(AppError::BadRequest(
                "Comment content cannot be empty".to_string(),
            ));
        }
        payload.validate()?;

        // 2. Article and author must exist
        self.store
            .find_article(article_id)
            .await?
            .ok_or(AppError::NotFound("Article not found".to_string()))?;

        let author = self
            .store
            .find_user(user_id)
            .await?
            .ok_or(AppError::AuthError("User not found".to_string()))?;

        // 3. Logic for root_id and parent_id
        let mut root_id = None;
        let mut reply_to_user_id = payload.reply_to_user_id;
        let mut reply_to_username = payload.reply_to_username;

        if let Some(pid) = payload.parent_id {
            let parent = self
                .store
                .find_comment(pid)
                .await?
                .filter(|p| p.article_id == article_id)
                .ok_or(AppError::NotFound("Parent comment not found".to_string()))?;

            // If the parent has a root_id this reply shares it; otherwise the
            // parent is the root.
            let derived = parent.root_id.unwrap_or(parent.id);
            if payload.root_id.is_some_and(|r| r != derived) {
                return Err(AppError::BadRequest(
                    "root_id does not match the parent comment's thread".to_string(),
                ));
            }
            root_id = Some(derived);

            if reply_to_user_id.is_none() && reply_to_username.is_none() {
                reply_to_user_id = Some(parent.user_id);
                reply_to_username = Some(parent.username);
            }
        } else if payload.root_id.is_some() {
            return Err(AppError::BadRequest(
                "root_id requires parent_id".to_string(),
            ));
        }

        // 4. Insert with a snapshot of the author's current profile
        let comment = self
            .store
            .insert_comment(NewComment {
                article_id,
                user_id,
                content: payload.content,
                parent_id: payload.parent_id,
                root_id,
                username: author.username,
                avatar: author.avatar,
                reply_to_user_id,
                reply_to_username,
            })
            .await?;

        tracing::info!(
            comment_id = comment.id,
            article_id,
            user_id,
            "comment created"
        );

        Ok(comment)
    }

    /// Deletes the comment and all replies under it. Allowed for the comment's
    /// author and for the author of the article it belongs to.
    pub async fn delete(&self, comment_id: i64, claims: &Claims) -> Result<Vec<i64>, AppError> {
        let user_id = claims.user_id()?;

        // 1. Fetch comment to check ownership
        let comment = self
            .store
            .find_comment(comment_id)
            .await?
            .ok_or(AppError::NotFound("Comment not found".to_string()))?;

        // 2. Check Permission
        let article_author = self
            .store
            .find_article(comment.article_id)
            .await?
            .map(|a| a.author_id);

        if comment.user_id != user_id && article_author != Some(user_id) {
            tracing::warn!(comment_id, user_id, "comment delete rejected");
            return Err(AppError::Forbidden(
                "You are not allowed to delete this comment".to_string(),
            ));
        }

        // 3. Remove the whole reply subtree
        let deleted = cascade::delete_thread(self.store.as_ref(), &comment).await?;

        tracing::info!(comment_id, count = deleted.len(), "comment thread deleted");

        Ok(deleted)
    }
}
