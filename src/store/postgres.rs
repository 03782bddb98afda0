// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ArticleStore, CommentStore, MessageStore, StoreError, StoreResult, UserStore};
use crate::models::{
    article::{Article, LikeChange, NewArticle},
    comment::{Comment, NewComment},
    message::{Message, NewMessage},
    user::{ProfileUpdate, UserProfile},
};

const COMMENT_COLUMNS: &str = r#"
    id, article_id, user_id, content, parent_id, root_id,
    username, avatar, reply_to_user_id, reply_to_username,
    created_at, updated_at
"#;

const ARTICLE_COLUMNS: &str = r#"
    id, author_id, category_id, title, content, excerpt,
    status, word_count, likes_count, created_at, updated_at
"#;

const MESSAGE_COLUMNS: &str = r#"
    m.id, m.user_id, u.username, m.content, m.x, m.y, m.color,
    m.rotate, m.tape_color, m.created_at, m.updated_at
"#;

/// Postgres-backed store on a bounded connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn list_comments(&self, article_id: i64) -> StoreResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE article_id = $1 ORDER BY created_at ASC, id ASC"
        );
        let comments = sqlx::query_as::<_, Comment>(&sql)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(comments)
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let sql = format!(
            r#"
            INSERT INTO comments
                (article_id, user_id, content, parent_id, root_id,
                 username, avatar, reply_to_user_id, reply_to_username)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COMMENT_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Comment>(&sql)
            .bind(comment.article_id)
            .bind(comment.user_id)
            .bind(comment.content)
            .bind(comment.parent_id)
            .bind(comment.root_id)
            .bind(comment.username)
            .bind(comment.avatar)
            .bind(comment.reply_to_user_id)
            .bind(comment.reply_to_username)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn delete_comments(&self, ids: &[i64]) -> StoreResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        // One statement inside one transaction: the parent_id foreign key is
        // checked at statement end, so a reply inserted concurrently under a
        // doomed comment makes the whole delete fail instead of orphaning it.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM comments WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ArticleStore for PgStore {
    async fn find_article(&self, id: i64) -> StoreResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    async fn insert_article(&self, article: NewArticle) -> StoreResult<Article> {
        let sql = format!(
            r#"
            INSERT INTO articles
                (author_id, category_id, title, content, excerpt, status, word_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ARTICLE_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Article>(&sql)
            .bind(article.author_id)
            .bind(article.category_id)
            .bind(article.title)
            .bind(article.content)
            .bind(article.excerpt)
            .bind(article.status)
            .bind(article.word_count)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_foreign_key_violation() {
                        return StoreError::Conflict("Unknown category".to_string());
                    }
                }
                StoreError::from(e)
            })?;

        Ok(created)
    }

    async fn like_article(&self, article_id: i64, user_id: i64) -> StoreResult<LikeChange> {
        let mut tx = self.pool.begin().await?;

        // The primary key on (article_id, user_id) makes a concurrent duplicate
        // a no-op rather than a second increment.
        let inserted = sqlx::query(
            "INSERT INTO article_likes (article_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(article_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            return Ok(LikeChange::Unchanged);
        }

        let (likes_count,): (i32,) = sqlx::query_as(
            "UPDATE articles SET likes_count = likes_count + 1 WHERE id = $1 RETURNING likes_count",
        )
        .bind(article_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(LikeChange::Applied(likes_count))
    }

    async fn unlike_article(&self, article_id: i64, user_id: i64) -> StoreResult<LikeChange> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM article_likes WHERE article_id = $1 AND user_id = $2")
            .bind(article_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Ok(LikeChange::Unchanged);
        }

        let (likes_count,): (i32,) = sqlx::query_as(
            "UPDATE articles SET likes_count = GREATEST(0, likes_count - 1) WHERE id = $1 RETURNING likes_count",
        )
        .bind(article_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(LikeChange::Applied(likes_count))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: i64) -> StoreResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(
            "SELECT id, username, avatar, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> StoreResult<Option<UserProfile>> {
        let username = update.username.clone();
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                avatar = COALESCE($3, avatar),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, avatar, role
            "#,
        )
        .bind(id)
        .bind(update.username)
        .bind(update.avatar)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return StoreError::Conflict(format!(
                        "Username '{}' already exists",
                        username.unwrap_or_default()
                    ));
                }
            }
            StoreError::from(e)
        })?;

        Ok(user)
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn list_messages(&self) -> StoreResult<Vec<Message>> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m JOIN users u ON u.id = m.user_id ORDER BY m.created_at DESC, m.id DESC"
        );
        let messages = sqlx::query_as::<_, Message>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Message> {
        let sql = format!(
            r#"
            WITH m AS (
                INSERT INTO messages (user_id, content, x, y, color, rotate, tape_color)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {MESSAGE_COLUMNS} FROM m JOIN users u ON u.id = m.user_id
            "#
        );
        let created = sqlx::query_as::<_, Message>(&sql)
            .bind(message.user_id)
            .bind(message.content)
            .bind(message.x)
            .bind(message.y)
            .bind(message.color)
            .bind(message.rotate)
            .bind(message.tape_color)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn move_message(&self, id: i64, x: i32, y: i32) -> StoreResult<Option<Message>> {
        let sql = format!(
            r#"
            WITH m AS (
                UPDATE messages SET x = $2, y = $3, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {MESSAGE_COLUMNS} FROM m JOIN users u ON u.id = m.user_id
            "#
        );
        let moved = sqlx::query_as::<_, Message>(&sql)
            .bind(id)
            .bind(x)
            .bind(y)
            .fetch_optional(&self.pool)
            .await?;

        Ok(moved)
    }
}
