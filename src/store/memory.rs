// src/store/memory.rs

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::{ArticleStore, CommentStore, MessageStore, StoreError, StoreResult, UserStore};
use crate::models::{
    article::{Article, LikeChange, NewArticle},
    comment::{Comment, NewComment},
    message::{Message, NewMessage},
    user::{ProfileUpdate, UserProfile},
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, UserProfile>,
    articles: BTreeMap<i64, Article>,
    comments: BTreeMap<i64, Comment>,
    /// (article_id, user_id)
    likes: BTreeSet<(i64, i64)>,
    messages: BTreeMap<i64, StoredMessage>,
    next_user_id: i64,
    next_article_id: i64,
    next_comment_id: i64,
    next_message_id: i64,
}

/// Message row without the joined username.
#[derive(Clone)]
struct StoredMessage {
    message: NewMessage,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Tables {
    fn message_view(&self, id: i64, stored: &StoredMessage) -> Option<Message> {
        let user = self.users.get(&stored.message.user_id)?;
        Some(Message {
            id,
            user_id: stored.message.user_id,
            username: user.username.clone(),
            content: stored.message.content.clone(),
            x: stored.message.x,
            y: stored.message.y,
            color: stored.message.color.clone(),
            rotate: stored.message.rotate,
            tape_color: stored.message.tape_color.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

/// In-process store with the same semantics as `PgStore`.
///
/// A single lock guards all tables, so every trait method is atomic with
/// respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user. Accounts normally come from the auth service, which
    /// this store does not model.
    pub fn add_user(&self, username: &str, avatar: Option<&str>, role: &str) -> UserProfile {
        let mut tables = self.tables.write();
        tables.next_user_id += 1;
        let user = UserProfile {
            id: tables.next_user_id,
            username: username.to_string(),
            avatar: avatar.map(str::to_string),
            role: role.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        user
    }

    /// Inserts a comment row verbatim, bypassing the service-level checks.
    /// Used to reproduce damaged data such as replies to missing parents.
    pub fn insert_raw_comment(&self, comment: Comment) {
        let mut tables = self.tables.write();
        tables.next_comment_id = tables.next_comment_id.max(comment.id);
        tables.comments.insert(comment.id, comment);
    }

    pub fn comment_count(&self) -> usize {
        self.tables.read().comments.len()
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn list_comments(&self, article_id: i64) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        Ok(self.tables.read().comments.get(&id).cloned())
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut tables = self.tables.write();

        if !tables.articles.contains_key(&comment.article_id) {
            return Err(StoreError::Backend(format!(
                "article {} does not exist",
                comment.article_id
            )));
        }
        if let Some(pid) = comment.parent_id {
            if !tables.comments.contains_key(&pid) {
                return Err(StoreError::Backend(format!("comment {} does not exist", pid)));
            }
        }

        tables.next_comment_id += 1;
        let now = Utc::now();
        let created = Comment {
            id: tables.next_comment_id,
            article_id: comment.article_id,
            user_id: comment.user_id,
            content: comment.content,
            parent_id: comment.parent_id,
            root_id: comment.root_id,
            username: comment.username,
            avatar: comment.avatar,
            reply_to_user_id: comment.reply_to_user_id,
            reply_to_username: comment.reply_to_username,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_comments(&self, ids: &[i64]) -> StoreResult<u64> {
        let mut tables = self.tables.write();

        // Same rule as the parent_id foreign key: refuse to leave a surviving
        // reply pointing at a removed comment. Checked before anything is removed.
        let doomed: std::collections::HashSet<i64> = ids.iter().copied().collect();
        if let Some(orphan) = tables.comments.values().find(|c| {
            !doomed.contains(&c.id) && c.parent_id.is_some_and(|p| doomed.contains(&p))
        }) {
            return Err(StoreError::Backend(format!(
                "comment {} still references a deleted parent",
                orphan.id
            )));
        }

        let removed = doomed
            .iter()
            .filter(|id| tables.comments.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_article(&self, id: i64) -> StoreResult<Option<Article>> {
        Ok(self.tables.read().articles.get(&id).cloned())
    }

    async fn insert_article(&self, article: NewArticle) -> StoreResult<Article> {
        let mut tables = self.tables.write();
        tables.next_article_id += 1;
        let now = Utc::now();
        let created = Article {
            id: tables.next_article_id,
            author_id: article.author_id,
            category_id: article.category_id,
            title: article.title,
            content: article.content,
            excerpt: article.excerpt,
            status: article.status,
            word_count: article.word_count,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.articles.insert(created.id, created.clone());
        Ok(created)
    }

    async fn like_article(&self, article_id: i64, user_id: i64) -> StoreResult<LikeChange> {
        let mut tables = self.tables.write();

        if !tables.articles.contains_key(&article_id) {
            return Err(StoreError::Backend(format!(
                "article {} does not exist",
                article_id
            )));
        }
        if !tables.likes.insert((article_id, user_id)) {
            return Ok(LikeChange::Unchanged);
        }

        let Some(article) = tables.articles.get_mut(&article_id) else {
            return Ok(LikeChange::Unchanged);
        };
        article.likes_count += 1;
        Ok(LikeChange::Applied(article.likes_count))
    }

    async fn unlike_article(&self, article_id: i64, user_id: i64) -> StoreResult<LikeChange> {
        let mut tables = self.tables.write();

        if !tables.likes.remove(&(article_id, user_id)) {
            return Ok(LikeChange::Unchanged);
        }

        let Some(article) = tables.articles.get_mut(&article_id) else {
            return Ok(LikeChange::Unchanged);
        };
        article.likes_count = (article.likes_count - 1).max(0);
        Ok(LikeChange::Applied(article.likes_count))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: i64) -> StoreResult<Option<UserProfile>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> StoreResult<Option<UserProfile>> {
        let mut tables = self.tables.write();

        if let Some(name) = &update.username {
            if tables.users.values().any(|u| u.id != id && &u.username == name) {
                return Err(StoreError::Conflict(format!(
                    "Username '{}' already exists",
                    name
                )));
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = update.username {
            user.username = name;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn list_messages(&self) -> StoreResult<Vec<Message>> {
        let tables = self.tables.read();
        let mut messages: Vec<Message> = tables
            .messages
            .iter()
            .filter_map(|(id, stored)| tables.message_view(*id, stored))
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(messages)
    }

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Message> {
        let mut tables = self.tables.write();

        if !tables.users.contains_key(&message.user_id) {
            return Err(StoreError::Backend(format!(
                "user {} does not exist",
                message.user_id
            )));
        }

        tables.next_message_id += 1;
        let id = tables.next_message_id;
        let now = Utc::now();
        let stored = StoredMessage {
            message,
            created_at: now,
            updated_at: now,
        };
        let view = tables
            .message_view(id, &stored)
            .ok_or_else(|| StoreError::Backend(format!("message {} has no author", id)))?;
        tables.messages.insert(id, stored);
        Ok(view)
    }

    async fn move_message(&self, id: i64, x: i32, y: i32) -> StoreResult<Option<Message>> {
        let mut tables = self.tables.write();

        let Some(stored) = tables.messages.get_mut(&id) else {
            return Ok(None);
        };
        stored.message.x = x;
        stored.message.y = y;
        stored.updated_at = Utc::now();
        let stored = stored.clone();

        Ok(tables.message_view(id, &stored))
    }
}
