use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{ArticleService, CommentService, MessageService, UserService},
    store::Store,
    utils::sensitive_words::SensitiveWordScanner,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub comments: CommentService,
    pub articles: ArticleService,
    pub users: UserService,
    pub messages: MessageService,
}

impl AppState {
    /// Wires the services on top of `store`.
    pub fn new(store: Arc<dyn Store>, config: Config) -> Result<Self, regex::Error> {
        let scanner = match &config.sensitive_words {
            Some(words) => SensitiveWordScanner::new(words.iter().cloned())?,
            None => SensitiveWordScanner::with_default_words()?,
        };

        Ok(Self {
            comments: CommentService::new(store.clone(), config.orphan_policy),
            articles: ArticleService::new(store.clone(), Arc::new(scanner)),
            users: UserService::new(store.clone()),
            messages: MessageService::new(store),
            config,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for CommentService {
    fn from_ref(state: &AppState) -> Self {
        state.comments.clone()
    }
}

impl FromRef<AppState> for ArticleService {
    fn from_ref(state: &AppState) -> Self {
        state.articles.clone()
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for MessageService {
    fn from_ref(state: &AppState) -> Self {
        state.messages.clone()
    }
}
