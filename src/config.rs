// src/config.rs

use std::{env, net::SocketAddr, str::FromStr};

use anyhow::{Context, anyhow};
use dotenvy::dotenv;

/// What the thread assembler does with a reply whose parent is not among
/// the article's comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Render the reply as a top-level comment.
    #[default]
    Promote,
    /// Leave the reply (and anything under it) out of the listing.
    Drop,
}

impl FromStr for OrphanPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "promote" => Ok(OrphanPolicy::Promote),
            "drop" => Ok(OrphanPolicy::Drop),
            other => Err(anyhow!("unknown orphan policy '{}', expected 'promote' or 'drop'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub orphan_policy: OrphanPolicy,
    /// Overrides the built-in sensitive word list when set.
    pub sensitive_words: Option<Vec<String>>,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let jwt_expiration = parse_or("JWT_EXPIRATION", 86_400)?;
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let bind_addr = parse_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 5)?;
        let db_acquire_timeout_secs = parse_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?;
        let orphan_policy = parse_or("ORPHAN_POLICY", OrphanPolicy::default())?;

        let sensitive_words = env::var("SENSITIVE_WORDS").ok().map(|v| split_list(&v));
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| default_cors_origins());

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            db_max_connections,
            db_acquire_timeout_secs,
            orphan_policy,
            sensitive_words,
            cors_origins,
        })
    }

    /// Settings for running against a non-database store (tests, local tooling).
    pub fn for_testing(jwt_secret: &str) -> Self {
        Self {
            database_url: String::new(),
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration: 600,
            rust_log: "error".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            db_max_connections: 1,
            db_acquire_timeout_secs: 1,
            orphan_policy: OrphanPolicy::default(),
            sensitive_words: None,
            cors_origins: default_cors_origins(),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("invalid value for {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}
