//! Credentials
//!
//! Bearer tokens come from a [`TokenSource`]. Signing and JWT minting live
//! outside this crate; anything that can hand back a token string plugs in
//! here. [`Credentials`] caches the last token for a bounded time so a long
//! page walk does not ask the source once per page.

use super::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Environment variable consulted by [`EnvToken`] by default
pub const TOKEN_ENV_VAR: &str = "ROOMKIT_TOKEN";

/// Refresh tokens this much before they are considered stale
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if the source does not say otherwise (conservative: 15 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Anything able to produce a bearer token
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<String>;
}

/// A fixed token, e.g. from the config file or a CLI flag
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String> {
        if self.0.trim().is_empty() {
            return Err(Error::Auth("configured token is empty".to_string()));
        }
        Ok(self.0.clone())
    }
}

/// Reads the token from an environment variable on every call
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

#[async_trait]
impl TokenSource for EnvToken {
    async fn token(&self) -> Result<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(Error::Auth(format!("{} is not set", self.var))),
        }
    }
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Token holder with expiry-aware caching
#[derive(Clone)]
pub struct Credentials {
    source: Option<Arc<dyn TokenSource>>,
    ttl: Duration,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

impl Credentials {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source: Some(source),
            ttl: DEFAULT_TOKEN_TTL,
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Convenience for a fixed bearer token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(Arc::new(StaticToken::new(token)))
    }

    /// No `Authorization` header at all (local mocks, open endpoints)
    pub fn anonymous() -> Self {
        Self {
            source: None,
            ttl: DEFAULT_TOKEN_TTL,
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Override how long a token from the source is reused
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Get a token for the next request, `None` for anonymous credentials
    pub async fn get_token(&self) -> Result<Option<String>> {
        let Some(source) = &self.source else {
            return Ok(None);
        };

        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(Some(cached.token.clone()));
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let token = source.token().await?;
        let expires_at = Instant::now() + self.ttl.saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        Ok(Some(token))
    }

    /// Drop the cached token and ask the source again
    pub async fn refresh_token(&self) -> Result<Option<String>> {
        {
            let mut cache = self.token_cache.write().await;
            *cache = None;
        }
        self.get_token().await
    }
}
