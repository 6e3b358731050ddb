use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Tokens are refreshed once less than this much lifetime remains.
pub const REFRESH_BUFFER: Duration = Duration::from_secs(300);

/// A token together with the instant it stops being valid.
#[derive(Clone, Debug)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: Instant,
    pub token_type: String,
}

impl CachedToken {
    pub fn new(token: String, expires_in: Duration, token_type: String) -> Self {
        Self {
            token,
            expires_at: Instant::now() + expires_in,
            token_type,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn needs_refresh(&self) -> bool {
        Instant::now() + REFRESH_BUFFER >= self.expires_at
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Shared token store keyed by scope set.
#[derive(Clone, Default)]
pub struct TokenCache {
    cache: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that is still comfortably valid, if one is cached.
    pub async fn get(&self, key: &str) -> Option<CachedToken> {
        let cache = self.cache.read().await;
        cache.get(key).filter(|token| !token.needs_refresh()).cloned()
    }

    pub async fn set(&self, key: String, token: CachedToken) {
        self.cache.write().await.insert(key, token);
    }

    pub async fn invalidate(&self, key: &str) {
        self.cache.write().await.remove(key);
    }

    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }

    pub async fn needs_refresh(&self, key: &str) -> bool {
        let cache = self.cache.read().await;
        cache.get(key).map(CachedToken::needs_refresh).unwrap_or(true)
    }
}
