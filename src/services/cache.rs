// src/services/cache.rs
// DOCUMENTATION: In-memory cache for the PayPal OAuth access token
// PURPOSE: Reuse the client-credentials token across requests until it expires

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Safety margin subtracted from the provider-reported lifetime.
/// A token about to expire mid-request is worthless.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe single-slot token cache
/// DOCUMENTATION: One OAuth token per provider credentials pair
#[derive(Clone, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached token if still valid
    pub async fn get(&self) -> Option<String> {
        let slot = self.slot.read().await;

        match slot.as_ref() {
            Some(entry) if !entry.is_expired() => {
                log::debug!("Token cache HIT");
                Some(entry.token.clone())
            }
            Some(_) => {
                log::debug!("Token cache EXPIRED");
                None
            }
            None => {
                log::debug!("Token cache MISS");
                None
            }
        }
    }

    /// Store a token with the lifetime reported by the provider
    pub async fn store(&self, token: String, expires_in_secs: u64) {
        let ttl = Duration::from_secs(expires_in_secs)
            .checked_sub(EXPIRY_MARGIN)
            .unwrap_or(Duration::ZERO);

        let mut slot = self.slot.write().await;
        *slot = Some(CachedToken {
            token,
            expires_at: Instant::now() + ttl,
        });
        log::debug!("Token cached (TTL: {}s)", ttl.as_secs());
    }

    /// Drop the cached token (after an auth failure)
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_get() {
        let cache = TokenCache::new();
        cache.store("tok".to_string(), 3600).await;

        assert_eq!(cache.get().await, Some("tok".to_string()));
    }

    #[tokio::test]
    async fn test_empty_cache() {
        let cache = TokenCache::new();
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_short_lifetime_expires_immediately() {
        // Lifetime below the safety margin means the token is never served
        let cache = TokenCache::new();
        cache.store("tok".to_string(), 30).await;

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = TokenCache::new();
        cache.store("tok".to_string(), 3600).await;
        cache.clear().await;

        assert!(cache.get().await.is_none());
    }
}
