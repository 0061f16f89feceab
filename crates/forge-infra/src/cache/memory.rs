//! Process-local cache, used when Redis is not configured or unreachable.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use forge_core::ports::{Cache, CacheError, Clock, SystemClock};

struct CachedPayload {
    body: String,
    expires_at_ms: Option<i64>,
}

impl CachedPayload {
    fn is_live(&self, now_ms: i64) -> bool {
        self.expires_at_ms.is_none_or(|at| now_ms < at)
    }
}

/// Payloads kept in a map, expiring against a [`Clock`].
///
/// Expired entries are dropped on read.
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CachedPayload>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let now_ms = self.clock.now_ms();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(payload) if payload.is_live(now_ms) => return Some(payload.body.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        self.entries.write().await.remove(key);
        None
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at_ms = ttl.map(|ttl| self.clock.now_ms() + ttl.as_millis() as i64);
        self.entries.write().await.insert(
            key.to_string(),
            CachedPayload {
                body: value.to_string(),
                expires_at_ms,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::ports::ManualClock;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("home:en", "{}", None).await.unwrap();
        assert_eq!(cache.get("home:en").await, Some("{}".to_string()));
        assert_eq!(cache.get("home:ar").await, None);
    }

    #[tokio::test]
    async fn test_entry_expires_with_clock() {
        let clock = Arc::new(ManualClock::new(1_000));
        let cache = InMemoryCache::with_clock(clock.clone());
        cache
            .set("home:en", "{}", Some(Duration::from_secs(300)))
            .await
            .unwrap();

        clock.advance(Duration::from_secs(299));
        assert!(cache.get("home:en").await.is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get("home:en").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_prefix_keeps_other_groups() {
        let cache = InMemoryCache::new();
        for key in ["home:ar", "home:en", "home:tr", "homepage-banner"] {
            cache.set(key, "{}", None).await.unwrap();
        }

        assert_eq!(cache.delete_prefix("home:").await.unwrap(), 3);
        assert!(cache.get("home:ar").await.is_none());
        assert!(cache.get("homepage-banner").await.is_some());

        cache.delete("homepage-banner").await.unwrap();
        assert!(cache.get("homepage-banner").await.is_none());
    }
}
