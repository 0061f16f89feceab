//! Redis cache for rendered public payloads, shared by every server instance.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};

use forge_core::ports::{Cache, CacheError};

/// Keys inspected per `SCAN` round when deleting by prefix.
const SCAN_BATCH: usize = 200;

/// Redis connection settings, shared with the rate limit store.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub connect_timeout: Duration,
    /// Run on process memory instead of refusing to start when Redis is down.
    pub fallback_to_memory: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            fallback_to_memory: true,
        }
    }
}

impl RedisConfig {
    /// Reads `REDIS_URL`, `REDIS_CONNECT_TIMEOUT_SECS` and `REDIS_FALLBACK_TO_MEMORY`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connect_timeout: std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            fallback_to_memory: std::env::var("REDIS_FALLBACK_TO_MEMORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.fallback_to_memory),
        }
    }

    /// Open a managed connection, giving up after `connect_timeout`.
    pub(crate) async fn connect(&self) -> Result<ConnectionManager, String> {
        let client = Client::open(self.url.as_str()).map_err(|e| e.to_string())?;
        tokio::time::timeout(self.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| format!("No answer from {} within {:?}", self.url, self.connect_timeout))?
            .map_err(|e| e.to_string())
    }
}

fn command_failed(e: RedisError) -> CacheError {
    CacheError::Command(e.to_string())
}

/// Cache stored under `<namespace>:<key>`.
pub struct RedisCache {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisCache {
    pub async fn new(config: RedisConfig) -> Result<Self, CacheError> {
        let conn = config.connect().await.map_err(CacheError::Unavailable)?;
        tracing::info!(url = %config.url, "Connected to Redis cache");

        Ok(Self {
            conn,
            namespace: std::env::var("CACHE_KEY_PREFIX").unwrap_or_else(|_| "forge".to_string()),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(self.namespaced(key))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(%key, error = %e, "Redis GET failed, treating as miss");
                None
            })
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let key = self.namespaced(key);

        let written = match ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await,
            None => conn.set::<_, _, ()>(key, value).await,
        };
        written.map_err(command_failed)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.namespaced(key))
            .await
            .map_err(command_failed)
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", self.namespaced(prefix));
        let mut cursor: u64 = 0;
        let mut removed = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(command_failed)?;

            if !keys.is_empty() {
                removed += conn.del::<_, usize>(&keys).await.map_err(command_failed)?;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!(%prefix, removed, "Cache group cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cache against `REDIS_URL`, or `None` so the test is skipped.
    async fn test_cache() -> Option<RedisCache> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
            fallback_to_memory: false,
        };
        RedisCache::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_home_payload_round_trip() {
        let Some(cache) = test_cache().await else {
            return;
        };

        let key = "test:home:en";
        cache.set(key, r#"{"locale":"en"}"#, None).await.unwrap();
        assert_eq!(cache.get(key).await.as_deref(), Some(r#"{"locale":"en"}"#));

        cache.delete(key).await.unwrap();
        assert_eq!(cache.get(key).await, None);
    }

    #[tokio::test]
    async fn test_delete_prefix() {
        let Some(cache) = test_cache().await else {
            return;
        };

        for key in ["test-prefix:home:ar", "test-prefix:home:tr", "test-prefix:other"] {
            cache
                .set(key, "{}", Some(Duration::from_secs(30)))
                .await
                .unwrap();
        }

        assert_eq!(cache.delete_prefix("test-prefix:home:").await.unwrap(), 2);
        assert!(cache.get("test-prefix:other").await.is_some());
        cache.delete("test-prefix:other").await.unwrap();
    }
}
