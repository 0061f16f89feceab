//! Redis fixed-window store. Each key is a hash of `count` and `start`.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Script;

use forge_core::ports::{RateLimitEntry, RateLimitError, RateLimitPolicy, RateLimitStore};

use crate::cache::RedisConfig;

// Same steps as `advance_window`, executed atomically on the server.
// Returns: [count, window_start_ms]
const HIT_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window_ms = tonumber(ARGV[2])

local start = tonumber(redis.call('HGET', key, 'start'))
local fresh = (not start) or (now - start >= window_ms)
if fresh then
    redis.call('HSET', key, 'count', 0, 'start', ARGV[1])
    start = now
end

local count = redis.call('HINCRBY', key, 'count', 1)
-- TTL is set after HINCRBY: PEXPIRE 0 would otherwise drop the fresh hash.
if fresh then
    redis.call('PEXPIRE', key, math.max(window_ms, 1))
end
return {count, start}
"#;

/// Redis rate limit store configuration.
#[derive(Debug, Clone)]
pub struct RedisRateLimitConfig {
    /// Redis connection config
    pub redis: RedisConfig,
    /// Key prefix for rate limit keys
    pub key_prefix: String,
}

impl Default for RedisRateLimitConfig {
    fn default() -> Self {
        Self {
            redis: RedisConfig::default(),
            key_prefix: "ratelimit".to_string(),
        }
    }
}

impl RedisRateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            redis: RedisConfig::from_env(),
            key_prefix: std::env::var("RATE_LIMIT_KEY_PREFIX")
                .unwrap_or_else(|_| "ratelimit".to_string()),
        }
    }
}

/// Redis-backed store shared by every server instance.
///
/// Keys expire with their window, so no sweep is needed.
pub struct RedisRateLimitStore {
    conn: ConnectionManager,
    config: RedisRateLimitConfig,
    script: Script,
}

impl RedisRateLimitStore {
    pub async fn new(config: RedisRateLimitConfig) -> Result<Self, RateLimitError> {
        let conn = config
            .redis
            .connect()
            .await
            .map_err(RateLimitError::Backend)?;

        tracing::info!(url = %config.redis.url, "Connected to Redis rate limit store");

        Ok(Self {
            conn,
            config,
            script: Script::new(HIT_SCRIPT),
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> Result<RateLimitEntry, RateLimitError> {
        let mut conn = self.conn.clone();

        let (count, window_start_ms): (i64, i64) = self
            .script
            .key(self.make_key(key))
            .arg(now_ms)
            .arg(policy.window_ms())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        Ok(RateLimitEntry {
            count: u32::try_from(count).unwrap_or(u32::MAX),
            window_start_ms,
        })
    }

    async fn get(&self, key: &str) -> Result<Option<RateLimitEntry>, RateLimitError> {
        let mut conn = self.conn.clone();

        let (count, start): (Option<u32>, Option<i64>) = redis::cmd("HMGET")
            .arg(self.make_key(key))
            .arg("count")
            .arg("start")
            .query_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        Ok(count.zip(start).map(|(count, window_start_ms)| RateLimitEntry {
            count,
            window_start_ms,
        }))
    }

    async fn sweep(&self, _max_age: Duration, _now_ms: i64) -> Result<usize, RateLimitError> {
        // Keys carry their own PEXPIRE.
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store() -> Option<RedisRateLimitStore> {
        let config = RedisRateLimitConfig {
            redis: RedisConfig {
                url: std::env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
                connect_timeout: Duration::from_secs(1),
                fallback_to_memory: false,
            },
            key_prefix: format!("test_ratelimit_{}", uuid::Uuid::new_v4()),
        };

        RedisRateLimitStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_fixed_window() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };
        let policy = RateLimitPolicy::new(2, Duration::from_secs(1));
        let key = "contact:127.0.0.1";
        let now = chrono::Utc::now().timestamp_millis();

        assert_eq!(store.hit(key, &policy, now).await.unwrap().count, 1);
        assert_eq!(store.hit(key, &policy, now + 10).await.unwrap().count, 2);
        let third = store.hit(key, &policy, now + 20).await.unwrap();
        assert_eq!(third.count, 3);
        assert_eq!(third.window_start_ms, now);
        assert_eq!(store.get(key).await.unwrap(), Some(third));

        // A hit past the window rolls it even before Redis expires the key.
        let rolled = store.hit(key, &policy, now + 1_000).await.unwrap();
        assert_eq!(rolled.count, 1);
        assert_eq!(rolled.window_start_ms, now + 1_000);

        // Wait for the key to expire
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let later = chrono::Utc::now().timestamp_millis();
        assert_eq!(store.hit(key, &policy, later).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_redis_zero_window_key_still_expires() {
        let Some(store) = get_test_store().await else {
            return;
        };
        let policy = RateLimitPolicy::new(5, Duration::ZERO);
        let key = "newsletter:127.0.0.1";
        let now = chrono::Utc::now().timestamp_millis();

        assert_eq!(store.hit(key, &policy, now).await.unwrap().count, 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.get(key).await.unwrap(), None);
    }
}
