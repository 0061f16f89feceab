//! Cache port for rendered public payloads.

use std::time::Duration;

use async_trait::async_trait;

/// Key/value store for serialized responses.
///
/// Keys are grouped under a `<group>:` prefix (`home:ar`, `home:en`, ...) so
/// a whole group can be dropped once the content behind it changes.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Cached value. Misses and backend failures both read as `None`.
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Remove every key starting with `prefix` and return how many went away.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend unreachable: {0}")]
    Unavailable(String),

    #[error("Cache command failed: {0}")]
    Command(String),
}
