//! Rate limiting ports.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How many requests a key may make per fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub const fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Counter state for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    /// Requests seen in the current window, including denied ones.
    pub count: u32,
    /// Epoch milliseconds at which the current window began.
    pub window_start_ms: i64,
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Epoch milliseconds at which the current window ends.
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, rounded up.
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let wait_ms = (self.reset_at_ms - now_ms).max(0) as u64;
        wait_ms.div_ceil(1000)
    }
}

/// Keyed counter storage (in-memory map, Redis, ...).
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one request for `key` and return the updated entry.
    ///
    /// Creating the entry, rolling an expired window and incrementing the
    /// counter happen as one atomic step.
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> Result<RateLimitEntry, RateLimitError>;

    /// Current entry for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<RateLimitEntry>, RateLimitError>;

    /// Drop entries whose window started at least `max_age` ago. Returns how many were removed.
    async fn sweep(&self, max_age: Duration, now_ms: i64) -> Result<usize, RateLimitError>;
}

/// Rate limiter trait - decides whether a keyed request may proceed.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count the request against `key` and report whether it is allowed.
    async fn check(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
    ) -> Result<RateLimitResult, RateLimitError>;
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
