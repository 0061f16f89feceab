//! In-memory fixed-window store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use forge_core::ports::{RateLimitEntry, RateLimitError, RateLimitPolicy, RateLimitStore};
use forge_core::rate_limit::advance_window;

/// Process-local counters behind an async mutex.
///
/// This is the fallback when Redis is not available.
/// Note: Limits are per-process, not distributed across instances.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> Result<RateLimitEntry, RateLimitError> {
        let mut entries = self.entries.lock().await;
        let entry = advance_window(entries.get(key).copied(), policy, now_ms);
        entries.insert(key.to_string(), entry);
        Ok(entry)
    }

    async fn get(&self, key: &str) -> Result<Option<RateLimitEntry>, RateLimitError> {
        Ok(self.entries.lock().await.get(key).copied())
    }

    async fn sweep(&self, max_age: Duration, now_ms: i64) -> Result<usize, RateLimitError> {
        let max_age_ms = max_age.as_millis() as i64;
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| now_ms - entry.window_start_ms < max_age_ms);
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use forge_core::ports::{ManualClock, RateLimiter};
    use forge_core::rate_limit::{CONTACT_POLICY, FixedWindowRateLimiter, rate_limit_key};

    fn limiter(start_ms: i64) -> (FixedWindowRateLimiter, Arc<ManualClock>, Arc<InMemoryRateLimitStore>) {
        let clock = Arc::new(ManualClock::new(start_ms));
        let store = Arc::new(InMemoryRateLimitStore::new());
        let limiter = FixedWindowRateLimiter::new(store.clone(), clock.clone());
        (limiter, clock, store)
    }

    #[tokio::test]
    async fn test_allows_max_then_denies() {
        let (limiter, _clock, _) = limiter(1_000);
        let key = rate_limit_key("contact", "203.0.113.7");

        for expected_remaining in (0..5).rev() {
            let result = limiter.check(&key, &CONTACT_POLICY).await.unwrap();
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
        }

        let denied = limiter.check(&key, &CONTACT_POLICY).await.unwrap();
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.reset_at_ms, 1_000 + 15 * 60 * 1000);
    }

    #[tokio::test]
    async fn test_window_expiry_allows_again() {
        let (limiter, clock, store) = limiter(0);
        let key = "newsletter:198.51.100.4";
        let policy = RateLimitPolicy::new(1, Duration::from_secs(60));

        assert!(limiter.check(key, &policy).await.unwrap().allowed);
        assert!(!limiter.check(key, &policy).await.unwrap().allowed);
        // Denied requests are still counted.
        assert_eq!(store.get(key).await.unwrap().unwrap().count, 2);

        clock.advance(Duration::from_secs(60));
        let result = limiter.check(key, &policy).await.unwrap();
        assert!(result.allowed);
        assert_eq!(result.reset_at_ms, 120_000);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (limiter, _clock, _) = limiter(0);
        let policy = RateLimitPolicy::new(1, Duration::from_secs(60));

        assert!(limiter.check("contact:a", &policy).await.unwrap().allowed);
        assert!(!limiter.check("contact:a", &policy).await.unwrap().allowed);
        assert!(limiter.check("contact:b", &policy).await.unwrap().allowed);
        assert!(limiter.check("newsletter:a", &policy).await.unwrap().allowed);
    }

    #[tokio::test]
    async fn test_sweep_drops_stale_entries() {
        let store = InMemoryRateLimitStore::new();
        let policy = RateLimitPolicy::new(3, Duration::from_secs(60));
        store.hit("old", &policy, 0).await.unwrap();
        store.hit("fresh", &policy, 50_000).await.unwrap();

        let removed = store.sweep(Duration::from_secs(60), 60_000).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get("old").await.unwrap().is_none());
        assert!(store.get("fresh").await.unwrap().is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_hits_are_all_counted() {
        let store = Arc::new(InMemoryRateLimitStore::new());
        let policy = RateLimitPolicy::new(100, Duration::from_secs(60));

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.hit("contact:x", &policy, 10).await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("contact:x").await.unwrap().unwrap().count, 20);
    }
}
