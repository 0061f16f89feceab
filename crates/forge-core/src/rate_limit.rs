//! Fixed-window rate limiting.
//!
//! Every key owns a counter and the timestamp its current window began. A
//! request that arrives once the window has elapsed starts a fresh window.
//! Denied requests still count, so retries inside the window stay blocked.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{
    Clock, RateLimitEntry, RateLimitError, RateLimitPolicy, RateLimitResult, RateLimitStore,
    RateLimiter,
};

/// Action name for contact form submissions.
pub const CONTACT_ACTION: &str = "contact";
/// Action name for newsletter subscriptions.
pub const NEWSLETTER_ACTION: &str = "newsletter";

/// Default contact form policy: 5 submissions per 15 minutes.
pub const CONTACT_POLICY: RateLimitPolicy = RateLimitPolicy::new(5, Duration::from_secs(15 * 60));
/// Default newsletter policy: 3 subscriptions per hour.
pub const NEWSLETTER_POLICY: RateLimitPolicy = RateLimitPolicy::new(3, Duration::from_secs(60 * 60));

/// Identity used when no forwarding header names the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Storage key for an (action, client) pair.
pub fn rate_limit_key(action: &str, client_ip: &str) -> String {
    format!("{action}:{client_ip}")
}

/// Client identity from proxy headers.
///
/// The first address of `X-Forwarded-For` wins, then `X-Real-IP`.
pub fn client_ip(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    forwarded_for
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| real_ip.map(str::trim).filter(|v| !v.is_empty()))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Apply one request to `entry`: start or roll the window, then count the request.
pub fn advance_window(
    entry: Option<RateLimitEntry>,
    policy: &RateLimitPolicy,
    now_ms: i64,
) -> RateLimitEntry {
    let mut entry = entry.unwrap_or(RateLimitEntry {
        count: 0,
        window_start_ms: now_ms,
    });

    if now_ms - entry.window_start_ms >= policy.window_ms() {
        entry.count = 0;
        entry.window_start_ms = now_ms;
    }

    entry.count = entry.count.saturating_add(1);
    entry
}

/// Verdict for an entry that already includes the current request.
pub fn evaluate(entry: &RateLimitEntry, policy: &RateLimitPolicy) -> RateLimitResult {
    let allowed = entry.count <= policy.max_requests;
    RateLimitResult {
        allowed,
        remaining: policy.max_requests.saturating_sub(entry.count),
        reset_at_ms: entry.window_start_ms + policy.window_ms(),
    }
}

/// [`RateLimiter`] counting fixed windows in a [`RateLimitStore`].
pub struct FixedWindowRateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowRateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn RateLimitStore> {
        &self.store
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn check(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
    ) -> Result<RateLimitResult, RateLimitError> {
        let now_ms = self.clock.now_ms();
        let entry = self.store.hit(key, policy, now_ms).await?;
        Ok(evaluate(&entry, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: RateLimitPolicy = RateLimitPolicy::new(2, Duration::from_secs(60));

    #[test]
    fn test_first_hit_opens_window() {
        let entry = advance_window(None, &POLICY, 1_000);
        assert_eq!(
            entry,
            RateLimitEntry {
                count: 1,
                window_start_ms: 1_000
            }
        );
    }

    #[test]
    fn test_window_rolls_at_exact_boundary() {
        let entry = RateLimitEntry {
            count: 7,
            window_start_ms: 0,
        };
        let still_open = advance_window(Some(entry), &POLICY, 59_999);
        assert_eq!(still_open.count, 8);
        assert_eq!(still_open.window_start_ms, 0);

        let rolled = advance_window(Some(entry), &POLICY, 60_000);
        assert_eq!(rolled.count, 1);
        assert_eq!(rolled.window_start_ms, 60_000);
    }

    #[test]
    fn test_evaluate_denies_past_max() {
        let at_max = RateLimitEntry {
            count: 2,
            window_start_ms: 500,
        };
        let result = evaluate(&at_max, &POLICY);
        assert!(result.allowed);
        assert_eq!(result.remaining, 0);
        assert_eq!(result.reset_at_ms, 60_500);

        let over = RateLimitEntry {
            count: 3,
            window_start_ms: 500,
        };
        assert!(!evaluate(&over, &POLICY).allowed);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let result = RateLimitResult {
            allowed: false,
            remaining: 0,
            reset_at_ms: 10_001,
        };
        assert_eq!(result.retry_after_secs(0), 11);
        assert_eq!(result.retry_after_secs(9_000), 2);
        assert_eq!(result.retry_after_secs(10_001), 0);
        assert_eq!(result.retry_after_secs(20_000), 0);
    }

    #[test]
    fn test_client_ip_prefers_first_forwarded_address() {
        assert_eq!(
            client_ip(Some(" 203.0.113.7 , 10.0.0.1"), Some("10.0.0.2")),
            "203.0.113.7"
        );
        assert_eq!(client_ip(None, Some("198.51.100.4")), "198.51.100.4");
        assert_eq!(client_ip(Some(""), None), UNKNOWN_CLIENT);
        assert_eq!(client_ip(None, None), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_key_format() {
        assert_eq!(rate_limit_key(CONTACT_ACTION, "1.2.3.4"), "contact:1.2.3.4");
    }
}
