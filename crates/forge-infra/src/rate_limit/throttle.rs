//! Per-IP login throttle using the governor crate (GCRA).

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Login throttle configuration.
#[derive(Debug, Clone)]
pub struct LoginThrottleConfig {
    /// Attempts per minute per client.
    pub per_minute: u32,
    /// Attempts allowed back to back before the rate applies.
    pub burst: u32,
}

impl Default for LoginThrottleConfig {
    fn default() -> Self {
        Self {
            per_minute: 10,
            burst: 5,
        }
    }
}

impl LoginThrottleConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            per_minute: std::env::var("LOGIN_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.per_minute),
            burst: std::env::var("LOGIN_RATE_LIMIT_BURST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.burst),
        }
    }
}

/// Keyed GCRA limiter guarding the admin login endpoint.
///
/// Limits are per-process.
pub struct LoginThrottle {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl LoginThrottle {
    pub fn new(config: &LoginThrottleConfig) -> Self {
        let per_minute = NonZeroU32::new(config.per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&LoginThrottleConfig::from_env())
    }

    /// `Ok` when `client` may attempt a login now, otherwise the time to wait.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&client.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Forget clients whose quota has fully replenished.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new(&LoginThrottleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_throttled() {
        let throttle = LoginThrottle::new(&LoginThrottleConfig {
            per_minute: 1,
            burst: 2,
        });

        assert!(throttle.check("10.0.0.1").is_ok());
        assert!(throttle.check("10.0.0.1").is_ok());

        let wait = throttle.check("10.0.0.1").unwrap_err();
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(60));
    }

    #[test]
    fn test_clients_are_throttled_separately() {
        let throttle = LoginThrottle::new(&LoginThrottleConfig {
            per_minute: 1,
            burst: 1,
        });

        assert!(throttle.check("10.0.0.1").is_ok());
        assert!(throttle.check("10.0.0.1").is_err());
        assert!(throttle.check("10.0.0.2").is_ok());
    }
}
