//! Rate limiting implementations.

mod memory;

pub use memory::InMemoryRateLimitStore;

#[cfg(feature = "rate-limit")]
mod throttle;
#[cfg(feature = "rate-limit")]
pub use throttle::{LoginThrottle, LoginThrottleConfig};

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use self::redis::{RedisRateLimitConfig, RedisRateLimitStore};
