//! # Forge Infrastructure
//!
//! Concrete implementations of the ports defined in `forge-core`.
//! This crate contains database, cache, rate limiting, mail and media adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Login throttling via governor
//! - `redis` - Redis cache and rate limit store

pub mod cache;
pub mod database;
pub mod mail;
pub mod media;
pub mod rate_limit;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::InMemoryRepository;
pub use mail::{HttpMailer, LogMailer, MailConfig};
pub use media::{LocalMediaStorage, MediaConfig};
pub use rate_limit::InMemoryRateLimitStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{LoginThrottle, LoginThrottleConfig};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
#[cfg(feature = "redis")]
pub use rate_limit::{RedisRateLimitConfig, RedisRateLimitStore};
