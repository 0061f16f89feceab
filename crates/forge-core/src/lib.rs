//! # Forge Core
//!
//! The domain layer of the Forge catalog backend.
//! Entities, ports and the fixed-window rate limiting algorithm live here,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod rate_limit;

pub use error::{DomainError, RepoError};
