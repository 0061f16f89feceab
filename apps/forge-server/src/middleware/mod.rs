//! Middleware modules.

pub mod auth;
pub mod error;
pub mod locale;
pub mod rate_limit;
