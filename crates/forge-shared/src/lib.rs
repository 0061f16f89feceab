//! # Forge Shared
//!
//! Shared types between frontend and backend.
//! In a full-stack Rust setup, this crate is compiled for both server and WASM:
//! the DTOs describe the JSON API and [`viewer`] drives the production-line
//! diagram viewer on the client.

pub mod dto;
pub mod response;
pub mod viewer;

pub use response::{ApiResponse, ErrorResponse, TooManyRequestsBody};
