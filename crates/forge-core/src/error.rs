//! Error types of the domain and persistence layers.

use chrono::NaiveDate;
use thiserror::Error;

/// A catalog rule was broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid slug '{0}': use lower-case letters, digits and single dashes")]
    InvalidSlug(String),

    #[error("Unsupported locale '{0}'")]
    UnsupportedLocale(String),

    #[error("Exhibition cannot end ({end}) before it starts ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found")]
    NotFound,

    /// Unique key or foreign key violation.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
