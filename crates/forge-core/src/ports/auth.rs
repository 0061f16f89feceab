//! Admin credentials: password digests and bearer sessions.

use std::time::Duration;

use uuid::Uuid;

/// What a verified bearer token says about its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub admin_id: Uuid,
    pub email: String,
    /// Unix seconds.
    pub expires_at: i64,
}

/// Issues and checks the bearer tokens of the admin dashboard.
pub trait TokenService: Send + Sync {
    fn issue(&self, admin_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Fails with [`AuthError::SessionExpired`] once the token outlives [`Self::lifetime`].
    fn verify(&self, token: &str) -> Result<AdminSession, AuthError>;

    fn lifetime(&self) -> Duration;
}

/// One-way password digests stored on admin accounts.
pub trait PasswordService: Send + Sync {
    fn digest(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` on a mismatch; `Err` only when the stored digest is unreadable.
    fn matches(&self, password: &str, digest: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Wrong email or password")]
    BadCredentials,

    #[error("Admin session expired")]
    SessionExpired,

    #[error("Rejected bearer token: {0}")]
    BadToken(String),

    #[error("No bearer token supplied")]
    NoBearer,

    #[error("Password digest failure: {0}")]
    Digest(String),
}
