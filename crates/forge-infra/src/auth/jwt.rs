//! HS256 bearer tokens for admin sessions.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forge_core::ports::{AdminSession, AuthError, Clock, TokenService};

const DEV_SECRET: &str = "forge-dev-secret";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub lifetime: Duration,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            lifetime: Duration::from_secs(12 * 3600),
            issuer: "forge-admin".to_string(),
        }
    }
}

impl JwtConfig {
    /// `JWT_SECRET`, `JWT_EXPIRATION_HOURS`, `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set. Admin tokens are signed with a development key.");
                defaults.secret
            }
        };

        let lifetime = std::env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|hours| hours.parse::<u64>().ok())
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 3600))
            .unwrap_or(defaults.lifetime);

        Self {
            secret,
            lifetime,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    email: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs sessions with a shared secret. Expiry is judged against the injected clock.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    config: JwtConfig,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
            clock,
        }
    }

    fn now_secs(&self) -> i64 {
        self.clock.now_ms().div_euclid(1000)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, admin_id: Uuid, email: &str) -> Result<String, AuthError> {
        let iat = self.now_secs();
        let claims = SessionClaims {
            sub: admin_id,
            email: email.to_string(),
            iss: self.config.issuer.clone(),
            iat,
            exp: iat + self.config.lifetime.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::BadToken(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AdminSession, AuthError> {
        let decoded = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidIssuer => AuthError::BadToken("Foreign issuer".to_string()),
                ErrorKind::InvalidSignature => AuthError::BadToken("Bad signature".to_string()),
                _ => AuthError::BadToken(e.to_string()),
            })?;

        let claims = decoded.claims;
        if claims.exp <= self.now_secs() {
            return Err(AuthError::SessionExpired);
        }

        Ok(AdminSession {
            admin_id: claims.sub,
            email: claims.email,
            expires_at: claims.exp,
        })
    }

    fn lifetime(&self) -> Duration {
        self.config.lifetime
    }
}
