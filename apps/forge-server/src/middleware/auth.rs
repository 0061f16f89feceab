//! Bearer authentication for the admin API.

use std::future::{Ready, ready};

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use uuid::Uuid;

use forge_core::ports::{AdminSession, AuthError};
use forge_shared::ErrorResponse;

use crate::state::AppState;

/// The admin behind a verified bearer token. Taking it as a handler argument makes the route private.
#[derive(Debug, Clone)]
pub struct Identity {
    pub admin_id: Uuid,
    pub email: String,
}

impl From<AdminSession> for Identity {
    fn from(session: AdminSession) -> Self {
        Self {
            admin_id: session.admin_id,
            email: session.email,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Unauthenticated(#[from] AuthError);

impl ResponseError for Unauthenticated {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AuthError::Digest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            AuthError::NoBearer => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Send `Authorization: Bearer <token>` from /api/admin/login."),
            AuthError::SessionExpired => ErrorResponse::new(401, "Session Expired")
                .with_detail("Log in again to continue."),
            AuthError::BadToken(reason) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(reason.clone())
            }
            AuthError::BadCredentials => ErrorResponse::unauthorized(),
            AuthError::Digest(_) => ErrorResponse::internal_error(),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::NoBearer)?
        .to_str()
        .map_err(|_| AuthError::BadToken("Authorization header is not ASCII".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::BadToken("Expected a Bearer token".to_string()))
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let token = bearer_token(req)?;
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("Bearer check has no AppState to consult");
        return Err(AuthError::BadToken("Server misconfigured".to_string()));
    };

    let session = state.tokens.verify(token).inspect_err(|e| {
        tracing::debug!(error = %e, "Bearer token refused");
    })?;
    Ok(session.into())
}

impl FromRequest for Identity {
    type Error = Unauthenticated;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Unauthenticated))
    }
}
