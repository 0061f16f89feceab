//! Dashboard sign-in.

use actix_web::{HttpResponse, web};
use validator::Validate;

use forge_core::ports::AuthError;
use forge_shared::dto::{AdminProfile, AuthResponse, LoginRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/admin/login
///
/// Unknown email and wrong password answer the same 401.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let credentials = body.into_inner();
    credentials.validate()?;

    let Some(admin) = state.repos.admins.find_by_email(&credentials.email).await? else {
        tracing::warn!("Login attempt for unknown admin");
        return Err(AuthError::BadCredentials.into());
    };

    if !state.passwords.matches(&credentials.password, &admin.password_hash)? {
        tracing::warn!(admin_id = %admin.id, "Login attempt with wrong password");
        return Err(AuthError::BadCredentials.into());
    }

    let access_token = state.tokens.issue(admin.id, &admin.email)?;
    tracing::info!(admin_id = %admin.id, "Admin signed in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.lifetime().as_secs(),
    }))
}

/// GET /api/admin/me
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(AdminProfile {
        id: identity.admin_id,
        email: identity.email,
    }))
}
