//! Contact messages and newsletter subscribers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use forge_core::RepoError;
use forge_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(kind: &str, id: Uuid) -> impl FnOnce(RepoError) -> AppError {
    let detail = format!("No {kind} with id {id}");
    move |e| match e {
        RepoError::NotFound => AppError::NotFound(detail),
        other => other.into(),
    }
}

/// GET /api/admin/messages
pub async fn list_messages(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let messages = state.repos.messages.find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(messages)))
}

/// PATCH /api/admin/messages/{id}/read
pub async fn mark_message_read(
    _identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let message = state
        .repos
        .messages
        .mark_read(id)
        .await
        .map_err(not_found("message", id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message)))
}

/// DELETE /api/admin/messages/{id}
pub async fn delete_message(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state
        .repos
        .messages
        .delete(id)
        .await
        .map_err(not_found("message", id))?;

    tracing::info!(admin_id = %identity.admin_id, message_id = %id, "Contact message deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(id, "Deleted message")))
}

/// GET /api/admin/subscribers
pub async fn list_subscribers(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let subscribers = state.repos.subscribers.find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(subscribers)))
}

/// DELETE /api/admin/subscribers/{id}
pub async fn delete_subscriber(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state
        .repos
        .subscribers
        .delete(id)
        .await
        .map_err(not_found("subscriber", id))?;

    tracing::info!(admin_id = %identity.admin_id, subscriber_id = %id, "Subscriber removed");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(id, "Deleted subscriber")))
}
