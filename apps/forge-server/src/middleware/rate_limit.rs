//! Client identity and login throttling.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse, web};

use forge_core::rate_limit::client_ip;
use forge_shared::ErrorResponse;

use crate::state::AppState;

/// Client address as reported by the reverse proxy.
pub fn forwarded_client(headers: &HeaderMap) -> String {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    client_ip(header("x-forwarded-for"), header("x-real-ip"))
}

/// Spend one login attempt for the calling client, or answer 429 with `Retry-After`.
///
/// Mounted with [`actix_web::middleware::from_fn`].
pub async fn throttle_login(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let client = forwarded_client(req.headers());

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("Login throttle has no AppState to consult");
        return next.call(req).await.map(ServiceResponse::map_into_boxed_body);
    };

    let Err(wait) = state.login_throttle.check(&client) else {
        return next.call(req).await.map(ServiceResponse::map_into_boxed_body);
    };

    let retry_after = wait.as_secs_f64().ceil().max(1.0) as u64;
    tracing::warn!(client = %client, retry_after, "Admin login throttled");

    let body = ErrorResponse::new(429, "Too Many Requests").with_detail(format!(
        "Too many login attempts. Try again in {retry_after} seconds."
    ));
    let response = HttpResponse::TooManyRequests()
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(body);

    Ok(req.into_response(response))
}
