//! Per-request correlation IDs.

use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_INCOMING_ID_LEN: usize = 128;

/// Keep the proxy's ID if it is short printable ASCII.
fn incoming_or_new(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_INCOMING_ID_LEN)
        .filter(|v| v.bytes().all(|b| b.is_ascii_graphic()))
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string)
}

/// Stores a [`RequestId`] in the request, runs the rest of the chain inside a
/// `request` span and echoes the ID as `x-request-id`.
///
/// Mounted with [`actix_web::middleware::from_fn`].
pub async fn tag_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = incoming_or_new(
        req.headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("request", request_id = %id);
    let mut res = next.call(req).instrument(span).await?;

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    Ok(res)
}

/// The ID [`tag_request`] assigned, for handlers that log or echo it.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId(Uuid::new_v4().to_string()));
        ready(Ok(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpResponse, test, web};

    #[::core::prelude::v1::test]
    fn test_incoming_id_sanitized() {
        assert_eq!(incoming_or_new(Some(" abc-123 ")), "abc-123");
        assert_ne!(incoming_or_new(Some("has space")), "has space");
        assert_ne!(incoming_or_new(Some(&"x".repeat(200))).len(), 200);
        assert!(Uuid::parse_str(&incoming_or_new(None)).is_ok());
    }

    #[actix_web::test]
    async fn test_request_id_echoed() {
        let app = test::init_service(App::new().wrap(from_fn(tag_request)).route(
            "/",
            web::get().to(|id: RequestId| async move { HttpResponse::Ok().body(id.0) }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("X-Request-ID", "edge-42"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.headers().get("x-request-id").unwrap(), "edge-42");
        assert_eq!(test::read_body(res).await, "edge-42");
    }

    #[actix_web::test]
    async fn test_request_id_minted_when_absent() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(tag_request))
                .route("/", web::get().to(HttpResponse::NoContent)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
