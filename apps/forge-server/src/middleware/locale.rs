//! `{locale}` path segment extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use forge_core::domain::Locale;

use super::error::AppError;

/// Locale taken from the `{locale}` route segment. Unsupported codes are a 404.
#[derive(Debug, Clone, Copy)]
pub struct RequestLocale(pub Locale);

impl FromRequest for RequestLocale {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let segment = req.match_info().get("locale").unwrap_or_default();
        let result = segment
            .parse::<Locale>()
            .map(RequestLocale)
            .map_err(|_| AppError::NotFound(format!("Unsupported locale '{segment}'")));
        ready(result)
    }
}
