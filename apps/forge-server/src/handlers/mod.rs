//! HTTP handlers and route configuration.

mod admin;
mod forms;
mod health;
mod public;
mod views;

use actix_web::{error::JsonPayloadError, web};

use crate::middleware::error::AppError;


/// Malformed JSON bodies get the same problem-details shape as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: JsonPayloadError, _req| {
            let detail = err.to_string();
            let error = match err {
                JsonPayloadError::ContentType => AppError::UnsupportedMediaType(detail),
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    AppError::PayloadTooLarge(detail)
                }
                _ => AppError::BadRequest(detail),
            };
            error.into()
        })
}

/// Configure all application routes.
///
/// `/{locale}` is registered last so it cannot shadow `admin`, `contact` or `health`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/contact", web::post().to(forms::submit_contact))
            .route("/newsletter", web::post().to(forms::subscribe_newsletter))
            .service(web::scope("/admin").configure(admin::configure))
            .service(
                web::scope("/{locale}")
                    .route("/home", web::get().to(public::home))
                    .route("/categories", web::get().to(public::list_categories))
                    .route("/categories/{slug}", web::get().to(public::category_detail))
                    .route("/products", web::get().to(public::list_products))
                    .route("/products/{slug}", web::get().to(public::product_detail))
                    .route("/solutions", web::get().to(public::list_solutions))
                    .route("/solutions/{slug}", web::get().to(public::solution_detail))
                    .route("/news", web::get().to(public::list_news))
                    .route("/news/{slug}", web::get().to(public::news_detail))
                    .route("/exhibitions", web::get().to(public::list_exhibitions))
                    .route("/certificates", web::get().to(public::list_certificates))
                    .route("/clients", web::get().to(public::list_clients)),
            ),
    );
}
