//! Authenticated dashboard API under `/api/admin`.

mod auth;
mod inbox;
pub mod resources;
mod uploads;

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::middleware::rate_limit::throttle_login;
use resources::{Categories, Certificates, Clients, Exhibitions, News, Products, Solutions};

/// Routes mounted under `/api/admin`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .wrap(from_fn(throttle_login))
            .route(web::post().to(auth::login)),
    )
    .route("/me", web::get().to(auth::me))
    .service(resources::scope::<Categories>("/categories"))
    .service(resources::scope::<Products>("/products"))
    .service(resources::scope::<Solutions>("/solutions"))
    .service(resources::scope::<News>("/news"))
    .service(resources::scope::<Exhibitions>("/exhibitions"))
    .service(resources::scope::<Certificates>("/certificates"))
    .service(resources::scope::<Clients>("/clients"))
    .service(
        web::scope("/messages")
            .route("", web::get().to(inbox::list_messages))
            .route("/{id}/read", web::patch().to(inbox::mark_message_read))
            .route("/{id}", web::delete().to(inbox::delete_message)),
    )
    .service(
        web::scope("/subscribers")
            .route("", web::get().to(inbox::list_subscribers))
            .route("/{id}", web::delete().to(inbox::delete_subscriber)),
    )
    .route("/uploads/{folder}", web::post().to(uploads::upload));
}
