//! Forge catalog API: public site endpoints plus the admin dashboard API.

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod background;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::tag_request;
use state::AppState;
use telemetry::LogFormat;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(LogFormat::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Forge API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;

    if let Some(seed) = &config.admin_seed {
        state.seed_admin(seed).await?;
    } else {
        tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin seed");
    }

    #[cfg(feature = "scheduler")]
    let mut scheduler = background::start(state.clone()).await?;

    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(tag_request))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    #[cfg(feature = "scheduler")]
    scheduler.shutdown().await?;

    tracing::info!("Server stopped");
    Ok(())
}
