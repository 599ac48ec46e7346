//! Inventory API - REST server for product inventory management

use axum::{middleware, routing::get};
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use observability::{init_metrics, metrics_handler, metrics_middleware};
use tracing::info;

mod api;
mod config;
mod db;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    init_metrics();

    info!("Connecting to PostgreSQL");
    let db = db::connect_with_retry(&config.database.url).await?;

    let api_routes = api::routes(db.clone());
    let router = create_router::<openapi::ApiDoc>(api_routes)?;

    let app = router
        .merge(health_router(config.app.clone()))
        .merge(api::ready_router(db.clone()))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware));

    info!("Starting Inventory API on port {}", config.server.port);

    create_app(app, &config.server).await?;

    info!("Shutting down: closing database connection");
    db.close().await?;

    info!("Inventory API shutdown complete");
    Ok(())
}
