//! API routes module

pub mod ready;

use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductService};
use sea_orm::DatabaseConnection;

pub use ready::router as ready_router;

/// Create all REST API routes
pub fn routes(db: DatabaseConnection) -> Router {
    let repository = PgProductRepository::new(db);
    let service = ProductService::new(repository);

    Router::new().nest("/products", handlers::router(service))
}
