//! Readiness endpoint backed by a database probe

use axum::{extract::State, routing::get, Json, Router};
use axum_helpers::AppError;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::db;

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
}

async fn ready(
    State(db): State<DatabaseConnection>,
) -> Result<Json<ReadyResponse>, AppError> {
    db::check_health(&db)
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("Database not ready: {}", e)))?;

    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
    }))
}

pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
