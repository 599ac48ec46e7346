//! Database connection handling with startup retry

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use std::time::Duration;
use tracing::{debug, info, log::LevelFilter, warn};

const MAX_RETRIES: u32 = 5;
const INITIAL_DELAY: Duration = Duration::from_millis(500);
const MAX_DELAY: Duration = Duration::from_secs(10);

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug); // SeaORM requires log::LevelFilter
    opt
}

/// Connect to PostgreSQL, retrying with exponential backoff.
///
/// The database may still be starting when the service boots; transient
/// connection failures are retried before giving up.
pub async fn connect_with_retry(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut delay = INITIAL_DELAY;

    for attempt in 1..=MAX_RETRIES {
        match Database::connect(connect_options(database_url)).await {
            Ok(db) => {
                info!("Connected to PostgreSQL database");
                return Ok(db);
            }
            Err(e) if attempt < MAX_RETRIES => {
                warn!(
                    attempt,
                    max_retries = MAX_RETRIES,
                    "Database connection failed: {}. Retrying in {:?}",
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("retry loop returns on the final attempt")
}

/// Verify the database connection is alive with a `SELECT 1` probe
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DbErr> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await?;

    Ok(())
}
