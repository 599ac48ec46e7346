//! Observability utilities for the inventory service.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Custom counters for product mutations
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, InventoryMetrics};
//!
//! // Initialize metrics recorder
//! init_metrics();
//!
//! // Record product mutations
//! InventoryMetrics::record_product_created();
//!
//! // Add metrics endpoint to router
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod inventory;
pub mod middleware;

pub use inventory::InventoryMetrics;
pub use middleware::metrics_middleware;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// This should be called once at application startup, before any metric
/// is recorded. Returns the PrometheusHandle for rendering metrics.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("Failed to install Prometheus recorder");

        info!("Prometheus metrics recorder initialized");

        register_metric_descriptions();

        handle
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Product mutation counters
    describe_counter!(
        "products_created_total",
        "Total number of products created"
    );
    describe_counter!(
        "products_updated_total",
        "Total number of products updated"
    );
    describe_counter!(
        "products_deleted_total",
        "Total number of products deleted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_metrics_is_idempotent() {
        let first = init_metrics();
        let second = init_metrics();
        assert!(std::ptr::eq(first, second));

        InventoryMetrics::record_product_created();
        let rendered = metrics_handler().await;
        assert!(rendered.contains("products_created_total"));
    }
}
