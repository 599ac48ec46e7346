//! Inventory-specific metrics.

use metrics::counter;

/// Recorder for the product mutation counters.
///
/// The underlying `metrics` counters are atomic, so concurrent handlers
/// can increment them without coordination. Callers must only record a
/// mutation after it has been committed.
pub struct InventoryMetrics;

impl InventoryMetrics {
    /// Record a successful product creation
    pub fn record_product_created() {
        counter!("products_created_total").increment(1);
    }

    /// Record a successful product update
    pub fn record_product_updated() {
        counter!("products_updated_total").increment(1);
    }

    /// Record a successful product deletion
    pub fn record_product_deleted() {
        counter!("products_deleted_total").increment(1);
    }
}
