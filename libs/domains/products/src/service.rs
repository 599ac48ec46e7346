use observability::InventoryMetrics;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
///
/// Validates mutations before they reach the repository and records the
/// mutation counters. A counter is only incremented after the repository
/// reports success.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product with validation
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self.repository.create(input).await?;
        InventoryMetrics::record_product_created();

        Ok(product)
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Get a product by its exact name
    pub async fn get_product_by_name(&self, name: &str) -> ProductResult<Product> {
        self.repository
            .get_by_name(name)
            .await?
            .ok_or_else(|| ProductError::NameNotFound(name.to_string()))
    }

    /// List all products
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_all().await
    }

    /// List products in the given category
    pub async fn list_products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.list_by_category(category).await
    }

    /// List products with quantity strictly below the threshold
    pub async fn list_low_stock_products(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        self.repository.list_below_quantity(threshold).await
    }

    /// List products with zero quantity
    pub async fn list_out_of_stock_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_out_of_stock().await
    }

    /// Count products with at least one unit on hand
    pub async fn in_stock_count(&self) -> ProductResult<i64> {
        self.repository.count_in_stock().await
    }

    /// Total units on hand across all products
    pub async fn total_inventory(&self) -> ProductResult<i64> {
        self.repository.total_quantity().await
    }

    /// Replace a product's fields with validation
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self.repository.update(id, input).await?;
        InventoryMetrics::record_product_updated();

        Ok(product)
    }

    /// Delete a product
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        InventoryMetrics::record_product_deleted();
        Ok(())
    }
}
