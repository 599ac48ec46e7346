use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Implementations can use different storage backends (PostgreSQL for
/// production, in-memory for tests and local development).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product, assigning its id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Get a product by its exact name
    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// List all products
    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    /// List products in the given category
    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// List products with quantity strictly below the threshold
    async fn list_below_quantity(&self, threshold: i32) -> ProductResult<Vec<Product>>;

    /// List products with zero quantity
    async fn list_out_of_stock(&self) -> ProductResult<Vec<Product>>;

    /// Count products with quantity greater than zero
    async fn count_in_stock(&self) -> ProductResult<i64>;

    /// Sum of all product quantities (0 when the inventory is empty)
    async fn total_quantity(&self) -> ProductResult<i64>;

    /// Replace an existing product's fields
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, reporting whether it existed
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Check whether a product with the given id exists
    async fn exists_by_id(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids are assigned sequentially starting at 1, mirroring the identity
/// column of the Postgres implementation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(0)),
        }
    }

    fn sorted_by_id(mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by_key(|p| p.id);
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if products.values().any(|p| p.name == input.name) {
            return Err(ProductError::DuplicateName(input.name));
        }

        if let Some(ref sku) = input.sku {
            if products.values().any(|p| p.sku.as_deref() == Some(sku)) {
                return Err(ProductError::DuplicateSku(sku.clone()));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product::new(id, input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.name == name).cloned())
    }

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted_by_id(products.values().cloned().collect()))
    }

    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let matching = products
            .values()
            .filter(|p| p.category.as_deref() == Some(category))
            .cloned()
            .collect();
        Ok(Self::sorted_by_id(matching))
    }

    async fn list_below_quantity(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let matching = products
            .values()
            .filter(|p| p.quantity < threshold)
            .cloned()
            .collect();
        Ok(Self::sorted_by_id(matching))
    }

    async fn list_out_of_stock(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let matching = products
            .values()
            .filter(|p| p.quantity == 0)
            .cloned()
            .collect();
        Ok(Self::sorted_by_id(matching))
    }

    async fn count_in_stock(&self) -> ProductResult<i64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| p.quantity > 0).count() as i64)
    }

    async fn total_quantity(&self) -> ProductResult<i64> {
        let products = self.products.read().await;
        Ok(products.values().map(|p| i64::from(p.quantity)).sum())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&id) {
            return Err(ProductError::NotFound(id));
        }

        if products
            .values()
            .any(|p| p.id != id && p.name == input.name)
        {
            return Err(ProductError::DuplicateName(input.name));
        }

        if let Some(ref sku) = input.sku {
            if products
                .values()
                .any(|p| p.id != id && p.sku.as_deref() == Some(sku))
            {
                return Err(ProductError::DuplicateSku(sku.clone()));
            }
        }

        let product = products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn widget(name: &str, quantity: i32) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::new(999, 2),
            quantity,
            category: Some("tools".to_string()),
            sku: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_from_one() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(widget("hammer", 5)).await.unwrap();
        let second = repo.create(widget("wrench", 3)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(widget("hammer", 5)).await.unwrap();

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product.clone()));

        let by_name = repo.get_by_name("hammer").await.unwrap();
        assert_eq!(by_name, Some(product));
    }

    #[tokio::test]
    async fn test_duplicate_name_error() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("hammer", 5)).await.unwrap();
        let result = repo.create(widget("hammer", 2)).await;

        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_duplicate_sku_error() {
        let repo = InMemoryProductRepository::new();

        let mut first = widget("hammer", 5);
        first.sku = Some("TL-01".to_string());
        repo.create(first).await.unwrap();

        let mut second = widget("wrench", 2);
        second.sku = Some("TL-01".to_string());
        let result = repo.create(second).await;

        assert!(matches!(result, Err(ProductError::DuplicateSku(_))));
    }

    #[tokio::test]
    async fn test_missing_sku_never_conflicts() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("hammer", 5)).await.unwrap();
        let result = repo.create(widget("wrench", 2)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_stock_queries() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("hammer", 5)).await.unwrap();
        repo.create(widget("wrench", 0)).await.unwrap();
        repo.create(widget("pliers", 2)).await.unwrap();

        let low = repo.list_below_quantity(3).await.unwrap();
        assert_eq!(
            low.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["wrench", "pliers"]
        );

        let out = repo.list_out_of_stock().await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "wrench");

        assert_eq!(repo.count_in_stock().await.unwrap(), 2);
        assert_eq!(repo.total_quantity().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_total_quantity_empty_inventory_is_zero() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.total_quantity().await.unwrap(), 0);
        assert_eq!(repo.count_in_stock().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("hammer", 5)).await.unwrap();
        let mut uncategorized = widget("mystery", 1);
        uncategorized.category = None;
        repo.create(uncategorized).await.unwrap();

        let tools = repo.list_by_category("tools").await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "hammer");

        let empty = repo.list_by_category("garden").await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_created_at() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(widget("hammer", 5)).await.unwrap();

        let updated = repo
            .update(
                product.id,
                UpdateProduct {
                    name: "sledgehammer".to_string(),
                    description: Some("Heavy duty".to_string()),
                    price: Decimal::new(2500, 2),
                    quantity: 1,
                    category: None,
                    sku: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "sledgehammer");
        assert_eq!(updated.category, None);
        assert_eq!(updated.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo
            .update(
                42,
                UpdateProduct {
                    name: "ghost".to_string(),
                    description: None,
                    price: Decimal::ZERO,
                    quantity: 0,
                    category: None,
                    sku: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_to_existing_name_conflicts() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("hammer", 5)).await.unwrap();
        let wrench = repo.create(widget("wrench", 2)).await.unwrap();

        let result = repo
            .update(
                wrench.id,
                UpdateProduct {
                    name: "hammer".to_string(),
                    description: None,
                    price: Decimal::ZERO,
                    quantity: 0,
                    category: None,
                    sku: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_is_allowed() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(widget("hammer", 5)).await.unwrap();

        let result = repo
            .update(
                product.id,
                UpdateProduct {
                    name: "hammer".to_string(),
                    description: None,
                    price: Decimal::new(1500, 2),
                    quantity: 8,
                    category: None,
                    sku: None,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(widget("hammer", 5)).await.unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert!(!repo.exists_by_id(product.id).await.unwrap());
    }
}
