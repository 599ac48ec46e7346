use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Custom validator for product names: length bounds alone would accept
/// an all-whitespace name.
fn validate_name_not_blank(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank_name"));
    }
    Ok(())
}

/// Custom validator for prices (validator has no range rule for Decimal)
fn validate_price_non_negative(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Product entity - a single stocked item in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (assigned by the store)
    pub id: i64,
    /// Product name (unique across the inventory)
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Unit price (exact decimal, never negative)
    pub price: Decimal,
    /// Units currently on hand
    pub quantity: i32,
    /// Optional free-text category
    pub category: Option<String>,
    /// Optional stock keeping unit (unique when present)
    pub sku: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "validate_name_not_blank")
    )]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price_non_negative"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub sku: Option<String>,
}

/// DTO for updating an existing product
///
/// Updates are full replacements: every field carries the same requirements
/// as [`CreateProduct`] and the stored product takes all of them at once.
/// `id` and `created_at` never change.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "validate_name_not_blank")
    )]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price_non_negative"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub sku: Option<String>,
}

impl Product {
    /// Create a new product from CreateProduct DTO with a freshly assigned id
    pub fn new(id: i64, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            sku: input.sku,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a full-replacement update, resetting the update timestamp
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.quantity = update.quantity;
        self.category = update.category;
        self.sku = update.sku;
        self.updated_at = Utc::now();
    }

    /// A product is out of stock when no units are on hand
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}
