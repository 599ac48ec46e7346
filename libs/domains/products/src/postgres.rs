use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository over Sea-ORM
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Map a driver error on insert/update, turning unique-constraint
    /// violations into domain conflicts. Pre-checks catch most duplicates;
    /// this covers concurrent writers racing past them.
    fn map_write_err(err: DbErr, name: &str, sku: Option<&str>) -> ProductError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(constraint)) => {
                if constraint.contains("sku") {
                    ProductError::DuplicateSku(sku.unwrap_or_default().to_string())
                } else {
                    ProductError::DuplicateName(name.to_string())
                }
            }
            _ => ProductError::Database(err.to_string()),
        }
    }

    fn db_err(err: DbErr) -> ProductError {
        ProductError::Database(err.to_string())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        // Check for duplicates before inserting to return precise conflicts
        if self.get_by_name(&input.name).await?.is_some() {
            return Err(ProductError::DuplicateName(input.name));
        }

        if let Some(ref sku) = input.sku {
            let sku_exists = entity::Entity::find()
                .filter(entity::Column::Sku.eq(sku.as_str()))
                .one(&self.db)
                .await
                .map_err(Self::db_err)?
                .is_some();

            if sku_exists {
                return Err(ProductError::DuplicateSku(sku.clone()));
            }
        }

        let name = input.name.clone();
        let sku = input.sku.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, &name, sku.as_deref()))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(model.map(Into::into))
    }

    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(model.map(Into::into))
    }

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Category.eq(category))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_below_quantity(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Quantity.lt(threshold))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_out_of_stock(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Quantity.eq(0))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_in_stock(&self) -> ProductResult<i64> {
        let count = entity::Entity::find()
            .filter(entity::Column::Quantity.gt(0))
            .count(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(count as i64)
    }

    async fn total_quantity(&self) -> ProductResult<i64> {
        // SUM over an empty table is NULL, not 0
        let total: Option<Option<i64>> = entity::Entity::find()
            .select_only()
            .column_as(entity::Column::Quantity.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(total.flatten().unwrap_or(0))
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .ok_or(ProductError::NotFound(id))?;

        // Check for conflicts with other rows before writing
        let name_taken = entity::Entity::find()
            .filter(entity::Column::Name.eq(input.name.as_str()))
            .filter(entity::Column::Id.ne(id))
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .is_some();

        if name_taken {
            return Err(ProductError::DuplicateName(input.name));
        }

        if let Some(ref sku) = input.sku {
            let sku_taken = entity::Entity::find()
                .filter(entity::Column::Sku.eq(sku.as_str()))
                .filter(entity::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(Self::db_err)?
                .is_some();

            if sku_taken {
                return Err(ProductError::DuplicateSku(sku.clone()));
            }
        }

        let mut product: Product = model.into();
        product.apply_update(input);

        let name = product.name.clone();
        let sku = product.sku.clone();
        let active_model: entity::ActiveModel = product.into();

        let updated_model = active_model
            .update(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, &name, sku.as_deref()))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(Self::db_err)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(count > 0)
    }
}
