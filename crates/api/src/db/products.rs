//! Product repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use merch_store_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductPatch};

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock, created_at FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create a new product.
    ///
    /// Values are stored as provided; there is no range validation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, stock, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING id, name, description, price, stock, created_at",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.stock)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Merge a patch onto an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock, created_at FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let name = patch.name.unwrap_or(existing.name);
        let description = patch.description.unwrap_or(existing.description);
        let price = patch.price.unwrap_or(existing.price);
        let stock = patch.stock.unwrap_or(existing.stock);

        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = ?1, description = ?2, price = ?3, stock = ?4 \
             WHERE id = ?5 \
             RETURNING id, name, description, price, stock, created_at",
        )
        .bind(&name)
        .bind(&description)
        .bind(price)
        .bind(stock)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Delete a product by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
