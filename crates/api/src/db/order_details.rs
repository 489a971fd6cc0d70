//! Order line-item repository.
//!
//! This is the one place with derived-value logic: `sub_total` is always
//! computed from the product's current price, never taken from the caller.

use sqlx::SqlitePool;

use merch_store_core::OrderDetailId;

use super::RepositoryError;
use crate::models::{NewOrderDetail, OrderDetail, OrderDetailPatch};

/// Repository for order line-item database operations.
pub struct OrderDetailRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderDetailRepository<'a> {
    /// Create a new order line-item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a line item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderDetailId) -> Result<Option<OrderDetail>, RepositoryError> {
        let detail = sqlx::query_as::<_, OrderDetail>(
            "SELECT id, order_id, product_id, quantity, sub_total \
             FROM order_details WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(detail)
    }

    /// Create a new line item after resolving both references.
    ///
    /// `sub_total` is computed as `product.price * quantity` from the
    /// product's price at creation time. The lookups and the insert run in
    /// one transaction so nothing is persisted when either reference fails
    /// to resolve.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if `order_id` or
    /// `product_id` does not resolve. Returns `RepositoryError::Database`
    /// for other failures.
    pub async fn create(&self, new: &NewOrderDetail) -> Result<OrderDetail, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM orders WHERE id = ?1")
            .bind(new.order_id)
            .fetch_optional(&mut *tx)
            .await?;

        let price = sqlx::query_scalar::<_, f64>("SELECT price FROM products WHERE id = ?1")
            .bind(new.product_id)
            .fetch_optional(&mut *tx)
            .await?;

        let (Some(_), Some(price)) = (order_exists, price) else {
            return Err(RepositoryError::MissingReference("order or product"));
        };

        let sub_total = price * new.quantity as f64;

        let detail = sqlx::query_as::<_, OrderDetail>(
            "INSERT INTO order_details (order_id, product_id, quantity, sub_total) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, order_id, product_id, quantity, sub_total",
        )
        .bind(new.order_id)
        .bind(new.product_id)
        .bind(new.quantity)
        .bind(sub_total)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(detail)
    }

    /// Merge a patch onto an existing line item.
    ///
    /// A supplied quantity overwrites the stored quantity and recomputes
    /// `sub_total` against the product's *current* price, so the sub-total
    /// can change even when no price change was requested here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line item doesn't exist.
    /// Returns `RepositoryError::MissingReference` if the referenced product
    /// has since been deleted and a recomputation was requested.
    pub async fn update(
        &self,
        id: OrderDetailId,
        patch: OrderDetailPatch,
    ) -> Result<OrderDetail, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, OrderDetail>(
            "SELECT id, order_id, product_id, quantity, sub_total \
             FROM order_details WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let Some(quantity) = patch.quantity else {
            return Ok(existing);
        };

        let price = sqlx::query_scalar::<_, f64>("SELECT price FROM products WHERE id = ?1")
            .bind(existing.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::MissingReference("product"))?;

        let sub_total = price * quantity as f64;

        let detail = sqlx::query_as::<_, OrderDetail>(
            "UPDATE order_details SET quantity = ?1, sub_total = ?2 \
             WHERE id = ?3 \
             RETURNING id, order_id, product_id, quantity, sub_total",
        )
        .bind(quantity)
        .bind(sub_total)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(detail)
    }

    /// Delete a line item by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the line item was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderDetailId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM order_details WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
