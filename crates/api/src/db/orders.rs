//! Order repository for database operations.
//!
//! Each operation checks its own connection out of the pool; nothing here
//! holds a session across requests.

use chrono::Utc;
use sqlx::SqlitePool;

use merch_store_core::OrderId;

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderPatch};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an order by ID.
    ///
    /// Succeeds even when the referenced user has since been deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, total, created_at FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Create a new order after resolving the user reference.
    ///
    /// The lookup and insert run in one transaction so nothing is persisted
    /// when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if `user_id` does not
    /// resolve. Returns `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?1")
            .bind(new.user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if user_exists.is_none() {
            return Err(RepositoryError::MissingReference("user"));
        }

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, total, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id, user_id, total, created_at",
        )
        .bind(new.user_id)
        .bind(new.total)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Merge a patch onto an existing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, total, created_at FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let total = patch.total.unwrap_or(existing.total);

        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET total = ?1 WHERE id = ?2 \
             RETURNING id, user_id, total, created_at",
        )
        .bind(total)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Delete an order by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
