//! User repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use merch_store_core::UserId;

use super::RepositoryError;
use crate::models::{NewUser, User, UserPatch};

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email already
    /// exists. Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewUser) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, username, email, password, created_at",
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Merge a patch onto an existing user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new username or email
    /// collides with another user.
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let username = patch.username.unwrap_or(existing.username);
        let email = patch.email.unwrap_or(existing.email);
        let password = patch.password.unwrap_or(existing.password);

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET username = ?1, email = ?2, password = ?3 \
             WHERE id = ?4 \
             RETURNING id, username, email, password, created_at",
        )
        .bind(&username)
        .bind(&email)
        .bind(&password)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username or email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        Ok(user)
    }

    /// Delete a user by ID.
    ///
    /// Orders referencing the user are left in place.
    ///
    /// # Returns
    ///
    /// Returns `true` if the user was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
