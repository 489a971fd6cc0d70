//! Database operations for the merch store.
//!
//! # Tables
//!
//! - `users` - Store accounts (unique username and email)
//! - `products` - Catalogue entries
//! - `orders` - Orders referencing a user
//! - `order_details` - Line items referencing an order and a product
//!
//! Each repository borrows the pool and checks a connection out per
//! operation; multi-step writes run inside a transaction so nothing is
//! persisted when a cross-reference fails to resolve.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p merch-store-cli -- migrate
//! ```

pub mod order_details;
pub mod orders;
pub mod products;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use order_details::OrderDetailRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username or email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign reference did not resolve to an existing row.
    #[error("unresolved {0} reference")]
    MissingReference(&'static str),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created when it does not exist yet; the schema is
/// not, run migrations via the CLI first.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options =
        SqliteConnectOptions::from_str(database_url.expose_secret())?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
