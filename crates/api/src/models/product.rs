//! Product domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use merch_store_core::ProductId;

/// A product as persisted.
///
/// Numeric fields are stored as provided: there is no range validation, so a
/// negative price or stock is accepted (documented non-goal).
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description, empty when not supplied.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

/// Partial update for a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}
