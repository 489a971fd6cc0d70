//! Order domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use merch_store_core::{OrderId, UserId};

/// An order as persisted.
///
/// `total` is taken as given from the caller and never recomputed from the
/// order's line items. The `user_id` reference is checked at creation time
/// only; deleting a user leaves its orders readable.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// Caller-supplied order total.
    pub total: f64,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub total: f64,
}

/// Partial update for an order. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub total: Option<f64>,
}
