//! Order line-item domain types.

use sqlx::FromRow;

use merch_store_core::{OrderDetailId, OrderId, ProductId};

/// A line item on an order.
///
/// `sub_total` is derived, never caller-supplied: it is computed as
/// `product.price * quantity` at creation, and recomputed from the product's
/// *current* price whenever the quantity changes.
#[derive(Debug, Clone, FromRow)]
pub struct OrderDetail {
    /// Unique line-item ID.
    pub id: OrderDetailId,
    /// The order this line item belongs to.
    pub order_id: OrderId,
    /// The product ordered.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: i64,
    /// Derived: product price at the last quantity write × quantity.
    pub sub_total: f64,
}

/// Fields required to create a line item. `sub_total` is computed.
#[derive(Debug, Clone)]
pub struct NewOrderDetail {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Partial update for a line item. A supplied quantity triggers sub-total
/// recomputation.
#[derive(Debug, Clone, Default)]
pub struct OrderDetailPatch {
    pub quantity: Option<i64>,
}
