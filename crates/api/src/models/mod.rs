//! Domain types for the four store resources.
//!
//! These types represent rows in the store, separate from the wire payloads
//! defined next to the route handlers. Partial updates are modelled as patch
//! structs with one `Option` per mutable attribute: an absent field means
//! "leave unchanged", a present zero is an explicit zero.

pub mod order;
pub mod order_detail;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order, OrderPatch};
pub use order_detail::{NewOrderDetail, OrderDetail, OrderDetailPatch};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, User, UserPatch};
