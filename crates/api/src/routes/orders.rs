//! Order resource handlers.
//!
//! An order's `total` is taken as given from the caller; the service never
//! recomputes it from the order's line items.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merch_store_core::{OrderId, UserId};

use super::{MessageResponse, decode_body, path_id};
use crate::db::OrderRepository;
use crate::error::{ApiError, Result};
use crate::models::{NewOrder, Order, OrderPatch};
use crate::state::AppState;

const ENTITY: &str = "Order";

/// Order representation in responses.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total: order.total,
            created_at: order.created_at,
        }
    }
}

/// Request to create an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: Option<i64>,
    pub total: Option<f64>,
}

/// Partial update for an order.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub total: Option<f64>,
}

/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderResponse>> {
    let id = OrderId::new(path_id(id)?);

    let order = OrderRepository::new(state.pool())
        .get(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?
        .ok_or(ApiError::NotFound(ENTITY))?;

    Ok(Json(order.into()))
}

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let payload = decode_body(payload)?;

    let (Some(user_id), Some(total)) = (payload.user_id, payload.total) else {
        return Err(ApiError::Validation("missing required data".to_owned()));
    };

    let order = OrderRepository::new(state.pool())
        .create(&NewOrder {
            user_id: UserId::new(user_id),
            total,
        })
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    tracing::info!(order_id = %order.id, user_id = %order.user_id, "order created");

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// PUT /orders/{id}
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>> {
    let id = OrderId::new(path_id(id)?);
    let payload = decode_body(payload)?;

    let patch = OrderPatch {
        total: payload.total,
    };

    let order = OrderRepository::new(state.pool())
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    Ok(Json(order.into()))
}

/// DELETE /orders/{id}
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let id = OrderId::new(path_id(id)?);

    let deleted = OrderRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    if !deleted {
        return Err(ApiError::NotFound(ENTITY));
    }

    Ok(Json(MessageResponse::new("Order deleted")))
}
