//! Order line-item resource handlers.
//!
//! The only derived field in the system lives here: `sub_total` is computed
//! server-side from the product's current price and never trusted from the
//! caller (unlike `Order.total`).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use merch_store_core::{OrderDetailId, OrderId, ProductId};

use super::{MessageResponse, decode_body, path_id};
use crate::db::OrderDetailRepository;
use crate::error::{ApiError, Result};
use crate::models::{NewOrderDetail, OrderDetail, OrderDetailPatch};
use crate::state::AppState;

const ENTITY: &str = "OrderDetail";

/// Line-item representation in responses.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub id: OrderDetailId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub sub_total: f64,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            id: detail.id,
            order_id: detail.order_id,
            product_id: detail.product_id,
            quantity: detail.quantity,
            sub_total: detail.sub_total,
        }
    }
}

/// Request to create a line item. `sub_total` is not accepted from callers.
#[derive(Debug, Deserialize)]
pub struct CreateOrderDetailRequest {
    pub order_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
}

/// Partial update for a line item.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderDetailRequest {
    pub quantity: Option<i64>,
}

/// GET /orderdetails/{id}
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderDetailResponse>> {
    let id = OrderDetailId::new(path_id(id)?);

    let detail = OrderDetailRepository::new(state.pool())
        .get(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?
        .ok_or(ApiError::NotFound(ENTITY))?;

    Ok(Json(detail.into()))
}

/// POST /orderdetails
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderDetailRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderDetailResponse>)> {
    let payload = decode_body(payload)?;

    let (Some(order_id), Some(product_id), Some(quantity)) =
        (payload.order_id, payload.product_id, payload.quantity)
    else {
        return Err(ApiError::Validation("missing required data".to_owned()));
    };

    let detail = OrderDetailRepository::new(state.pool())
        .create(&NewOrderDetail {
            order_id: OrderId::new(order_id),
            product_id: ProductId::new(product_id),
            quantity,
        })
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    tracing::info!(
        order_detail_id = %detail.id,
        order_id = %detail.order_id,
        "order line item created"
    );

    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// PUT /orderdetails/{id}
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateOrderDetailRequest>, JsonRejection>,
) -> Result<Json<OrderDetailResponse>> {
    let id = OrderDetailId::new(path_id(id)?);
    let payload = decode_body(payload)?;

    let patch = OrderDetailPatch {
        quantity: payload.quantity,
    };

    let detail = OrderDetailRepository::new(state.pool())
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    Ok(Json(detail.into()))
}

/// DELETE /orderdetails/{id}
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let id = OrderDetailId::new(path_id(id)?);

    let deleted = OrderDetailRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    if !deleted {
        return Err(ApiError::NotFound(ENTITY));
    }

    Ok(Json(MessageResponse::new("OrderDetail deleted")))
}
