//! Product resource handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merch_store_core::ProductId;

use super::{MessageResponse, decode_body, path_id};
use crate::db::ProductRepository;
use crate::error::{ApiError, Result};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

const ENTITY: &str = "Product";

/// Product representation in responses.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at,
        }
    }
}

/// Request to create a product. Name, price and stock are required;
/// description defaults to empty. Numeric ranges are not validated.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

/// Partial update for a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

/// GET /products/{id}
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductResponse>> {
    let id = ProductId::new(path_id(id)?);

    let product = ProductRepository::new(state.pool())
        .get(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?
        .ok_or(ApiError::NotFound(ENTITY))?;

    Ok(Json(product.into()))
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let payload = decode_body(payload)?;

    let (Some(name), Some(price), Some(stock)) = (payload.name, payload.price, payload.stock)
    else {
        return Err(ApiError::Validation("missing required data".to_owned()));
    };

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name,
            description: payload.description.unwrap_or_default(),
            price,
            stock,
        })
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /products/{id}
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>> {
    let id = ProductId::new(path_id(id)?);
    let payload = decode_body(payload)?;

    let patch = ProductPatch {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
    };

    let product = ProductRepository::new(state.pool())
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    Ok(Json(product.into()))
}

/// DELETE /products/{id}
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let id = ProductId::new(path_id(id)?);

    let deleted = ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    if !deleted {
        return Err(ApiError::NotFound(ENTITY));
    }

    Ok(Json(MessageResponse::new("Product deleted")))
}
