//! HTTP route handlers for the store resources.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies the store)
//!
//! # Users
//! GET    /users/{id}           - Fetch a user (password never included)
//! POST   /users                - Create a user
//! PUT    /users/{id}           - Partial update
//! DELETE /users/{id}           - Hard delete
//!
//! # Products
//! GET    /products/{id}
//! POST   /products
//! PUT    /products/{id}
//! DELETE /products/{id}
//!
//! # Orders
//! GET    /orders/{id}
//! POST   /orders               - Requires an existing user
//! PUT    /orders/{id}          - Changes total only when supplied
//! DELETE /orders/{id}
//!
//! # Order line items
//! GET    /orderdetails/{id}
//! POST   /orderdetails         - Requires an existing order and product;
//!                                computes sub_total server-side
//! PUT    /orderdetails/{id}    - Quantity change recomputes sub_total
//! DELETE /orderdetails/{id}
//! ```
//!
//! Every response is JSON. Malformed path identifiers and malformed or
//! missing JSON bodies are mapped to 400 here rather than left to the
//! extractors' defaults.

pub mod order_details;
pub mod orders;
pub mod products;
pub mod users;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Success confirmation body for delete operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Extract a numeric identifier from the path, mapping malformed values to
/// a client error instead of the extractor's default rejection.
fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::Validation("invalid id in path".to_owned()))
}

/// Unwrap a JSON body, mapping decode failures (or a missing body) to a
/// client error.
fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Fallback for unrecognized resource paths.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "resource not found" })),
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route(
            "/{id}",
            get(users::show).put(users::update).delete(users::remove),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route(
            "/{id}",
            get(orders::show).put(orders::update).delete(orders::remove),
        )
}

fn order_detail_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(order_details::create))
        .route(
            "/{id}",
            get(order_details::show)
                .put(order_details::update)
                .delete(order_details::remove),
        )
}

/// Create all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/orderdetails", order_detail_routes())
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
