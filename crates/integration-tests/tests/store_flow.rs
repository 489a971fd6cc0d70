//! Integration tests for the full store flow.
//!
//! These tests require:
//! - A migrated database (cargo run -p merch-store-cli -- migrate)
//! - The API server running (cargo run -p merch-store-api)
//!
//! Run with: cargo test -p merch-store-integration-tests -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("MERCH_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A username/email pair unique to this test run, so tests can rerun
/// against a database that already holds earlier runs' users.
fn unique_user() -> (String, String) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    (format!("it-user-{nanos}"), format!("it-{nanos}@example.com"))
}

async fn post_json(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}{path}", base_url()))
        .json(&body)
        .send()
        .await
        .expect("request failed");
    let status = resp.status();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore = "Requires running merch-store-api server"]
async fn test_health() {
    let client = Client::new();
    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running merch-store-api server"]
async fn test_full_purchase_flow() {
    let client = Client::new();
    let (username, email) = unique_user();

    // Create a user.
    let (status, user) = post_json(
        &client,
        "/users",
        json!({"username": username, "email": email, "password": "secret"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password").is_none());
    let user_id = user["id"].as_i64().expect("user id");

    // Create a product.
    let (status, product) = post_json(
        &client,
        "/products",
        json!({"name": "Integration Widget", "price": 10.0, "stock": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = product["id"].as_i64().expect("product id");

    // Create an order and a line item.
    let (status, order) = post_json(
        &client,
        "/orders",
        json!({"user_id": user_id, "total": 10.0}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = order["id"].as_i64().expect("order id");

    let (status, detail) = post_json(
        &client,
        "/orderdetails",
        json!({"order_id": order_id, "product_id": product_id, "quantity": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!((detail["sub_total"].as_f64().expect("sub_total") - 20.0).abs() < f64::EPSILON);
    let detail_id = detail["id"].as_i64().expect("detail id");

    // Change the quantity; the sub-total is recomputed.
    let resp = client
        .put(format!("{}/orderdetails/{detail_id}", base_url()))
        .json(&json!({"quantity": 3}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("json body");
    assert!((updated["sub_total"].as_f64().expect("sub_total") - 30.0).abs() < f64::EPSILON);

    // Clean up the line item and order; deletes confirm with a message.
    let resp = client
        .delete(format!("{}/orderdetails/{detail_id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["message"], "OrderDetail deleted");

    let resp = client
        .delete(format!("{}/orders/{order_id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running merch-store-api server"]
async fn test_validation_errors() {
    let client = Client::new();

    // Missing required field.
    let (status, body) = post_json(&client, "/users", json!({"username": "incomplete"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required data");

    // Order referencing a user that does not exist.
    let (status, body) = post_json(
        &client,
        "/orders",
        json!({"user_id": i64::MAX, "total": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid user ID");

    // Unknown id.
    let resp = client
        .get(format!("{}/users/{}", base_url(), i64::MAX))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
