//! Shared helpers for API tests.
//!
//! Tests run against a private in-memory `SQLite` database with the real
//! schema applied. The pool is capped at one connection so every operation
//! sees the same `:memory:` database.

use std::str::FromStr;

use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use merch_store_api::config::ApiConfig;
use merch_store_api::services::credentials::SchemeKind;
use merch_store_api::state::AppState;

pub async fn test_pool() -> SqlitePool {
    // Foreign keys are enforced at the application layer only; sqlx turns
    // `PRAGMA foreign_keys` on by default, so switch it off explicitly.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connection string")
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        password_scheme: SchemeKind::Plaintext,
    }
}

pub async fn test_state() -> AppState {
    AppState::new(test_config(), test_pool().await)
}
