//! Merch Store API - CRUD service over the four store resources.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies
//! - `SQLite` via sqlx for persistence
//! - One connection checked out of the pool per operation; no shared
//!   session across requests
//!
//! Migrations are NOT run automatically on startup. Run them explicitly via:
//! `cargo run -p merch-store-cli -- migrate`

#![cfg_attr(not(test), forbid(unsafe_code))]

use merch_store_api::config::ApiConfig;
use merch_store_api::state::AppState;
use merch_store_api::{db, routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "merch_store_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    tracing::info!(scheme = ?config.password_scheme, "credential storage scheme selected");
    if config.password_scheme == merch_store_api::services::credentials::SchemeKind::Plaintext {
        tracing::warn!("passwords are stored in plaintext; this is for demonstration only");
    }

    // Build application state and router
    let addr = config.socket_addr();
    let state = AppState::new(config, pool);
    let app = routes::app(state);

    // Start server
    tracing::info!("merch store api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
