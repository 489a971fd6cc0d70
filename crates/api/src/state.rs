//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ApiConfig;
use crate::services::credentials::{self, PasswordScheme};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the connection pool, the
/// configuration, and the active credential scheme.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: SqlitePool,
    password_scheme: Arc<dyn PasswordScheme>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ApiConfig, pool: SqlitePool) -> Self {
        let password_scheme = credentials::scheme_for(config.password_scheme);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                password_scheme,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get the active credential storage scheme.
    #[must_use]
    pub fn password_scheme(&self) -> &dyn PasswordScheme {
        self.inner.password_scheme.as_ref()
    }
}
