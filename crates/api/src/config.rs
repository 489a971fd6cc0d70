//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MERCH_DATABASE_URL` - `SQLite` connection string (e.g.
//!   `sqlite://merch_store.db`); falls back to `DATABASE_URL`
//!
//! ## Optional
//! - `MERCH_HOST` - Bind address (default: 127.0.0.1)
//! - `MERCH_PORT` - Listen port (default: 3000)
//! - `MERCH_PASSWORD_SCHEME` - Credential storage scheme, `plaintext` or
//!   `argon2` (default: plaintext — insecure, demonstration only)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use crate::services::credentials::SchemeKind;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Credential storage scheme for user passwords
    pub password_scheme: SchemeKind,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("MERCH_DATABASE_URL")?;
        let host = get_env_or_default("MERCH_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MERCH_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("MERCH_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MERCH_PORT".to_owned(), e.to_string()))?;
        let password_scheme = get_env_or_default("MERCH_PASSWORD_SCHEME", "plaintext")
            .parse::<SchemeKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("MERCH_PASSWORD_SCHEME".to_owned(), e))?;

        Ok(Self {
            database_url,
            host,
            port,
            password_scheme,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            password_scheme: SchemeKind::Plaintext,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_default_scheme_is_plaintext() {
        assert_eq!(SchemeKind::default(), SchemeKind::Plaintext);
    }
}
