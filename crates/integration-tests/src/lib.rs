//! Integration tests for the merch store API.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and start the server
//! cargo run -p merch-store-cli -- migrate
//! cargo run -p merch-store-api
//!
//! # Run integration tests against it
//! cargo test -p merch-store-integration-tests -- --ignored
//! ```
//!
//! The base URL defaults to `http://localhost:3000` and can be overridden
//! with `MERCH_BASE_URL`. Tests create their own records with unique
//! usernames so they can run against a non-empty database.
