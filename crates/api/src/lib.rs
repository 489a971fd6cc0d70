//! Merch Store API library.
//!
//! This crate provides the HTTP service as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires configuration, the
//! connection pool, and the router together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
