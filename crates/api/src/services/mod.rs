//! Application services.

pub mod credentials;

pub use credentials::{CredentialError, PasswordScheme, scheme_for};
