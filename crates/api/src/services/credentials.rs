//! Pluggable credential storage.
//!
//! The store persists whatever the active [`PasswordScheme`] produces at
//! write time and verifies reads through the same scheme. Two schemes ship:
//!
//! - [`PlaintextScheme`] (default): stores the password as supplied. This
//!   reproduces the upstream behavior and is insecure; it exists for
//!   demonstration only and should never be deployed.
//! - [`Argon2Scheme`]: Argon2id hash-at-write, verify-at-read.
//!
//! The active scheme is selected via `MERCH_PASSWORD_SCHEME`.

use std::str::FromStr;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors from credential protection or verification.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Hashing or hash-parsing failed.
    #[error("credential hashing failed: {0}")]
    Hash(String),
}

/// A reversible-or-not transformation applied to passwords before storage.
pub trait PasswordScheme: Send + Sync {
    /// Scheme identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Transform a plaintext password into its stored representation.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hash` if the transformation fails.
    fn protect(&self, plaintext: &str) -> Result<String, CredentialError>;

    /// Check a plaintext password against a stored representation.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hash` if the stored value cannot be parsed.
    fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, CredentialError>;
}

/// Which credential scheme to use, parsed from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeKind {
    /// Store passwords as supplied. Insecure; demonstration only.
    #[default]
    Plaintext,
    /// Argon2id hashing.
    Argon2,
}

impl FromStr for SchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plaintext" => Ok(Self::Plaintext),
            "argon2" => Ok(Self::Argon2),
            other => Err(format!("unknown password scheme: {other}")),
        }
    }
}

/// Build the scheme implementation for a configured kind.
#[must_use]
pub fn scheme_for(kind: SchemeKind) -> Arc<dyn PasswordScheme> {
    match kind {
        SchemeKind::Plaintext => Arc::new(PlaintextScheme),
        SchemeKind::Argon2 => Arc::new(Argon2Scheme),
    }
}

/// Stores passwords unmodified.
///
/// This mirrors the upstream system's behavior, where hashing was an
/// acknowledged gap rather than an implemented feature.
pub struct PlaintextScheme;

impl PasswordScheme for PlaintextScheme {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn protect(&self, plaintext: &str) -> Result<String, CredentialError> {
        Ok(plaintext.to_owned())
    }

    fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, CredentialError> {
        Ok(plaintext == stored)
    }
}

/// Argon2id hashing with a random salt per password.
pub struct Argon2Scheme;

impl PasswordScheme for Argon2Scheme {
    fn name(&self) -> &'static str {
        "argon2"
    }

    fn protect(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(stored).map_err(|e| CredentialError::Hash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
