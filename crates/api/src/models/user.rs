//! User domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use merch_store_core::UserId;

/// A store user as persisted.
///
/// The `password` field holds whatever the configured credential scheme
/// produced at write time (plaintext by default, see
/// [`crate::services::credentials`]). It is never serialized into responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Stored credential (scheme-dependent representation).
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already passed through the credential scheme.
    pub password: String,
}

/// Partial update for a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Already passed through the credential scheme when present.
    pub password: Option<String>,
}
