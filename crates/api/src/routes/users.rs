//! User resource handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merch_store_core::UserId;

use super::{MessageResponse, decode_body, path_id};
use crate::db::UserRepository;
use crate::error::{ApiError, Result};
use crate::models::{NewUser, User, UserPatch};
use crate::state::AppState;

const ENTITY: &str = "User";

/// User representation in responses. The stored password is never included.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Request to create a user. All three fields are required; presence is
/// checked here so a missing field yields a 400, not an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial update for a user.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// GET /users/{id}
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<UserResponse>> {
    let id = UserId::new(path_id(id)?);

    let user = UserRepository::new(state.pool())
        .get(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?
        .ok_or(ApiError::NotFound(ENTITY))?;

    Ok(Json(user.into()))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let payload = decode_body(payload)?;

    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::Validation("missing required data".to_owned()));
    };

    let password = state
        .password_scheme()
        .protect(&password)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .create(&NewUser {
            username,
            email,
            password,
        })
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    tracing::info!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/{id}
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let id = UserId::new(path_id(id)?);
    let payload = decode_body(payload)?;

    // The password passes through the credential scheme on update too, so a
    // scheme switch never mixes representations for freshly written rows.
    let password = match payload.password {
        Some(plaintext) => Some(
            state
                .password_scheme()
                .protect(&plaintext)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
        ),
        None => None,
    };

    let patch = UserPatch {
        username: payload.username,
        email: payload.email,
        password,
    };

    let user = UserRepository::new(state.pool())
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let id = UserId::new(path_id(id)?);

    let deleted = UserRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(ENTITY, e))?;

    if !deleted {
        return Err(ApiError::NotFound(ENTITY));
    }

    Ok(Json(MessageResponse::new("User deleted")))
}
