//! Unified error handling for the API.
//!
//! Provides the `ApiError` type returned by every route handler. Errors are
//! serialized as `{"error": "..."}` JSON bodies; internal failures are logged
//! and answered with a generic message so store internals never leak into a
//! response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Bad request: missing field, malformed identifier, dangling reference,
    /// or a store constraint violation.
    #[error("{0}")]
    Validation(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Translate a repository outcome for the given entity.
    ///
    /// Uniqueness violations are only enforced by the store; they surface
    /// here as `Conflict` and become client errors rather than raw store
    /// errors. Unresolved references become validation failures.
    pub fn from_repository(entity: &'static str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound(entity),
            RepositoryError::Conflict(msg) => Self::Validation(msg),
            RepositoryError::MissingReference(what) => {
                Self::Validation(format!("invalid {what} ID"))
            }
            RepositoryError::Database(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref details) = self {
            tracing::error!(error = %details, "request failed");
        }

        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("User");
        assert_eq!(err.to_string(), "User not found");

        let err = ApiError::Validation("missing required data".to_owned());
        assert_eq!(err.to_string(), "missing required data");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(get_status(ApiError::NotFound("Order")), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(ApiError::Validation("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_translation() {
        let err = ApiError::from_repository("User", RepositoryError::NotFound);
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);

        let err = ApiError::from_repository(
            "User",
            RepositoryError::Conflict("username or email already exists".to_owned()),
        );
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);

        let err = ApiError::from_repository(
            "OrderDetail",
            RepositoryError::MissingReference("order or product"),
        );
        assert_eq!(err.to_string(), "invalid order or product ID");
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);

        let err = ApiError::from_repository("User", RepositoryError::Database(sqlx::Error::PoolClosed));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
