//! Error type for HTTP handlers and its mapping onto status codes.

use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::data_access::DataAccessError;
use crate::patch::PatchError;
use crate::sticker::ValidationError;

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Requested resource does not exist.
    NotFound(String),
    /// Uniqueness key already taken.
    Conflict(String),
    /// Malformed or invalid client input.
    BadRequest(String),
    /// The server is shutting down and abandoned the operation.
    Cancelled(String),
    /// Anything else.
    Internal(String),
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Conflict(msg) => write!(f, "{}", msg),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::Cancelled(msg) => write!(f, "{}", msg),
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DataAccessError> for ApiError {
    fn from(err: DataAccessError) -> Self {
        match err {
            DataAccessError::Cancelled { .. } => ApiError::Cancelled(err.to_string()),
            DataAccessError::InvalidArgument(_) => ApiError::BadRequest(err.to_string()),
            DataAccessError::DuplicateId { .. }
            | DataAccessError::IdentifiersExhausted { .. }
            | DataAccessError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<PatchError> for ApiError {
    fn from(err: PatchError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
