//! Error handling module
//!
//! Provides unified error types for the backend client, the entity transformers
//! and the HTTP handlers.

use crate::validation::FieldErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failure talking to the dmdd-core backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to {action} API: {endpoint}")]
    Status {
        action: &'static str,
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to {action} API: {endpoint} ({source})")]
    Transport {
        action: &'static str,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON returned by API: {endpoint} ({source})")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid version payload: {0}")]
    InvalidVersion(String),
}

/// Raw backend JSON could not be shaped into an entity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Expected a JSON object for {entity}")]
    NotAnObject { entity: &'static str },

    #[error("Field '{field}' of {entity} must be {expected}")]
    MalformedField {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Expected a JSON array of {entity} records")]
    NotAList { entity: &'static str },
}

/// Application-wide error type for handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Version lookup failed: {0}")]
    Version(#[from] BackendError),
}

/// Field-level validation failure body
#[derive(Serialize)]
pub struct ValidationErrorResponse<'a> {
    pub status: &'static str,
    pub errors: &'a FieldErrors,
}

/// Generic error body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    status: "error",
                    errors,
                }),
            )
                .into_response(),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse { error: msg.clone() }),
            )
                .into_response(),
            AppError::Version(e) => {
                error!("Version lookup failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_endpoint() {
        let err = BackendError::Status {
            action: "fetch data from",
            endpoint: "/api/libraries/x".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "Failed to fetch data from API: /api/libraries/x");
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let mut errors = FieldErrors::default();
        errors.add("name", "The name field is required.");
        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_version_error_is_internal() {
        let response =
            AppError::Version(BackendError::InvalidVersion("1.2".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
