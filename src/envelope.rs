//! Uniform wrapper around every proxied result

use crate::repositories::{RepoResult, RepositoryError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// `{data, status_code, message}` as returned by the JSON API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub status_code: u16,
    pub message: Option<String>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            status_code: StatusCode::OK.as_u16(),
            message: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn success(data: Option<T>, status: StatusCode) -> Self {
        Self {
            data,
            status_code: status.as_u16(),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: None,
            status_code: status.as_u16(),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// HTTP status to answer with, or `default` when the stored code is not a valid status
    pub fn status_or(&self, default: StatusCode) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(default)
    }
}

impl<T> From<RepositoryError> for Envelope<T> {
    fn from(err: RepositoryError) -> Self {
        Envelope::error(err.message, err.status)
    }
}

impl<T> From<RepoResult<T>> for Envelope<T> {
    fn from(result: RepoResult<T>) -> Self {
        result.unwrap_or_else(Envelope::from)
    }
}

impl<T: Serialize> Envelope<T> {
    /// Answer with the envelope's own status, falling back to `default`
    pub fn respond(self, default: StatusCode) -> Response {
        let status = self.status_or(default);
        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        self.respond(StatusCode::OK)
    }
}
