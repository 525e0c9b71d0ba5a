//! Repositories over the dmdd-core API
//!
//! Each operation makes one backend call, transforms the payload and returns
//! either a success envelope or a [`RepositoryError`] carrying the status the
//! caller should answer with (404 for reads, 400 for writes).

mod library;
mod library_item;
mod system_user;

pub use library::LibraryRepository;
pub use library_item::LibraryItemRepository;
pub use system_user::{SystemUserRepository, Transition};

use crate::config::CollectionPolicy;
use crate::envelope::Envelope;
use crate::error::{BackendError, TransformError};
use crate::models::coerce::is_blank;
use crate::models::Entity;
use axum::http::StatusCode;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub(crate) const READ_FAILURE: StatusCode = StatusCode::NOT_FOUND;
pub(crate) const WRITE_FAILURE: StatusCode = StatusCode::BAD_REQUEST;

/// Failed repository call, already mapped to a response status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RepositoryError {
    pub status: StatusCode,
    pub message: String,
}

impl RepositoryError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn from_display(status: StatusCode, err: impl fmt::Display) -> Self {
        let message = err.to_string();
        warn!("Repository call failed ({}): {}", status.as_u16(), message);
        Self::new(status, message)
    }
}

/// Either a success envelope or the error to wrap into one
pub type RepoResult<T> = Result<Envelope<T>, RepositoryError>;

/// Blank payloads carry no entity
fn transform_one<T: Entity>(value: &Value) -> Result<Option<T>, TransformError> {
    if is_blank(value) {
        Ok(None)
    } else {
        T::from_value(value).map(Some)
    }
}

fn transform_many<T: Entity>(
    value: &Value,
    policy: CollectionPolicy,
) -> Result<Vec<T>, TransformError> {
    let items = value
        .as_array()
        .ok_or(TransformError::NotAList { entity: T::NAME })?;

    let mut entities = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match transform_one::<T>(item) {
            Ok(Some(entity)) => entities.push(entity),
            Ok(None) => {}
            Err(e) if policy == CollectionPolicy::Skip => {
                warn!("Skipping {} #{}: {}", T::NAME, index, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(entities)
}

/// Single-entity outcome
pub(crate) fn one<T: Entity>(
    result: Result<Value, BackendError>,
    success: StatusCode,
    failure: StatusCode,
) -> RepoResult<T> {
    let value = result.map_err(|e| RepositoryError::from_display(failure, e))?;
    let entity = transform_one::<T>(&value).map_err(|e| RepositoryError::from_display(failure, e))?;
    Ok(Envelope::success(entity, success))
}

/// Collection outcome; reads only
pub(crate) fn many<T: Entity>(
    result: Result<Value, BackendError>,
    policy: CollectionPolicy,
) -> RepoResult<Vec<T>> {
    let value = result.map_err(|e| RepositoryError::from_display(READ_FAILURE, e))?;
    let entities =
        transform_many::<T>(&value, policy).map_err(|e| RepositoryError::from_display(READ_FAILURE, e))?;
    Ok(Envelope::success(Some(entities), StatusCode::OK))
}

/// Delete outcome: the body is ignored and data is always null
pub(crate) fn deleted<T>(result: Result<Value, BackendError>) -> RepoResult<T> {
    result.map_err(|e| RepositoryError::from_display(WRITE_FAILURE, e))?;
    Ok(Envelope::success(None, StatusCode::NO_CONTENT))
}
