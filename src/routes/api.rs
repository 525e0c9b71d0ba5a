//! JSON API controllers
//!
//! Handlers validate the body, call one repository operation and answer with the
//! resulting envelope.

pub mod library;
pub mod library_item;
pub mod system_user;
pub mod version;

use crate::error::{ApiResult, AppError};
use crate::validation::{validate, FieldErrors, FieldRule, Validated};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use tracing::debug;

/// Validate a JSON body; malformed JSON is reported against the `body` field
pub(crate) fn validated(
    payload: Result<Json<Value>, JsonRejection>,
    rules: &[FieldRule],
) -> ApiResult<Validated> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let mut errors = FieldErrors::default();
            errors.add("body", rejection.body_text());
            return Err(AppError::Validation(errors));
        }
    };

    validate(&input, rules).map_err(|errors| {
        debug!("Rejected request body: {:?}", errors);
        AppError::Validation(errors)
    })
}
