//! Backend version handler

use crate::backend::FormattedVersion;
use crate::error::ApiResult;
use crate::state::SharedState;
use axum::{extract::State, Json};

/// GET /api/version (also served at /version)
pub async fn show(State(state): State<SharedState>) -> ApiResult<Json<FormattedVersion>> {
    let version = state.backend.get_formatted_version().await?;
    Ok(Json(version))
}
