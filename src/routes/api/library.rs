//! Library API handlers

use super::validated;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::state::SharedState;
use crate::validation::{LIBRARY_CREATE, LIBRARY_UPDATE};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::Value;
use tracing::debug;

/// GET /api/libraries
pub async fn index(State(state): State<SharedState>) -> Response {
    debug!("Listing libraries");
    Envelope::from(state.libraries.get_all().await).respond(StatusCode::OK)
}

/// POST /api/libraries
pub async fn store(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let data = validated(payload, LIBRARY_CREATE)?;
    debug!("Creating library");

    Ok(Envelope::from(state.libraries.create(data).await).respond(StatusCode::CREATED))
}

/// GET /api/libraries/{library_id}
pub async fn show(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
) -> Response {
    debug!("Fetching library {}", library_id);
    Envelope::from(state.libraries.get_by_id(&library_id).await).respond(StatusCode::OK)
}

/// PUT /api/libraries/{library_id}
pub async fn update(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let data = validated(payload, LIBRARY_UPDATE)?;
    debug!("Updating library {}", library_id);

    Ok(Envelope::from(state.libraries.update(&library_id, data).await).respond(StatusCode::OK))
}

/// DELETE /api/libraries/{library_id}
pub async fn destroy(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
) -> Response {
    debug!("Deleting library {}", library_id);
    Envelope::from(state.libraries.delete(&library_id).await).respond(StatusCode::NO_CONTENT)
}
