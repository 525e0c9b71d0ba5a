//! Library item API handlers

use super::validated;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::state::SharedState;
use crate::validation::{LIBRARY_ITEM_CREATE, LIBRARY_ITEM_UPDATE};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::Value;
use tracing::debug;

/// GET /api/libraries/{library_id}/items
pub async fn index(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
) -> Response {
    debug!("Listing items of library {}", library_id);
    Envelope::from(state.library_items.get_all(&library_id).await).respond(StatusCode::OK)
}

/// POST /api/libraries/{library_id}/items
pub async fn store(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let data = validated(payload, LIBRARY_ITEM_CREATE)?;
    debug!("Creating item in library {}", library_id);

    let result = state.library_items.create(&library_id, data).await;
    Ok(Envelope::from(result).respond(StatusCode::CREATED))
}

/// GET /api/libraries/{library_id}/items/{item_id}
pub async fn show(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
) -> Response {
    let result = state.library_items.get_by_id(&library_id, &item_id).await;
    Envelope::from(result).respond(StatusCode::OK)
}

/// PUT /api/libraries/{library_id}/items/{item_id}
pub async fn update(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let data = validated(payload, LIBRARY_ITEM_UPDATE)?;
    debug!("Updating item {} in library {}", item_id, library_id);

    let result = state.library_items.update(&library_id, &item_id, data).await;
    Ok(Envelope::from(result).respond(StatusCode::OK))
}

/// DELETE /api/libraries/{library_id}/items/{item_id}
pub async fn destroy(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
) -> Response {
    debug!("Deleting item {} in library {}", item_id, library_id);
    let result = state.library_items.delete(&library_id, &item_id).await;
    Envelope::from(result).respond(StatusCode::NO_CONTENT)
}
