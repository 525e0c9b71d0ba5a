//! System user API handlers

use super::validated;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::repositories::Transition;
use crate::state::SharedState;
use crate::validation::{SYSTEM_USER_CREATE, SYSTEM_USER_UPDATE};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::Value;
use tracing::debug;

/// GET /api/system/users
pub async fn index(State(state): State<SharedState>) -> Response {
    Envelope::from(state.system_users.get_all().await).respond(StatusCode::OK)
}

/// POST /api/system/users
pub async fn store(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let data = validated(payload, SYSTEM_USER_CREATE)?;
    debug!("Creating system user");

    Ok(Envelope::from(state.system_users.create(data).await).respond(StatusCode::CREATED))
}

/// GET /api/system/users/{user_id}
pub async fn show(State(state): State<SharedState>, Path(user_id): Path<String>) -> Response {
    Envelope::from(state.system_users.get_by_id(&user_id).await).respond(StatusCode::OK)
}

/// PUT /api/system/users/{user_id}
pub async fn update(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let data = validated(payload, SYSTEM_USER_UPDATE)?;
    debug!("Updating system user {}", user_id);

    Ok(Envelope::from(state.system_users.update(&user_id, data).await).respond(StatusCode::OK))
}

/// DELETE /api/system/users/{user_id}
pub async fn destroy(State(state): State<SharedState>, Path(user_id): Path<String>) -> Response {
    debug!("Deleting system user {}", user_id);
    Envelope::from(state.system_users.delete(&user_id).await).respond(StatusCode::NO_CONTENT)
}

/// POST /api/system/users/{user_id}/activate
pub async fn activate(state: State<SharedState>, user_id: Path<String>) -> Response {
    transition(state, user_id, Transition::Activate).await
}

/// POST /api/system/users/{user_id}/deactivate
pub async fn deactivate(state: State<SharedState>, user_id: Path<String>) -> Response {
    transition(state, user_id, Transition::Deactivate).await
}

/// POST /api/system/users/{user_id}/confirm
pub async fn confirm(state: State<SharedState>, user_id: Path<String>) -> Response {
    transition(state, user_id, Transition::Confirm).await
}

/// POST /api/system/users/{user_id}/unconfirm
pub async fn unconfirm(state: State<SharedState>, user_id: Path<String>) -> Response {
    transition(state, user_id, Transition::Unconfirm).await
}

async fn transition(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    transition: Transition,
) -> Response {
    debug!("Applying {} to system user {}", transition, user_id);
    let result = state.system_users.transition(transition, &user_id).await;
    Envelope::from(result).respond(StatusCode::OK)
}
