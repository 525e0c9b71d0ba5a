//! Route definitions and router setup
//!
//! Configures the JSON API, the HTML pages and middleware.

pub mod api;
pub mod gui;

use crate::config::Settings;
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    http::{header, Method, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Version
        .route("/api/version", get(api::version::show))
        .route("/version", get(api::version::show))

        // Library API
        .route("/api/libraries", get(api::library::index).post(api::library::store))
        .route(
            "/api/libraries/{library_id}",
            get(api::library::show)
                .put(api::library::update)
                .delete(api::library::destroy),
        )

        // Library item API
        .route(
            "/api/libraries/{library_id}/items",
            get(api::library_item::index).post(api::library_item::store),
        )
        .route(
            "/api/libraries/{library_id}/items/{item_id}",
            get(api::library_item::show)
                .put(api::library_item::update)
                .delete(api::library_item::destroy),
        )

        // System user API
        .route(
            "/api/system/users",
            get(api::system_user::index).post(api::system_user::store),
        )
        .route(
            "/api/system/users/{user_id}",
            get(api::system_user::show)
                .put(api::system_user::update)
                .delete(api::system_user::destroy),
        )
        .route("/api/system/users/{user_id}/activate", post(api::system_user::activate))
        .route("/api/system/users/{user_id}/deactivate", post(api::system_user::deactivate))
        .route("/api/system/users/{user_id}/confirm", post(api::system_user::confirm))
        .route("/api/system/users/{user_id}/unconfirm", post(api::system_user::unconfirm))

        // Library pages
        .route("/", get(|| async { Redirect::to("/libraries") }))
        .route("/libraries", get(gui::library::index).post(gui::library::store))
        .route("/libraries/create", get(gui::library::create))
        .route("/libraries/{library_id}", get(gui::library::show))
        .route("/libraries/{library_id}/edit", get(gui::library::edit))
        .route("/libraries/{library_id}/update", post(gui::library::update))
        .route("/libraries/{library_id}/delete", post(gui::library::destroy))

        // Library item pages
        .route(
            "/libraries/{library_id}/items",
            get(gui::library_item::index).post(gui::library_item::store),
        )
        .route("/libraries/{library_id}/items/create", get(gui::library_item::create))
        .route("/libraries/{library_id}/items/{item_id}", get(gui::library_item::show))
        .route("/libraries/{library_id}/items/{item_id}/edit", get(gui::library_item::edit))
        .route("/libraries/{library_id}/items/{item_id}/update", post(gui::library_item::update))
        .route("/libraries/{library_id}/items/{item_id}/delete", post(gui::library_item::destroy))

        // User pages
        .route("/users", get(gui::system_user::index).post(gui::system_user::store))
        .route("/users/create", get(gui::system_user::create))
        .route("/users/{user_id}", get(gui::system_user::show))
        .route("/users/{user_id}/edit", get(gui::system_user::edit))
        .route("/users/{user_id}/update", post(gui::system_user::update))
        .route("/users/{user_id}/delete", post(gui::system_user::destroy))
        .route("/users/{user_id}/activate", post(gui::system_user::activate))
        .route("/users/{user_id}/deactivate", post(gui::system_user::deactivate))
        .route("/users/{user_id}/confirm", post(gui::system_user::confirm))
        .route("/users/{user_id}/unconfirm", post(gui::system_user::unconfirm))

        .fallback(not_found)

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    }
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Server is running fine.",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// JSON 404 under /api, HTML page everywhere else
async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        AppError::NotFound("Route not found".to_string()).into_response()
    } else {
        gui::NotFoundPage.into_response()
    }
}
