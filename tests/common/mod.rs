//! Shared helpers for integration tests

#![allow(dead_code)]

use dmdd_gui::config::{BackendConfig, Settings};
use dmdd_gui::routes::create_router;
use dmdd_gui::state::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use uuid::Uuid;
use wiremock::MockServer;

pub const OWNER_ID: &str = "0b7e2f6c-0f6e-4f3a-9d0c-3a1f6b2f8e11";

/// Fresh hyphenated v4 id, as dmdd-core hands them out
pub fn owner_id() -> String {
    Uuid::new_v4().to_string()
}

/// Running server plus a client that does not follow redirects
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn backend_config(backend: &MockServer) -> BackendConfig {
    BackendConfig {
        api_url: backend.uri(),
        ..BackendConfig::default()
    }
}

pub async fn spawn_app(backend: &MockServer) -> TestApp {
    spawn_app_with(backend_config(backend)).await
}

pub async fn spawn_app_with(backend: BackendConfig) -> TestApp {
    let settings = Settings {
        backend,
        ..Settings::default()
    };
    let state = Arc::new(AppState::new(&settings.backend));
    let app = create_router(state, &settings);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().expect("No local address"));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server crashed");
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build test client");

    TestApp { address, client }
}

pub fn library(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Lib",
        "description": "d",
        "isPublic": true,
        "ownerId": OWNER_ID
    })
}

pub fn system_user(id: &str) -> Value {
    json!({
        "id": id,
        "username": "ada",
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "isActive": false,
        "isConfirmed": true,
        "isAdmin": false
    })
}

/// `name=value` of the first Set-Cookie header for `name`
pub fn set_cookie(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}
