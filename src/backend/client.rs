//! Thin HTTP client for the dmdd-core API
//!
//! One attempt per call: no retries, no backoff, and no timeout beyond the
//! `reqwest` defaults.

use crate::error::BackendError;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

/// Client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET `endpoint`
    pub async fn fetch(&self, endpoint: &str) -> Result<Value, BackendError> {
        let request = self.http.get(self.url(endpoint));
        self.execute(request, Method::GET, "fetch data from", endpoint).await
    }

    /// POST `body` to `endpoint`
    pub async fn send(&self, endpoint: &str, body: &Value) -> Result<Value, BackendError> {
        let request = self.http.post(self.url(endpoint)).json(body);
        self.execute(request, Method::POST, "send data to", endpoint).await
    }

    /// PUT `body` to `endpoint`
    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, BackendError> {
        let request = self.http.put(self.url(endpoint)).json(body);
        self.execute(request, Method::PUT, "update data to", endpoint).await
    }

    /// PATCH `body` to `endpoint`
    pub async fn patch(&self, endpoint: &str, body: &Value) -> Result<Value, BackendError> {
        let request = self.http.patch(self.url(endpoint)).json(body);
        self.execute(request, Method::PATCH, "patch data on", endpoint).await
    }

    /// DELETE `endpoint`. An empty or non-JSON success body yields `Value::Null`.
    pub async fn delete(&self, endpoint: &str) -> Result<Value, BackendError> {
        let request = self.http.delete(self.url(endpoint));
        let bytes = self
            .dispatch(request, Method::DELETE, "delete data on", endpoint)
            .await?;

        Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        method: Method,
        action: &'static str,
        endpoint: &str,
    ) -> Result<Value, BackendError> {
        let bytes = self.dispatch(request, method, action, endpoint).await?;

        serde_json::from_slice(&bytes).map_err(|source| {
            warn!("Undecodable response body from {}: {}", endpoint, source);
            BackendError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }
        })
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        method: Method,
        action: &'static str,
        endpoint: &str,
    ) -> Result<Vec<u8>, BackendError> {
        debug!("{} {}{}", method, self.base_url, endpoint);

        let transport = |source: reqwest::Error| {
            warn!("{} {} failed: {}", method, endpoint, source);
            BackendError::Transport {
                action,
                endpoint: endpoint.to_string(),
                source,
            }
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();

        if !status.is_success() {
            warn!("{} {} returned {}", method, endpoint, status);
            return Err(BackendError::Status {
                action,
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}
