//! Library repository

use super::{deleted, many, one, RepoResult, READ_FAILURE, WRITE_FAILURE};
use crate::backend::{endpoints, BackendClient};
use crate::config::CollectionPolicy;
use crate::models::Library;
use crate::validation::Validated;
use axum::http::StatusCode;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct LibraryRepository {
    backend: BackendClient,
    policy: CollectionPolicy,
}

impl LibraryRepository {
    pub fn new(backend: BackendClient, policy: CollectionPolicy) -> Self {
        Self { backend, policy }
    }

    pub async fn get_by_id(&self, library_id: &str) -> RepoResult<Library> {
        let result = self.backend.fetch(&endpoints::library(library_id)).await;
        one(result, StatusCode::OK, READ_FAILURE)
    }

    pub async fn get_all(&self) -> RepoResult<Vec<Library>> {
        let result = self.backend.fetch(endpoints::LIBRARIES).await;
        many(result, self.policy)
    }

    pub async fn create(&self, data: Validated) -> RepoResult<Library> {
        let result = self
            .backend
            .send(endpoints::LIBRARIES, &Value::Object(data))
            .await;
        one(result, StatusCode::CREATED, WRITE_FAILURE)
    }

    pub async fn update(&self, library_id: &str, data: Validated) -> RepoResult<Library> {
        let result = self
            .backend
            .put(&endpoints::library(library_id), &Value::Object(data))
            .await;
        one(result, StatusCode::OK, WRITE_FAILURE)
    }

    pub async fn delete(&self, library_id: &str) -> RepoResult<Library> {
        let result = self.backend.delete(&endpoints::library(library_id)).await;
        deleted(result)
    }
}
