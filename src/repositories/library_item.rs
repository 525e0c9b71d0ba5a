//! Library item repository; every call is scoped by library id

use super::{deleted, many, one, RepoResult, READ_FAILURE, WRITE_FAILURE};
use crate::backend::{endpoints, BackendClient};
use crate::config::CollectionPolicy;
use crate::models::LibraryItem;
use crate::validation::Validated;
use axum::http::StatusCode;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct LibraryItemRepository {
    backend: BackendClient,
    policy: CollectionPolicy,
}

impl LibraryItemRepository {
    pub fn new(backend: BackendClient, policy: CollectionPolicy) -> Self {
        Self { backend, policy }
    }

    pub async fn get_by_id(&self, library_id: &str, item_id: &str) -> RepoResult<LibraryItem> {
        let result = self
            .backend
            .fetch(&endpoints::library_item(library_id, item_id))
            .await;
        one(result, StatusCode::OK, READ_FAILURE)
    }

    pub async fn get_all(&self, library_id: &str) -> RepoResult<Vec<LibraryItem>> {
        let result = self
            .backend
            .fetch(&endpoints::library_items(library_id))
            .await;
        many(result, self.policy)
    }

    pub async fn create(&self, library_id: &str, data: Validated) -> RepoResult<LibraryItem> {
        let result = self
            .backend
            .send(&endpoints::library_items(library_id), &Value::Object(data))
            .await;
        one(result, StatusCode::CREATED, WRITE_FAILURE)
    }

    pub async fn update(
        &self,
        library_id: &str,
        item_id: &str,
        data: Validated,
    ) -> RepoResult<LibraryItem> {
        let result = self
            .backend
            .put(
                &endpoints::library_item(library_id, item_id),
                &Value::Object(data),
            )
            .await;
        one(result, StatusCode::OK, WRITE_FAILURE)
    }

    pub async fn delete(&self, library_id: &str, item_id: &str) -> RepoResult<LibraryItem> {
        let result = self
            .backend
            .delete(&endpoints::library_item(library_id, item_id))
            .await;
        deleted(result)
    }
}
