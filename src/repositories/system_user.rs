//! System user repository

use super::{deleted, many, one, RepoResult, READ_FAILURE, WRITE_FAILURE};
use crate::backend::{endpoints, BackendClient};
use crate::config::{CollectionPolicy, TransitionMethod};
use crate::models::SystemUser;
use crate::validation::Validated;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Flag toggles on a user; each pair flips one independent flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Activate,
    Deactivate,
    Confirm,
    Unconfirm,
}

impl Transition {
    fn endpoint(self) -> &'static str {
        match self {
            Transition::Activate => endpoints::SYSTEM_USER_ACTIVATE,
            Transition::Deactivate => endpoints::SYSTEM_USER_DEACTIVATE,
            Transition::Confirm => endpoints::SYSTEM_USER_CONFIRM,
            Transition::Unconfirm => endpoints::SYSTEM_USER_UNCONFIRM,
        }
    }

    /// Past tense, for flash messages
    pub fn done(self) -> &'static str {
        match self {
            Transition::Activate => "activated",
            Transition::Deactivate => "deactivated",
            Transition::Confirm => "confirmed",
            Transition::Unconfirm => "unconfirmed",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Activate => write!(f, "activate"),
            Transition::Deactivate => write!(f, "deactivate"),
            Transition::Confirm => write!(f, "confirm"),
            Transition::Unconfirm => write!(f, "unconfirm"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SystemUserRepository {
    backend: BackendClient,
    policy: CollectionPolicy,
    transition_method: TransitionMethod,
}

impl SystemUserRepository {
    pub fn new(
        backend: BackendClient,
        policy: CollectionPolicy,
        transition_method: TransitionMethod,
    ) -> Self {
        Self {
            backend,
            policy,
            transition_method,
        }
    }

    pub async fn get_by_id(&self, user_id: &str) -> RepoResult<SystemUser> {
        let result = self.backend.fetch(&endpoints::system_user(user_id)).await;
        one(result, StatusCode::OK, READ_FAILURE)
    }

    pub async fn get_all(&self) -> RepoResult<Vec<SystemUser>> {
        let result = self.backend.fetch(endpoints::SYSTEM_USERS).await;
        many(result, self.policy)
    }

    pub async fn create(&self, data: Validated) -> RepoResult<SystemUser> {
        let result = self
            .backend
            .send(endpoints::SYSTEM_USERS, &Value::Object(data))
            .await;
        one(result, StatusCode::CREATED, WRITE_FAILURE)
    }

    pub async fn update(&self, user_id: &str, data: Validated) -> RepoResult<SystemUser> {
        let result = self
            .backend
            .put(&endpoints::system_user(user_id), &Value::Object(data))
            .await;
        one(result, StatusCode::OK, WRITE_FAILURE)
    }

    pub async fn delete(&self, user_id: &str) -> RepoResult<SystemUser> {
        let result = self.backend.delete(&endpoints::system_user(user_id)).await;
        deleted(result)
    }

    pub async fn activate(&self, user_id: &str) -> RepoResult<SystemUser> {
        self.transition(Transition::Activate, user_id).await
    }

    pub async fn deactivate(&self, user_id: &str) -> RepoResult<SystemUser> {
        self.transition(Transition::Deactivate, user_id).await
    }

    pub async fn confirm(&self, user_id: &str) -> RepoResult<SystemUser> {
        self.transition(Transition::Confirm, user_id).await
    }

    pub async fn unconfirm(&self, user_id: &str) -> RepoResult<SystemUser> {
        self.transition(Transition::Unconfirm, user_id).await
    }

    /// Bodiless flag toggle; the verb is whatever the backend was configured with
    pub async fn transition(&self, transition: Transition, user_id: &str) -> RepoResult<SystemUser> {
        let endpoint = endpoints::resolve(transition.endpoint(), &[("user_id", user_id)]);
        let body = json!({});
        let result = match self.transition_method {
            TransitionMethod::Post => self.backend.send(&endpoint, &body).await,
            TransitionMethod::Patch => self.backend.patch(&endpoint, &body).await,
        };
        one(result, StatusCode::OK, WRITE_FAILURE)
    }
}
