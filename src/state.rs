//! Application state management
//!
//! Contains shared state accessible across all handlers. Nothing in here is
//! mutated after startup; every request reads it through an `Arc`.

use crate::backend::BackendClient;
use crate::config::BackendConfig;
use crate::repositories::{LibraryItemRepository, LibraryRepository, SystemUserRepository};
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// dmdd-core client (also used directly for version lookups)
    pub backend: BackendClient,

    pub libraries: LibraryRepository,

    pub library_items: LibraryItemRepository,

    pub system_users: SystemUserRepository,
}

impl AppState {
    /// Build the state from backend settings
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(BackendClient::new(config.api_url.clone()), config)
    }

    /// Build the state around an existing client
    pub fn with_client(backend: BackendClient, config: &BackendConfig) -> Self {
        Self {
            libraries: LibraryRepository::new(backend.clone(), config.collection_policy),
            library_items: LibraryItemRepository::new(backend.clone(), config.collection_policy),
            system_users: SystemUserRepository::new(
                backend.clone(),
                config.collection_policy,
                config.transition_method,
            ),
            backend,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
