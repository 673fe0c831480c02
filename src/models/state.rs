use std::sync::Arc;

use tracing::info;

use crate::services::{jwt::JwtService, store::Store};

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Persistence collaborator holding users, like edges and matches.
    pub store: Arc<dyn Store>,
    /// JWT service for token generation and validation.
    pub jwt_service: JwtService,
}

impl AppState {
    /// Creates a new application state with the provided services.
    ///
    /// # Arguments
    ///
    /// * `store` - Storage backend for users, likes and matches
    /// * `jwt_service` - Service for JWT token operations
    pub fn new(store: Arc<dyn Store>, jwt_service: JwtService) -> Self {
        info!(store = store.name(), "Initializing application state");

        Self { store, jwt_service }
    }
}
