//! # Health Check Handler
//!
//! Liveness endpoint for load balancers and deployment tooling.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Storage backend in use, `memory` or `postgres`
    pub store: String,
}

/// Always `200 OK`. Does not touch the store.
#[instrument(skip_all)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Health check endpoint accessed");
    Json(HealthResponse {
        status: "ok".to_string(),
        store: state.store.name().to_string(),
    })
}
