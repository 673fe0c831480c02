//! # Rendezvous - Dating Backend Scheduling Core
//!
//! Likes, mutual matches, and scheduling a first date from both participants'
//! candidate time slots.
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for various endpoints
//! - [`middleware`] - Bearer-token authentication
//! - [`models`] - Slots, matches, likes and request/response types
//! - [`services`] - Business logic (slot matching, scheduling, like graph) and storage
//! - [`utils`] - Utility functions and constants

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppEnv, Config};
use crate::error::AppResult;
use crate::handlers::{
    get_match_detail, health_check, like_user, list_matches, submit_availability, unlike_user,
};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::services::jwt::JwtService;
use crate::services::store::{MemoryStore, PgStore, Store};

/// Opens the store selected by `config`.
///
/// Production connects to PostgreSQL and runs migrations; every other
/// environment gets a fresh [`MemoryStore`].
pub async fn build_store(config: &Config) -> AppResult<Arc<dyn Store>> {
    match (config.app_env, config.database_url.as_deref()) {
        (AppEnv::Production, Some(url)) => {
            info!("Running in production mode with [PgStore]");
            Ok(Arc::new(PgStore::connect(url).await?))
        }
        _ => {
            info!("Running in development mode with [MemoryStore]");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `store` - Storage backend shared by all requests
/// * `jwt_service` - Validates bearer tokens on protected routes
pub fn app(store: Arc<dyn Store>, jwt_service: JwtService) -> Router {
    let state = Arc::new(AppState::new(store, jwt_service));

    let protected_routes = Router::new()
        .route("/api/likes/{user_id}", post(like_user).delete(unlike_user))
        .route("/api/matches", get(list_matches))
        .route("/api/matches/{match_id}", get(get_match_detail))
        .route(
            "/api/matches/{match_id}/availability",
            post(submit_availability),
        )
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new().route("/health-check", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
