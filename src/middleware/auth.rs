//! # Authentication Middleware
//!
//! Validates the bearer access token on protected routes and hands the
//! caller's identity to handlers as an [`AuthUser`] extension.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, trace, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::AppState;
use crate::services::jwt::{Claims, JwtError};

/// Authentication middleware for protecting routes
///
/// # Authentication Flow
///
/// 1. Extracts `Authorization` header with `Bearer <token>` format
/// 2. Validates the JWT token signature and expiration
/// 3. Parses user ID from the `sub` claim
/// 4. Adds [`AuthUser`] to request extensions for handler access
///
/// Any failure short-circuits with `401 Unauthorized` and a JSON message.
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
    )
)]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header");
            AppError::Unauthorized("Missing access token")
        })?
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            warn!("Invalid Authorization header format");
            AppError::Unauthorized("Expected a Bearer token")
        })?;
    trace!("Extracted bearer token from Authorization header");

    let claims = state
        .jwt_service
        .validate_access_token(token)
        .map_err(|e| {
            warn!(error = %e, "Token validation failed");
            match e {
                JwtError::TokenExpired => AppError::Unauthorized("Access token expired"),
                _ => AppError::Unauthorized("Invalid access token"),
            }
        })?;

    let user_id = Uuid::try_parse(&claims.sub).map_err(|e| {
        warn!(error = %e, "Token subject is not a user id");
        AppError::Unauthorized("Invalid access token")
    })?;

    debug!(%user_id, "Authentication successful");
    req.extensions_mut().insert(AuthUser { user_id, claims });

    Ok(next.run(req).await)
}

/// Authenticated user information available to handlers
///
/// # Usage in Handlers
///
/// ```rust
/// use axum::{extract::Extension, response::IntoResponse};
/// use rendezvous::middleware::AuthUser;
/// async fn protected_handler(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
///     format!("Hello user: {}", user.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Unique identifier for the authenticated user
    pub user_id: Uuid,
    /// JWT claims containing additional token metadata
    pub claims: Claims,
}
