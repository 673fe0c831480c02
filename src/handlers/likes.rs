//! # Like Handlers
//!
//! `POST /api/likes/{user_id}` and `DELETE /api/likes/{user_id}`.
//! A like that meets an earlier like in the other direction creates a match.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::models::AppState;
use crate::services::like_graph::LikeService;

/// Like another user
///
/// POST /api/likes/{user_id}
///
/// # Returns
///
/// - `201 Created` - `{"isMatch": bool, "matchId": uuid | null}`
/// - `400 Bad Request` - Self-like or malformed id
/// - `404 Not Found` - Target user does not exist
/// - `409 Conflict` - Target already liked
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        target_id = %target_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn like_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(target_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let target_id = Uuid::try_parse(&target_id)?;

    let outcome = LikeService::like_user(state.store.as_ref(), user.user_id, target_id).await?;
    if outcome.is_match {
        info!("It's a match");
    }

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Remove a like
///
/// DELETE /api/likes/{user_id}
///
/// Always `204 No Content`, whether or not a like existed.
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        target_id = %target_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn unlike_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(target_id): Path<String>,
) -> AppResult<StatusCode> {
    let target_id = Uuid::try_parse(&target_id)?;

    LikeService::unlike_user(state.store.as_ref(), user.user_id, target_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
