//! # Match Handlers
//!
//! Match listing, match detail, and availability submission for the
//! authenticated participant.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, State, rejection::JsonRejection},
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{AppState, AvailabilityRequest, MatchDetail, MatchSummary, SubmissionOutcome};
use crate::services::scheduling::SchedulingService;

/// List the caller's matches, newest first
///
/// GET /api/matches
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Vec<MatchSummary>>> {
    let matches = SchedulingService::list_matches(state.store.as_ref(), user.user_id).await?;
    info!("Found {} matches for user", matches.len());
    Ok(Json(matches))
}

/// Get one match as seen by the caller
///
/// GET /api/matches/{match_id}
///
/// The partner's slots are never included, only whether they have submitted.
///
/// # Returns
///
/// - `200 OK` - [`MatchDetail`]
/// - `404 Not Found` - No such match, or the caller is not a participant
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        match_id = %match_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn get_match_detail(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> AppResult<Json<MatchDetail>> {
    let match_id = Uuid::try_parse(&match_id)?;

    let detail =
        SchedulingService::get_match_detail(state.store.as_ref(), match_id, user.user_id).await?;
    Ok(Json(detail))
}

/// Submit the caller's availability for a match
///
/// POST /api/matches/{match_id}/availability AvailabilityRequest
///
/// Replaces any earlier submission by the caller. If the partner has already
/// submitted, the first common slot is computed right away.
///
/// # Returns
///
/// - `200 OK` - [`SubmissionOutcome`]
/// - `400 Bad Request` - Malformed payload or any ineligible slot (nothing is saved)
/// - `404 Not Found` - No such match, or the caller is not a participant
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        match_id = %match_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn submit_availability(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(match_id): Path<String>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> AppResult<Json<SubmissionOutcome>> {
    let match_id = Uuid::try_parse(&match_id)?;

    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Unreadable availability payload");
        AppError::Validation("Body must be {\"slots\": [{\"date\", \"startTime\", \"endTime\"}]}")
    })?;
    let slots = request.into_slots()?;

    let outcome =
        SchedulingService::submit_availability(state.store.as_ref(), match_id, user.user_id, slots)
            .await?;

    if let Some(slot) = &outcome.scheduled_slot {
        info!(%slot, "Date scheduled");
    }
    Ok(Json(outcome))
}
