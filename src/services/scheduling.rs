//! # Availability Scheduling
//!
//! The match state machine. A participant submits a full set of candidate
//! slots; the service stores it (replacing any earlier set) and, once both
//! sides have submitted, looks for the first common slot.
//!
//! The read-modify-write of a submission runs inside [`Store::update_match`],
//! which holds the match record exclusively for the duration of the closure.

use time::{Date, OffsetDateTime};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::slot_matcher::{find_first_common_slot, is_valid_slot};
use super::store::Store;
use crate::error::{AppError, AppResult};
use crate::models::{
    Availability, Match, MatchDetail, MatchStatus, MatchSummary, SubmissionOutcome, TimeSlot,
};
use crate::utils::clock;

pub struct SchedulingService;

impl SchedulingService {
    /// Submits `slots` as `user_id`'s availability for `match_id`, using today's date
    /// for the eligibility window.
    pub async fn submit_availability(
        store: &dyn Store,
        match_id: Uuid,
        user_id: Uuid,
        slots: Vec<TimeSlot>,
    ) -> AppResult<SubmissionOutcome> {
        Self::submit_availability_on(store, match_id, user_id, slots, clock::today()).await
    }

    /// Same as [`Self::submit_availability`] with an explicit `today`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] - empty submission or any slot ineligible; nothing is written
    /// - [`AppError::NotFound`] - no such match, or `user_id` is not a participant
    #[instrument(skip(store, slots), fields(slot_count = slots.len()), err)]
    pub async fn submit_availability_on(
        store: &dyn Store,
        match_id: Uuid,
        user_id: Uuid,
        slots: Vec<TimeSlot>,
        today: Date,
    ) -> AppResult<SubmissionOutcome> {
        if slots.is_empty() {
            warn!("Empty availability submission");
            return Err(AppError::Validation("At least one slot is required"));
        }

        if let Some(invalid) = slots.iter().find(|slot| !is_valid_slot(slot, today)) {
            warn!(%invalid, "Rejecting availability submission with ineligible slot");
            return Err(AppError::Validation(
                "Every slot must end after it starts and fall within the next 3 weeks",
            ));
        }

        let submitted_at = OffsetDateTime::now_utc();
        let mut outcome = None;

        store
            .update_match(match_id, &mut |m: &mut Match| {
                outcome = Some(apply_submission(m, user_id, slots.clone(), submitted_at)?);
                Ok(())
            })
            .await?;

        let outcome = outcome.ok_or(AppError::Internal)?;
        info!(status = %outcome.status, both_submitted = outcome.both_submitted, "Availability saved");
        Ok(outcome)
    }

    /// Returns the match as seen by `user_id`.
    #[instrument(skip(store), err)]
    pub async fn get_match_detail(
        store: &dyn Store,
        match_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<MatchDetail> {
        let m = store
            .find_match_for_user(match_id, user_id)
            .await?
            .ok_or(AppError::NotFound("Match not found"))?;

        MatchDetail::for_viewer(&m, user_id).ok_or(AppError::NotFound("Match not found"))
    }

    /// All matches of `user_id`, newest first.
    #[instrument(skip(store), err)]
    pub async fn list_matches(store: &dyn Store, user_id: Uuid) -> AppResult<Vec<MatchSummary>> {
        let matches = store.list_matches_for_user(user_id).await?;
        debug!(count = matches.len(), "Fetched matches for user");

        Ok(matches
            .iter()
            .filter_map(|m| MatchSummary::for_viewer(m, user_id))
            .collect())
    }
}

/// Applies one availability submission to `m`.
///
/// Slots must already be validated. The submitter's availability replaces any
/// earlier one; their slots drive the search order against the partner's stored slots.
pub fn apply_submission(
    m: &mut Match,
    user_id: Uuid,
    slots: Vec<TimeSlot>,
    submitted_at: OffsetDateTime,
) -> AppResult<SubmissionOutcome> {
    let partner_id = m
        .participants
        .partner_of(user_id)
        .ok_or(AppError::NotFound("Match not found"))?;

    let (status, scheduled_slot) = match m.availability_of(partner_id) {
        None => (MatchStatus::AvailabilityPending, None),
        Some(theirs) => match find_first_common_slot(&slots, &theirs.slots) {
            Some(common) => (MatchStatus::Scheduled, Some(common)),
            None => (MatchStatus::NoSlot, None),
        },
    };
    let both_submitted = m.has_submitted(partner_id);

    m.availabilities.insert(
        user_id,
        Availability {
            owner_id: user_id,
            slots,
            submitted_at,
        },
    );
    m.status = status;
    m.scheduled_slot = scheduled_slot.clone();
    m.updated_at = submitted_at;

    debug!(match_id = %m.id, %status, "Match state recomputed");

    Ok(SubmissionOutcome {
        status,
        scheduled_slot,
        both_submitted,
    })
}
