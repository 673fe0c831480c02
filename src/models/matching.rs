use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::TimeSlot;
use crate::error::{AppError, AppResult};

/// Scheduling state of a match.
///
/// ```text
/// matched -> availability_pending -> scheduled | no_slot
/// ```
///
/// `scheduled` and `no_slot` are not terminal: either participant may resubmit
/// and the status is recomputed from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Mutual like recorded, nobody has submitted availability yet
    Matched,
    /// Exactly one side has submitted availability
    AvailabilityPending,
    /// Both sides submitted and a common slot was found
    Scheduled,
    /// Both sides submitted but their slots never overlap
    NoSlot,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status_str = match self {
            MatchStatus::Matched => "matched",
            MatchStatus::AvailabilityPending => "availability_pending",
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::NoSlot => "no_slot",
        };
        write!(f, "{status_str}")
    }
}

/// The two participants of a match, independent of who liked whom first.
///
/// Always holds two distinct ids with `low < high`, so the same two users
/// always produce an equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserPair {
    low: Uuid,
    high: Uuid,
}

impl UserPair {
    pub fn new(a: Uuid, b: Uuid) -> AppResult<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(AppError::InvalidOperation(
                "A match needs two different users",
            )),
        }
    }

    #[inline]
    pub fn low(&self) -> Uuid {
        self.low
    }

    #[inline]
    pub fn high(&self) -> Uuid {
        self.high
    }

    #[inline]
    pub fn contains(&self, user_id: Uuid) -> bool {
        self.low == user_id || self.high == user_id
    }

    /// The other participant, or `None` if `user_id` is not part of the pair.
    pub fn partner_of(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.low {
            Some(self.high)
        } else if user_id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

/// One participant's full set of candidate slots for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub owner_id: Uuid,
    pub slots: Vec<TimeSlot>,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub participants: UserPair,
    /// Keyed by participant id; zero, one or two entries.
    pub availabilities: BTreeMap<Uuid, Availability>,
    pub scheduled_slot: Option<TimeSlot>,
    pub status: MatchStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Match {
    /// A freshly created match in the `matched` state.
    pub fn new(participants: UserPair, created_at: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            participants,
            availabilities: BTreeMap::new(),
            scheduled_slot: None,
            status: MatchStatus::Matched,
            created_at,
            updated_at: created_at,
        }
    }

    #[inline]
    pub fn availability_of(&self, user_id: Uuid) -> Option<&Availability> {
        self.availabilities.get(&user_id)
    }

    #[inline]
    pub fn has_submitted(&self, user_id: Uuid) -> bool {
        self.availabilities.contains_key(&user_id)
    }
}

/// Result of `POST /api/matches/{match_id}/availability`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub status: MatchStatus,
    pub scheduled_slot: Option<TimeSlot>,
    /// Whether the other participant had already submitted
    pub both_submitted: bool,
}

/// A match as seen by one of its participants.
///
/// Carries only the viewer's own slots; the partner's availability is reduced
/// to a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub id: Uuid,
    pub matched_user_id: Uuid,
    pub status: MatchStatus,
    pub scheduled_slot: Option<TimeSlot>,
    pub my_availability: Option<Availability>,
    pub my_availability_submitted: bool,
    pub their_availability_submitted: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Entry of `GET /api/matches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: Uuid,
    pub matched_user_id: Uuid,
    pub status: MatchStatus,
    pub scheduled_slot: Option<TimeSlot>,
    pub my_availability_submitted: bool,
    pub their_availability_submitted: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MatchDetail {
    /// Projects `m` for `viewer_id`. Returns `None` if the viewer is not a participant.
    pub fn for_viewer(m: &Match, viewer_id: Uuid) -> Option<Self> {
        let partner_id = m.participants.partner_of(viewer_id)?;
        Some(Self {
            id: m.id,
            matched_user_id: partner_id,
            status: m.status,
            scheduled_slot: m.scheduled_slot.clone(),
            my_availability: m.availability_of(viewer_id).cloned(),
            my_availability_submitted: m.has_submitted(viewer_id),
            their_availability_submitted: m.has_submitted(partner_id),
            created_at: m.created_at,
        })
    }
}

impl MatchSummary {
    pub fn for_viewer(m: &Match, viewer_id: Uuid) -> Option<Self> {
        let partner_id = m.participants.partner_of(viewer_id)?;
        Some(Self {
            id: m.id,
            matched_user_id: partner_id,
            status: m.status,
            scheduled_slot: m.scheduled_slot.clone(),
            my_availability_submitted: m.has_submitted(viewer_id),
            their_availability_submitted: m.has_submitted(partner_id),
            created_at: m.created_at,
        })
    }
}
