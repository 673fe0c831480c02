mod like;
mod matching;
mod slot;
mod state;

pub use like::{LikeEdge, LikeResponse, User};
pub use matching::{
    Availability, Match, MatchDetail, MatchStatus, MatchSummary, SubmissionOutcome, UserPair,
};
pub use slot::{AvailabilityRequest, SlotPayload, TimeOfDay, TimeSlot, calendar_date};
pub use state::AppState;
