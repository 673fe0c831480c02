use time::{Date, OffsetDateTime};
use tracing::trace;

/// The server's current calendar date.
///
/// Uses the local offset when the platform can report it and falls back to UTC.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|e| {
            trace!(error = %e, "Local offset unavailable, using UTC");
            OffsetDateTime::now_utc()
        })
        .date()
}
