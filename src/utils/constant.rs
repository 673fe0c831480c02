//! # Application Constants
//!
//! This module defines configuration constants used throughout the application.
//! These constants control the scheduling window, token lifetimes and server defaults.

use std::time::Duration;

/// Number of days after today that a slot may still be scheduled on
///
/// Slots dated from today through today + this many days (inclusive) are eligible.
pub const SCHEDULING_HORIZON_DAYS: i64 = 21;

/// Expiration time for JWT access tokens
///
/// Access tokens are short-lived; issuing them is the login collaborator's job.
pub const ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// Listen address used when `BIND_ADDR` is not set
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8090";

/// Upper bound on pooled PostgreSQL connections
pub const DB_MAX_CONNECTIONS: u32 = 10;
