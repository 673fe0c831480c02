//! # Text Input Validation Utilities
//!
//! Regex patterns for the fixed-width wire formats of availability slots.
//! They only check shape; calendar and clock ranges are checked when the
//! strings are parsed into [`crate::models::TimeSlot`].

use std::sync::LazyLock;

use regex::Regex;

/// `YYYY-MM-DD`
///
/// # Examples
///
/// - `2025-01-10` ✓ Valid
/// - `2025-1-10` ✗ Invalid (not zero-padded)
/// - `2025/01/10` ✗ Invalid separator
pub static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Failed to compile date regex"));

/// `HH:MM`, 24-hour clock
///
/// # Examples
///
/// - `09:30` ✓ Valid
/// - `9:30` ✗ Invalid (not zero-padded)
pub static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("Failed to compile time regex"));
