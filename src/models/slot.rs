//! # Time Slot Types
//!
//! A [`TimeSlot`] is one candidate interval on a single calendar day. On the
//! wire it is `{"date": "YYYY-MM-DD", "startTime": "HH:MM", "endTime": "HH:MM"}`;
//! internally the date is a [`time::Date`] and both clock values are minutes
//! since midnight, so formatting a parsed slot reproduces the input bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::utils::validator::{DATE_REGEX, TIME_REGEX};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// `HH:MM`, zero-padded, 24-hour clock.
const CLOCK_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// A wall-clock time of day with minute precision, `00:00` through `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("time of day must be HH:MM between 00:00 and 23:59")]
pub struct ParseTimeOfDayError;

impl TimeOfDay {
    /// Returns `None` if `minutes` does not fall inside a single day.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = Time::parse(s, CLOCK_FORMAT).map_err(|_| ParseTimeOfDayError)?;
        Self::from_hm(time.hour(), time.minute()).ok_or(ParseTimeOfDayError)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// `YYYY-MM-DD` (de)serialization for [`Date`].
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    pub const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn parse(raw: &str) -> Result<Date, time::error::Parse> {
        Date::parse(raw, FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}

/// A single candidate interval `[start_time, end_time)` on `date`.
///
/// The type guarantees well-formed clock values and a real calendar date.
/// Whether the interval is non-empty and inside the scheduling window is the
/// job of [`crate::services::slot_matcher::is_valid_slot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    pub fn new(date: Date, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }

    /// Parses the three wire strings of a slot.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> AppResult<Self> {
        let date = calendar_date::parse(date)
            .map_err(|_| AppError::Validation("Slot date must be a real YYYY-MM-DD date"))?;
        let start_time = start_time
            .parse()
            .map_err(|_| AppError::Validation("Slot start time must be HH:MM"))?;
        let end_time = end_time
            .parse()
            .map_err(|_| AppError::Validation("Slot end time must be HH:MM"))?;

        Ok(Self::new(date, start_time, end_time))
    }

    /// The common sub-interval of two slots, if they share a date and the
    /// intersection has positive length. Touching endpoints do not overlap.
    pub fn overlap(&self, other: &TimeSlot) -> Option<TimeSlot> {
        if self.date != other.date {
            return None;
        }

        let start = self.start_time.max(other.start_time);
        let end = self.end_time.min(other.end_time);

        (start < end).then(|| TimeSlot::new(self.date, start, end))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date.format(calendar_date::FORMAT) {
            Ok(date) => write!(f, "{date} {}-{}", self.start_time, self.end_time),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// One slot as it arrives in a request body, before parsing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SlotPayload {
    #[validate(regex(path = *DATE_REGEX))]
    pub date: String,
    #[validate(regex(path = *TIME_REGEX))]
    pub start_time: String,
    #[validate(regex(path = *TIME_REGEX))]
    pub end_time: String,
}

impl TryFrom<&SlotPayload> for TimeSlot {
    type Error = AppError;

    fn try_from(payload: &SlotPayload) -> AppResult<Self> {
        TimeSlot::parse(&payload.date, &payload.start_time, &payload.end_time)
    }
}

/// Request payload for `POST /api/matches/{match_id}/availability`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub slots: Vec<SlotPayload>,
}

impl AvailabilityRequest {
    /// Checks the payload shape and parses every slot.
    ///
    /// Fails as a whole on the first malformed slot.
    pub fn into_slots(self) -> AppResult<Vec<TimeSlot>> {
        self.validate()
            .map_err(|_| AppError::Validation("Provide 1 to 100 slots as YYYY-MM-DD and HH:MM"))?;
        self.slots.iter().map(TimeSlot::try_from).collect()
    }
}
