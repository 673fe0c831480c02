//! # Slot Validation and Matching
//!
//! Pure functions over [`TimeSlot`]s: eligibility of a single slot, and the
//! first common interval of two availability sets. No I/O happens here.

use std::collections::HashMap;

use time::{Date, Duration};
use tracing::trace;

use crate::models::TimeSlot;
use crate::utils::constant::SCHEDULING_HORIZON_DAYS;

/// Checks that `slot` is a non-empty interval dated within the scheduling window.
///
/// The window runs from `today` through `today + SCHEDULING_HORIZON_DAYS`, both inclusive.
pub fn is_valid_slot(slot: &TimeSlot, today: Date) -> bool {
    if slot.start_time >= slot.end_time {
        trace!(%slot, "Slot does not end after it starts");
        return false;
    }

    let Some(last_day) = today.checked_add(Duration::days(SCHEDULING_HORIZON_DAYS)) else {
        return false;
    };

    let in_window = today <= slot.date && slot.date <= last_day;
    if !in_window {
        trace!(%slot, %today, "Slot date outside scheduling window");
    }
    in_window
}

/// Finds the first overlapping interval between two availability sets.
///
/// `slots_a` is visited in `(date, start_time)` order; for each of its slots,
/// the slots of `slots_b` on the same date are visited in their given order.
/// The first pair with a positive-length intersection wins.
///
/// Because only `slots_a` is sorted, swapping the arguments can pick a
/// different overlap when `slots_b` lists several slots on one date.
pub fn find_first_common_slot(slots_a: &[TimeSlot], slots_b: &[TimeSlot]) -> Option<TimeSlot> {
    let mut b_by_date: HashMap<Date, Vec<&TimeSlot>> = HashMap::new();
    for slot in slots_b {
        b_by_date.entry(slot.date).or_default().push(slot);
    }

    let mut sorted_a: Vec<&TimeSlot> = slots_a.iter().collect();
    sorted_a.sort_by_key(|slot| (slot.date, slot.start_time));

    sorted_a.into_iter().find_map(|slot_a| {
        b_by_date
            .get(&slot_a.date)?
            .iter()
            .find_map(|slot_b| slot_a.overlap(slot_b))
    })
}
