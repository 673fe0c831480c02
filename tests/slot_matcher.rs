use rendezvous::models::{TimeOfDay, TimeSlot};
use rendezvous::services::slot_matcher::{find_first_common_slot, is_valid_slot};
use time::{Date, Duration, macros::date};

const TODAY: Date = date!(2025 - 01 - 08);

fn slot(date: &str, start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(date, start, end).expect("test slot should parse")
}

fn slot_on(date: Date, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(date, start.parse().unwrap(), end.parse().unwrap())
}

#[test]
fn time_of_day_parses_fixed_width_24h_clock() {
    assert_eq!("00:00".parse::<TimeOfDay>().unwrap().minutes(), 0);
    assert_eq!("09:30".parse::<TimeOfDay>().unwrap().minutes(), 570);
    assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minutes(), 1439);

    for bad in [
        "24:00", "12:60", "9:30", "09:3", "0930", "ab:cd", "09:30 ", "", "+9:30", "23:59:00",
    ] {
        assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should be rejected");
    }
}

#[test]
fn time_slot_wire_format_is_preserved() {
    let parsed = slot("2025-01-10", "09:05", "12:00");
    assert_eq!(
        serde_json::to_string(&parsed).unwrap(),
        r#"{"date":"2025-01-10","startTime":"09:05","endTime":"12:00"}"#
    );
}

#[test]
fn time_slot_rejects_impossible_dates() {
    assert!(TimeSlot::parse("2025-02-30", "09:00", "10:00").is_err());
    assert!(TimeSlot::parse("2025-13-01", "09:00", "10:00").is_err());
}

#[test]
fn slot_must_end_after_it_starts() {
    assert!(!is_valid_slot(&slot("2025-01-10", "10:00", "10:00"), TODAY));
    assert!(!is_valid_slot(&slot("2025-01-10", "11:00", "10:00"), TODAY));
    assert!(is_valid_slot(&slot("2025-01-10", "10:00", "10:01"), TODAY));
}

#[test]
fn slot_date_must_fall_in_three_week_window() {
    let yesterday = TODAY - Duration::days(1);
    let last_day = TODAY + Duration::days(21);
    let too_late = TODAY + Duration::days(22);

    assert!(!is_valid_slot(&slot_on(yesterday, "09:00", "10:00"), TODAY));
    assert!(is_valid_slot(&slot_on(TODAY, "09:00", "10:00"), TODAY));
    assert!(is_valid_slot(&slot_on(last_day, "09:00", "10:00"), TODAY));
    assert!(!is_valid_slot(&slot_on(too_late, "09:00", "10:00"), TODAY));
}

#[test]
fn slot_22_days_out_is_invalid_regardless_of_times() {
    let too_late = TODAY + Duration::days(22);
    for (start, end) in [("00:00", "23:59"), ("09:00", "10:00"), ("12:00", "12:30")] {
        assert!(!is_valid_slot(&slot_on(too_late, start, end), TODAY));
    }
}

#[test]
fn disjoint_dates_never_match() {
    let a = vec![slot("2025-01-10", "09:00", "12:00")];
    let b = vec![slot("2025-01-11", "09:00", "12:00")];
    assert_eq!(find_first_common_slot(&a, &b), None);
}

#[test]
fn empty_inputs_never_match() {
    let a = vec![slot("2025-01-10", "09:00", "12:00")];
    assert_eq!(find_first_common_slot(&a, &[]), None);
    assert_eq!(find_first_common_slot(&[], &a), None);
}

#[test]
fn overlap_is_intersection_of_both_intervals() {
    let a = vec![slot("2025-01-10", "09:00", "12:00")];
    let b = vec![slot("2025-01-10", "10:30", "13:15")];

    let common = find_first_common_slot(&a, &b).unwrap();
    assert_eq!(common, slot("2025-01-10", "10:30", "12:00"));
    assert!(common.start_time < common.end_time);
}

#[test]
fn contained_interval_is_returned_whole() {
    let a = vec![slot("2025-01-10", "09:00", "12:00")];
    let b = vec![slot("2025-01-10", "10:00", "11:00")];
    assert_eq!(
        find_first_common_slot(&a, &b),
        Some(slot("2025-01-10", "10:00", "11:00"))
    );
}

#[test]
fn touching_intervals_do_not_overlap() {
    let a = vec![slot("2025-01-10", "09:00", "10:00")];
    let b = vec![slot("2025-01-10", "10:00", "11:00")];
    assert_eq!(find_first_common_slot(&a, &b), None);
}

#[test]
fn earliest_slot_of_a_wins_regardless_of_input_order() {
    let a = vec![
        slot("2025-01-12", "09:00", "10:00"),
        slot("2025-01-11", "18:00", "20:00"),
        slot("2025-01-11", "14:00", "15:00"),
    ];
    let b = vec![
        slot("2025-01-12", "09:00", "10:00"),
        slot("2025-01-11", "18:30", "21:00"),
        slot("2025-01-11", "14:00", "15:00"),
    ];

    assert_eq!(
        find_first_common_slot(&a, &b),
        Some(slot("2025-01-11", "14:00", "15:00"))
    );
}

#[test]
fn b_side_order_decides_between_same_date_candidates() {
    let x = vec![slot("2025-01-10", "09:00", "12:00")];
    let y = vec![
        slot("2025-01-10", "11:00", "12:00"),
        slot("2025-01-10", "09:00", "10:00"),
    ];

    // X drives: Y's entries are scanned in submission order.
    assert_eq!(
        find_first_common_slot(&x, &y),
        Some(slot("2025-01-10", "11:00", "12:00"))
    );
    // Y drives: Y is sorted first, so its earlier slot wins.
    assert_eq!(
        find_first_common_slot(&y, &x),
        Some(slot("2025-01-10", "09:00", "10:00"))
    );
}
