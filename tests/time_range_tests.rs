use chrono::NaiveTime;
use program_tool::TimeRange;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn plain_window_length() {
    let range = TimeRange::new(t(16, 30), t(18, 0));
    assert_eq!(range.minutes(), 90);
    assert!(!range.crosses_midnight());
}

#[test]
fn midnight_crossing_rolls_into_next_day() {
    let range = TimeRange::new(t(23, 30), t(0, 30));
    assert_eq!(range.minutes(), 60);
    assert!(range.crosses_midnight());
}

#[test]
fn equal_times_are_zero_minutes_not_a_full_day() {
    let range = TimeRange::new(t(7, 0), t(7, 0));
    assert_eq!(range.minutes(), 0);
    assert!(!range.crosses_midnight());
}

#[test]
fn one_minute_before_wrap() {
    let range = TimeRange::new(t(0, 0), t(23, 59));
    assert_eq!(range.minutes(), 23 * 60 + 59);
}
