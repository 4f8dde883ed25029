//! End-to-end staleness checks for the week pattern
//! `1-5|0400-0500,1430-1945,2100|3`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;

use staleweek_schedule::WeekSchedule;

const PATTERN: &str = "1-5|0400-0500,1430-1945,2100|3";

fn utc(s: &str) -> DateTime<Utc> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad timestamp {s}: {e}"));
    Utc.from_utc_datetime(&naive)
}

fn is_stale(now: &str, last_refreshed: &str) -> bool {
    let week = WeekSchedule::parse(PATTERN, utc(now)).unwrap();
    week.is_stale(&utc(last_refreshed)).unwrap()
}

// ── inside a window ─────────────────────────────────────────

#[test]
fn inside_window_within_throttle_is_fresh() {
    assert!(!is_stale("2023-05-03 14:30:00", "2023-05-03 14:30:00"));
}

#[test]
fn inside_window_beyond_throttle_is_stale() {
    assert!(is_stale("2023-05-03 14:31:00", "2023-05-03 14:30:00"));
}

#[test]
fn instant_window_counts_as_inside() {
    assert!(is_stale("2023-05-03 21:00:00", "2023-05-03 20:00:00"));
    assert!(!is_stale("2023-05-03 21:00:00", "2023-05-03 20:59:58"));
}

// ── between windows ─────────────────────────────────────────

#[test]
fn window_closed_since_last_refresh_is_stale() {
    // Refreshed Thursday, now Saturday: Thursday's and Friday's windows closed since.
    assert!(is_stale("2023-05-06 04:00:00", "2023-05-04 04:00:00"));
}

#[test]
fn refreshed_after_last_window_is_fresh() {
    assert!(!is_stale("2023-05-06 08:00:00", "2023-05-06 04:00:00"));
}

#[test]
fn weekend_carry_over_to_monday_before_first_window_is_fresh() {
    assert!(!is_stale("2023-05-08 03:59:59", "2023-05-06 04:00:00"));
}

#[test]
fn monday_first_window_opening_is_stale() {
    // 04:00 is inside the first window; the throttle has long expired.
    assert!(is_stale("2023-05-08 04:00:00", "2023-05-06 04:00:00"));
}

#[test]
fn monday_before_first_window_refreshed_before_friday_close_is_fresh() {
    // Friday's 21:00 checkpoint had not passed at refresh time, so the
    // carve-out does not apply; nothing has closed yet this week.
    assert!(!is_stale("2023-05-08 03:00:00", "2023-05-05 20:00:00"));
}

#[test]
fn between_windows_same_day() {
    assert!(is_stale("2023-05-03 10:00:00", "2023-05-03 04:59:00"));
    assert!(!is_stale("2023-05-03 10:00:00", "2023-05-03 05:00:01"));
}

#[test]
fn refresh_in_the_future_is_an_error() {
    let week = WeekSchedule::parse(PATTERN, utc("2023-05-03 10:00:00")).unwrap();
    assert!(week.is_stale(&utc("2023-05-03 10:00:01")).is_err());
}

#[test]
fn verdict_is_zone_independent_for_the_same_wall_clock() {
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();
    let local = |s: &str| {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        tz.from_local_datetime(&naive).unwrap()
    };

    let week = WeekSchedule::parse(PATTERN, local("2023-05-06 04:00:00")).unwrap();
    assert!(week.is_stale(&local("2023-05-04 04:00:00")).unwrap());

    let week = WeekSchedule::parse(PATTERN, local("2023-05-08 03:59:59")).unwrap();
    assert!(!week.is_stale(&local("2023-05-06 04:00:00")).unwrap());
}

// ── daylight saving ─────────────────────────────────────────

#[test]
fn weekend_after_fall_back_checks_previous_week() {
    let now = New_York.with_ymd_and_hms(2023, 11, 12, 1, 30, 0).unwrap();
    let last = New_York.with_ymd_and_hms(2023, 11, 10, 20, 0, 0).unwrap();
    let week = WeekSchedule::parse("1-5|0930-1630", now).unwrap();
    assert_eq!(week.is_stale(&last), Ok(false));

    let before_close = New_York.with_ymd_and_hms(2023, 11, 10, 12, 0, 0).unwrap();
    assert_eq!(week.is_stale(&before_close), Ok(true));
}

#[test]
fn checkpoint_in_skipped_hour_still_fires() {
    let week = WeekSchedule::parse(
        "1-7|0230",
        New_York.with_ymd_and_hms(2023, 3, 8, 12, 0, 0).unwrap(),
    )
    .unwrap();
    assert_eq!(week.days().len(), 7);
    let sunday = week.last_day().unwrap().first_window().unwrap();
    assert_eq!(sunday.start().naive_local().to_string(), "2023-03-12 03:30:00");

    let now = New_York.with_ymd_and_hms(2023, 3, 12, 3, 30, 0).unwrap();
    let last = New_York.with_ymd_and_hms(2023, 3, 11, 12, 0, 0).unwrap();
    let week = WeekSchedule::parse("1-7|0230", now).unwrap();
    assert_eq!(week.is_stale(&last), Ok(true));
}
