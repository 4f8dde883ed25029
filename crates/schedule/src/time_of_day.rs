//! 24-hour `HHmm` time-of-day strings.

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use staleweek_core::{Result, ScheduleError};

static HHMM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3])[0-5][0-9]$").expect("HHmm pattern is a valid regex")
});

/// Whether `s` is a well-formed `HHmm` string (`0000` through `2359`).
pub fn is_valid_hhmm(s: &str) -> bool {
    HHMM_RE.is_match(s)
}

/// Parse an `HHmm` string into a time of day.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    if !is_valid_hhmm(s) {
        return Err(ScheduleError::InvalidTimeOfDay(s.to_string()));
    }
    // ASCII-only match, so byte slicing is on char boundaries.
    let hour: u32 = s[..2]
        .parse()
        .map_err(|_| ScheduleError::InvalidTimeOfDay(s.to_string()))?;
    let minute: u32 = s[2..]
        .parse()
        .map_err(|_| ScheduleError::InvalidTimeOfDay(s.to_string()))?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| ScheduleError::InvalidTimeOfDay(s.to_string()))
}

/// Render a time of day as `HHmm`, dropping seconds.
pub fn format_hhmm(t: NaiveTime) -> String {
    format!("{:02}{:02}", t.hour(), t.minute())
}
