//! Week pattern DSL: `<days>|<times>[|<throttleSeconds>]`.
//!
//! ```text
//! 1-3,6,7|0400,0500,1430-1945|3
//! ```
//!
//! Monday to Wednesday plus the weekend, checkpoints at 04:00 and 05:00, a
//! window from 14:30 to 19:45, and a three second throttle.

use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};
use tracing::warn;

use staleweek_core::{Result, ScheduleError};

use crate::pattern::WindowPattern;

use super::config::ScheduleConfig;
use super::core::WeekSchedule;

impl ScheduleConfig {
    /// Parse a week pattern string.
    ///
    /// Day tokens are integers `1..=7` or inclusive ranges `A-B`; the result is
    /// sorted and deduplicated. A throttle that is not a number is ignored.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let segments: Vec<&str> = pattern.split('|').collect();
        let (days, times, throttle) = match segments.as_slice() {
            [days, times] => (*days, *times, None),
            [days, times, throttle] => (*days, *times, Some(*throttle)),
            _ => {
                return Err(ScheduleError::Pattern(format!(
                    "expected '<days>|<times>[|<throttleSeconds>]', got '{}'",
                    pattern
                )))
            }
        };

        Ok(Self {
            weekdays: parse_days(days)?,
            windows: parse_times(times)?,
            throttle_seconds: throttle.and_then(parse_throttle_seconds),
        })
    }
}

impl FromStr for ScheduleConfig {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_pattern(s)
    }
}

impl<Tz: TimeZone> WeekSchedule<Tz> {
    /// Parse `pattern` and anchor it to `relative_to`.
    pub fn parse(pattern: &str, relative_to: DateTime<Tz>) -> Result<Self> {
        let config = ScheduleConfig::from_pattern(pattern)?;
        Self::create_relative_to(relative_to, &config)
    }
}

impl WeekSchedule<Local> {
    pub fn parse_now(pattern: &str) -> Result<Self> {
        Self::parse(pattern, Local::now())
    }
}

fn parse_days(segment: &str) -> Result<Vec<u32>> {
    let mut days = Vec::new();

    for token in segment.split(',').map(str::trim) {
        match token.split_once('-') {
            Some((from, to)) => {
                let from = parse_day(from, token)?;
                let to = parse_day(to, token)?;
                if from > to {
                    return Err(ScheduleError::Pattern(format!(
                        "day range '{}' is descending",
                        token
                    )));
                }
                days.extend(from..=to);
            }
            None => days.push(parse_day(token, token)?),
        }
    }

    days.sort_unstable();
    days.dedup();
    Ok(days)
}

fn parse_day(s: &str, token: &str) -> Result<u32> {
    let day: u32 = s
        .trim()
        .parse()
        .map_err(|_| ScheduleError::Pattern(format!("invalid day token '{}'", token)))?;
    if !(1..=7).contains(&day) {
        return Err(ScheduleError::InvalidIsoWeekday(day));
    }
    Ok(day)
}

fn parse_times(segment: &str) -> Result<Vec<WindowPattern>> {
    segment.split(',').map(WindowPattern::from_str).collect()
}

fn parse_throttle_seconds(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!(throttle = %raw, "ignoring non-numeric throttle in week pattern");
            None
        }
    }
}
