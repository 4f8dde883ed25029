//! Named weekday sets and convenience constructors.

use chrono::{DateTime, Local, TimeZone};

use staleweek_core::{Config, Result, ScheduleError};

use crate::pattern::WindowPattern;
use crate::time_of_day::{format_hhmm, parse_hhmm};

use super::config::ScheduleConfig;
use super::core::WeekSchedule;

pub const ISO_WEEKDAYS_MON_TO_FRI: [u32; 5] = [1, 2, 3, 4, 5];
pub const ISO_WEEKDAYS_EVERY_DAY: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];

impl<Tz: TimeZone> WeekSchedule<Tz> {
    pub fn create_relative_to(relative_to: DateTime<Tz>, config: &ScheduleConfig) -> Result<Self> {
        Self::new(relative_to, config)
    }

    /// Build from the env-loaded profile config.
    ///
    /// `SCHEDULE_PATTERN` is required; `SCHEDULE_THROTTLE`, when set,
    /// replaces the throttle carried by the pattern.
    pub fn from_env_config(env: &Config, relative_to: DateTime<Tz>) -> Result<Self> {
        let pattern = env.schedule.pattern.as_deref().ok_or_else(|| {
            ScheduleError::Config(format!(
                "SCHEDULE_PATTERN is not set for profile {}",
                env.profile_label()
            ))
        })?;

        let mut config = ScheduleConfig::from_pattern(pattern)?;
        if let Some(throttle) = env.schedule.throttle {
            config.throttle_seconds = Some(throttle.as_secs());
        }
        Self::new(relative_to, &config)
    }
}

impl WeekSchedule<Local> {
    /// Anchor to the current local instant.
    pub fn create_relative_to_now(config: &ScheduleConfig) -> Result<Self> {
        Self::new(Local::now(), config)
    }

    /// One checkpoint per day at `fixed_time`, on Monday to Friday when
    /// `monday_to_friday` is set and on every day otherwise.
    pub fn create_relative_to_now_fixed_daily_time(
        monday_to_friday: bool,
        fixed_time: &str,
    ) -> Result<Self> {
        let weekdays: Vec<u32> = if monday_to_friday {
            ISO_WEEKDAYS_MON_TO_FRI.to_vec()
        } else {
            ISO_WEEKDAYS_EVERY_DAY.to_vec()
        };
        let config = ScheduleConfig::new(weekdays, [WindowPattern::instant(fixed_time)]);
        Self::create_relative_to_now(&config)
    }
}

/// Single-instant windows from `start_time` to `end_time`, both inclusive,
/// every `step_minutes`.
///
/// Generation stops at the last step that does not pass `end_time` or
/// roll over midnight. A `start_time` after `end_time` yields no windows.
pub fn create_interval_windows(
    start_time: &str,
    end_time: &str,
    step_minutes: u32,
) -> Result<Vec<WindowPattern>> {
    let start = parse_hhmm(start_time)?;
    let end = parse_hhmm(end_time)?;

    if step_minutes == 0 {
        return Err(ScheduleError::InvalidInterval(
            "step must be at least one minute".to_string(),
        ));
    }

    let step = chrono::Duration::minutes(i64::from(step_minutes));
    let mut windows = Vec::new();
    let mut t = start;

    while t <= end {
        windows.push(WindowPattern::instant(format_hhmm(t)));
        let (next, wrapped_secs) = t.overflowing_add_signed(step);
        if wrapped_secs != 0 {
            break;
        }
        t = next;
    }

    Ok(windows)
}
