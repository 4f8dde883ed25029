//! The recurring weekly pattern, [`WeekSchedule`], and its queries.

use std::time::Duration;

use chrono::{DateTime, TimeZone};

use staleweek_core::{Result, ScheduleError};

use crate::day::CalendarDay;
use crate::window::TimeWindow;

use super::config::ScheduleConfig;

/// A set of weekdays sharing the same windows, anchored to the week of
/// `relative_to` ("now").
///
/// Build one per check with [`WeekSchedule::new`] or
/// [`parse`](WeekSchedule::parse), then ask
/// [`is_stale`](WeekSchedule::is_stale).
#[derive(Debug, Clone)]
pub struct WeekSchedule<Tz: TimeZone> {
    pub(super) relative_to: DateTime<Tz>,
    pub(super) config: ScheduleConfig,
    pub(super) days: Vec<CalendarDay<Tz>>,
    pub(super) throttle: Option<Duration>,
}

impl<Tz: TimeZone> WeekSchedule<Tz> {
    /// Validate `config` and anchor every configured weekday to the week of
    /// `relative_to`.
    ///
    /// Weekdays are deduplicated and sorted; each must be in `1..=7`.
    pub fn new(relative_to: DateTime<Tz>, config: &ScheduleConfig) -> Result<Self> {
        if let Some(&bad) = config.weekdays.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(ScheduleError::InvalidIsoWeekday(bad));
        }

        let mut weekdays = config.weekdays.clone();
        weekdays.sort_unstable();
        weekdays.dedup();

        let mut days = weekdays
            .iter()
            .map(|&wd| CalendarDay::new(relative_to.clone(), wd, &config.windows))
            .collect::<Result<Vec<_>>>()?;
        days.sort_by(CalendarDay::compare);

        Ok(Self {
            relative_to,
            config: ScheduleConfig {
                weekdays,
                ..config.clone()
            },
            days,
            throttle: config.throttle_seconds.map(Duration::from_secs),
        })
    }

    /// Same configuration anchored to a different reference instant.
    pub fn relative_to_instant(&self, relative_to: DateTime<Tz>) -> Result<Self> {
        Self::new(relative_to, &self.config)
    }

    pub fn relative_to(&self) -> &DateTime<Tz> {
        &self.relative_to
    }

    /// Normalized configuration (weekdays sorted and deduplicated).
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn days(&self) -> &[CalendarDay<Tz>] {
        &self.days
    }

    pub fn throttle(&self) -> Option<Duration> {
        self.throttle
    }

    pub fn throttle_seconds(&self) -> Option<u64> {
        self.throttle.map(|t| t.as_secs())
    }

    pub fn first_day(&self) -> Result<&CalendarDay<Tz>> {
        self.days
            .first()
            .ok_or(ScheduleError::EmptyCollection("first day"))
    }

    pub fn last_day(&self) -> Result<&CalendarDay<Tz>> {
        self.days
            .last()
            .ok_or(ScheduleError::EmptyCollection("last day"))
    }

    /// Every window, in day order then window order.
    pub fn all_windows(&self) -> Vec<&TimeWindow<Tz>> {
        self.days.iter().flat_map(|d| d.windows()).collect()
    }

    /// Latest window, across the whole week, that closed strictly before `point`.
    pub fn find_window_before(&self, point: &DateTime<Tz>) -> Option<&TimeWindow<Tz>> {
        self.days
            .iter()
            .rev()
            .flat_map(|d| d.windows().iter().rev())
            .find(|w| w.is_before(point))
    }

    pub fn any_in_range(&self, point: &DateTime<Tz>) -> bool {
        self.days.iter().any(|d| d.any_in_range(point))
    }
}
