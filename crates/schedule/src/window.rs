//! A time-of-day interval anchored to one calendar date.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone};

use staleweek_core::{Result, ScheduleError};

use crate::pattern::WindowPattern;
use crate::time_of_day::parse_hhmm;

/// Inclusive `[start, end]` interval on a single calendar date.
///
/// Equality and ordering look at `start` and `end` only: windows built from
/// `"0900"` and `"0900-0900"` on the same date are equal.
#[derive(Debug, Clone)]
pub struct TimeWindow<Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    anchor_date: NaiveDate,
    pattern: WindowPattern,
}

impl<Tz: TimeZone> TimeWindow<Tz> {
    /// Resolve `pattern` against `anchor_date` in `tz`.
    ///
    /// Fails on a malformed `HHmm` and on a span whose end precedes its start.
    /// Times inside a DST gap land past the gap, ambiguous ones on the earlier
    /// instant.
    pub fn new(anchor_date: NaiveDate, tz: &Tz, pattern: &WindowPattern) -> Result<Self> {
        let start = resolve(anchor_date, tz, pattern.start())?;
        let end = resolve(anchor_date, tz, pattern.end())?;

        if end < start {
            return Err(ScheduleError::InvertedWindow {
                start: pattern.start().to_string(),
                end: pattern.end().to_string(),
            });
        }

        Ok(Self {
            start,
            end,
            anchor_date,
            pattern: pattern.clone(),
        })
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn pattern(&self) -> &WindowPattern {
        &self.pattern
    }

    /// Single checkpoint rather than a span.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive containment: `start <= point <= end`.
    pub fn in_range(&self, point: &DateTime<Tz>) -> bool {
        *point == self.start || *point == self.end || (self.start < *point && *point < self.end)
    }

    /// The window closed strictly before `point`.
    pub fn is_before(&self, point: &DateTime<Tz>) -> bool {
        self.end < *point
    }

    /// The window opens strictly after `point`.
    pub fn is_after(&self, point: &DateTime<Tz>) -> bool {
        self.start > *point
    }

    pub fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    /// Order by `start`, then by `end`.
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.cmp(b)
    }
}

fn resolve<Tz: TimeZone>(date: NaiveDate, tz: &Tz, hhmm: &str) -> Result<DateTime<Tz>> {
    let time = parse_hhmm(hhmm)?;
    resolve_local(tz, date.and_time(time)).ok_or_else(|| ScheduleError::NonexistentLocalTime {
        date: date.to_string(),
        time: hhmm.to_string(),
    })
}

/// Wall-clock time in `tz`. Ambiguous times take the earlier instant. Times
/// skipped by a forward transition are read with the offset in force a day
/// earlier, which moves them past the gap by its length.
pub(crate) fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    naive: NaiveDateTime,
) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let day_before = naive.checked_sub_signed(Duration::days(1))?;
        let offset = tz.from_local_datetime(&day_before).earliest()?.offset().fix();
        let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
        Some(tz.from_utc_datetime(&naive.checked_sub_signed(shift)?))
    })
}

impl<Tz: TimeZone> PartialEq for TimeWindow<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Eq for TimeWindow<Tz> {}

impl<Tz: TimeZone> PartialOrd for TimeWindow<Tz> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tz: TimeZone> Ord for TimeWindow<Tz> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}
