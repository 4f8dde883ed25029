//! One ISO weekday of a schedule, anchored to a concrete date.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};

use staleweek_core::{Result, ScheduleError};

use crate::pattern::WindowPattern;
use crate::window::{resolve_local, TimeWindow};

/// Monday that starts the ISO week containing `date`.
pub fn iso_week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// The windows of one ISO weekday in the week of a reference instant.
///
/// Windows are kept sorted ascending by [`TimeWindow::compare`].
#[derive(Debug, Clone)]
pub struct CalendarDay<Tz: TimeZone> {
    reference: DateTime<Tz>,
    iso_weekday: u32,
    week_start: NaiveDate,
    anchor_date: NaiveDate,
    patterns: Vec<WindowPattern>,
    windows: Vec<TimeWindow<Tz>>,
}

impl<Tz: TimeZone> CalendarDay<Tz> {
    pub fn new(
        reference: DateTime<Tz>,
        iso_weekday: u32,
        patterns: &[WindowPattern],
    ) -> Result<Self> {
        let week_start = iso_week_start(reference.date_naive());
        Self::in_week(reference, week_start, iso_weekday, patterns)
    }

    fn in_week(
        reference: DateTime<Tz>,
        week_start: NaiveDate,
        iso_weekday: u32,
        patterns: &[WindowPattern],
    ) -> Result<Self> {
        if !(1..=7).contains(&iso_weekday) {
            return Err(ScheduleError::InvalidIsoWeekday(iso_weekday));
        }

        let anchor_date = week_start
            .checked_add_days(Days::new(u64::from(iso_weekday - 1)))
            .ok_or_else(|| {
                ScheduleError::OutOfRange(format!("weekday {} of week {}", iso_weekday, week_start))
            })?;

        let tz = reference.timezone();
        let mut windows = patterns
            .iter()
            .map(|p| TimeWindow::new(anchor_date, &tz, p))
            .collect::<Result<Vec<_>>>()?;
        windows.sort();

        Ok(Self {
            reference,
            iso_weekday,
            week_start,
            anchor_date,
            patterns: patterns.to_vec(),
            windows,
        })
    }

    pub fn iso_weekday(&self) -> u32 {
        self.iso_weekday
    }

    pub fn weekday(&self) -> Weekday {
        self.anchor_date.weekday()
    }

    pub fn reference(&self) -> &DateTime<Tz> {
        &self.reference
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn patterns(&self) -> &[WindowPattern] {
        &self.patterns
    }

    pub fn windows(&self) -> &[TimeWindow<Tz>] {
        &self.windows
    }

    pub fn any_in_range(&self, point: &DateTime<Tz>) -> bool {
        self.windows.iter().any(|w| w.in_range(point))
    }

    pub fn first_window(&self) -> Result<&TimeWindow<Tz>> {
        self.windows
            .first()
            .ok_or(ScheduleError::EmptyCollection("first window"))
    }

    pub fn last_window(&self) -> Result<&TimeWindow<Tz>> {
        self.windows
            .last()
            .ok_or(ScheduleError::EmptyCollection("last window"))
    }

    /// Latest window (in sort order) that closed strictly before `point`.
    pub fn find_window_before(&self, point: &DateTime<Tz>) -> Option<&TimeWindow<Tz>> {
        self.windows.iter().rev().find(|w| w.is_before(point))
    }

    /// Same weekday and windows, anchored seven calendar days earlier.
    ///
    /// The week is shifted on dates, so a DST change in between never moves
    /// the anchor. The reference keeps its wall-clock time where that exists.
    pub fn as_previous_week(&self) -> Result<Self> {
        let out_of_range = || ScheduleError::OutOfRange(format!("week before {}", self.week_start));
        let week_start = self
            .week_start
            .checked_sub_days(Days::new(7))
            .ok_or_else(out_of_range)?;
        let tz = self.reference.timezone();
        let reference = self
            .reference
            .date_naive()
            .checked_sub_days(Days::new(7))
            .and_then(|d| resolve_local(&tz, d.and_time(self.reference.time())))
            .ok_or_else(out_of_range)?;
        Self::in_week(reference, week_start, self.iso_weekday, &self.patterns)
    }

    /// Order by anchor calendar date, ignoring time of day.
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.anchor_date.cmp(&b.anchor_date)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use chrono_tz::America::New_York;

    use super::*;

    fn wed() -> DateTime<Utc> {
        // Wednesday 2023-05-03 14:30 UTC
        Utc.with_ymd_and_hms(2023, 5, 3, 14, 30, 0).unwrap()
    }

    fn patterns(ps: &[&str]) -> Vec<WindowPattern> {
        ps.iter().map(|p| p.parse().unwrap()).collect()
    }

    #[test]
    fn week_start_is_monday() {
        let d = NaiveDate::from_ymd_opt(2023, 5, 3).unwrap();
        assert_eq!(iso_week_start(d), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
        // Sunday still belongs to the week that started six days earlier.
        let sun = NaiveDate::from_ymd_opt(2023, 5, 7).unwrap();
        assert_eq!(iso_week_start(sun), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
        let mon = NaiveDate::from_ymd_opt(2023, 5, 8).unwrap();
        assert_eq!(iso_week_start(mon), mon);
    }

    #[test]
    fn anchors_to_weekday_of_reference_week() {
        let day = CalendarDay::new(wed(), 5, &patterns(&["0900"])).unwrap();
        assert_eq!(day.week_start(), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
        assert_eq!(day.anchor_date(), NaiveDate::from_ymd_opt(2023, 5, 5).unwrap());
        assert_eq!(day.weekday(), Weekday::Fri);
        assert_eq!(day.iso_weekday(), 5);
        assert_eq!(
            *day.first_window().unwrap().start(),
            Utc.with_ymd_and_hms(2023, 5, 5, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn windows_are_sorted_regardless_of_input_order() {
        let day = CalendarDay::new(wed(), 3, &patterns(&["2100", "1430-1945", "0400-0500"])).unwrap();
        let starts: Vec<String> = day.windows().iter().map(|w| w.pattern().to_string()).collect();
        assert_eq!(starts, vec!["0400-0500", "1430-1945", "2100"]);
        assert_eq!(day.first_window().unwrap().pattern().to_string(), "0400-0500");
        assert_eq!(day.last_window().unwrap().pattern().to_string(), "2100");
    }

    #[test]
    fn rejects_weekday_out_of_range() {
        assert_eq!(
            CalendarDay::new(wed(), 0, &[]).unwrap_err(),
            ScheduleError::InvalidIsoWeekday(0)
        );
        assert_eq!(
            CalendarDay::new(wed(), 8, &[]).unwrap_err(),
            ScheduleError::InvalidIsoWeekday(8)
        );
    }

    #[test]
    fn empty_day_has_no_first_or_last_window() {
        let day = CalendarDay::new(wed(), 1, &[]).unwrap();
        assert_eq!(
            day.first_window().unwrap_err(),
            ScheduleError::EmptyCollection("first window")
        );
        assert!(day.last_window().is_err());
        assert!(!day.any_in_range(&wed()));
    }

    #[test]
    fn any_in_range_and_find_window_before() {
        let day = CalendarDay::new(wed(), 3, &patterns(&["0400-0500", "1430-1945", "2100"])).unwrap();
        assert!(day.any_in_range(&wed()));

        let noon = Utc.with_ymd_and_hms(2023, 5, 3, 12, 0, 0).unwrap();
        assert!(!day.any_in_range(&noon));
        assert_eq!(
            day.find_window_before(&noon).unwrap().pattern().to_string(),
            "0400-0500"
        );

        let early = Utc.with_ymd_and_hms(2023, 5, 3, 3, 0, 0).unwrap();
        assert!(day.find_window_before(&early).is_none());
    }

    #[test]
    fn previous_week_shifts_anchor_by_seven_days() {
        let day = CalendarDay::new(wed(), 5, &patterns(&["2100"])).unwrap();
        let prev = day.as_previous_week().unwrap();
        assert_eq!(prev.anchor_date(), NaiveDate::from_ymd_opt(2023, 4, 28).unwrap());
        assert_eq!(prev.patterns(), day.patterns());
        // The original is untouched.
        assert_eq!(day.anchor_date(), NaiveDate::from_ymd_opt(2023, 5, 5).unwrap());
    }

    #[test]
    fn compare_is_by_date_only() {
        let mon = CalendarDay::new(wed(), 1, &patterns(&["2300"])).unwrap();
        let tue = CalendarDay::new(wed(), 2, &patterns(&["0000"])).unwrap();
        let mon_again = CalendarDay::new(wed(), 1, &patterns(&["0100"])).unwrap();
        assert_eq!(CalendarDay::compare(&mon, &tue), Ordering::Less);
        assert_eq!(CalendarDay::compare(&tue, &mon), Ordering::Greater);
        assert_eq!(CalendarDay::compare(&mon, &mon_again), Ordering::Equal);
    }

    #[test]
    fn previous_week_across_fall_back_keeps_the_anchor() {
        // A week before Sunday 2023-11-12 01:30 is the repeated 01:30 hour.
        let reference = New_York.with_ymd_and_hms(2023, 11, 12, 1, 30, 0).unwrap();
        let day = CalendarDay::new(reference, 5, &patterns(&["0930-1630"])).unwrap();
        let prev = day.as_previous_week().unwrap();
        assert_eq!(prev.week_start(), NaiveDate::from_ymd_opt(2023, 10, 30).unwrap());
        assert_eq!(prev.anchor_date(), NaiveDate::from_ymd_opt(2023, 11, 3).unwrap());
        assert_eq!(prev.reference().date_naive(), NaiveDate::from_ymd_opt(2023, 11, 5).unwrap());
    }

    #[test]
    fn previous_week_across_spring_forward_keeps_the_anchor() {
        // A week before Sunday 2023-03-19 02:30 falls in the skipped hour.
        let reference = New_York.with_ymd_and_hms(2023, 3, 19, 2, 30, 0).unwrap();
        let day = CalendarDay::new(reference, 5, &patterns(&["2100"])).unwrap();
        let prev = day.as_previous_week().unwrap();
        assert_eq!(prev.anchor_date(), NaiveDate::from_ymd_opt(2023, 3, 10).unwrap());
        assert_eq!(prev.reference().naive_local().to_string(), "2023-03-12 03:30:00");
    }

    #[test]
    fn previous_week_of_late_evening_stays_in_its_week() {
        // Sunday 23:30 EST, one week earlier is still Sunday in EDT.
        let reference = New_York.with_ymd_and_hms(2023, 11, 5, 23, 30, 0).unwrap();
        let day = CalendarDay::new(reference, 1, &patterns(&["0900"])).unwrap();
        let prev = day.as_previous_week().unwrap();
        assert_eq!(prev.week_start(), NaiveDate::from_ymd_opt(2023, 10, 23).unwrap());
        assert_eq!(prev.reference().date_naive(), NaiveDate::from_ymd_opt(2023, 10, 29).unwrap());
    }
}
