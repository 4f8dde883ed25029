//! The staleness verdict.

use chrono::{DateTime, TimeZone};
use tracing::debug;

use staleweek_core::{Result, ScheduleError};

use super::core::WeekSchedule;

impl<Tz: TimeZone> WeekSchedule<Tz> {
    /// Whether a value last refreshed at `last_refreshed` should be treated
    /// as outdated at `relative_to`.
    ///
    /// - Inside a window: stale, unless a throttle is configured and the
    ///   refresh happened less than the throttle ago.
    /// - Between windows: not stale when last week's final window closed
    ///   before the refresh and this week's first window is still ahead.
    ///   Otherwise stale iff the most recently closed window closed at or
    ///   after the refresh; `false` when no window has closed yet.
    ///
    /// Fails when `last_refreshed` is after `relative_to`, or when the
    /// schedule has no days or windows and the between-windows rule is needed.
    pub fn is_stale(&self, last_refreshed: &DateTime<Tz>) -> Result<bool> {
        let now = &self.relative_to;

        if last_refreshed > now {
            return Err(ScheduleError::RefreshedAfterReference {
                last_refreshed: format!("{:?}", last_refreshed),
                relative_to: format!("{:?}", now),
            });
        }

        if self.any_in_range(now) {
            let Some(throttle) = self.throttle else {
                debug!(relative_to = ?now, "inside a window, no throttle: stale");
                return Ok(true);
            };

            let grace = chrono::Duration::from_std(throttle)
                .map_err(|e| ScheduleError::OutOfRange(format!("throttle {:?}: {}", throttle, e)))?;
            let stale = match last_refreshed.clone().checked_add_signed(grace) {
                Some(fresh_until) => fresh_until <= *now,
                // Grace runs past the representable range; still fresh.
                None => false,
            };
            debug!(
                relative_to = ?now,
                last_refreshed = ?last_refreshed,
                throttle_secs = throttle.as_secs(),
                stale,
                "inside a window, throttled"
            );
            return Ok(stale);
        }

        // Last week's closing window vs this week's opening window.
        let previous_last_day = self.last_day()?.as_previous_week()?;
        let previous_close = previous_last_day.last_window()?;
        let this_week_open = self.first_day()?.first_window()?;

        if previous_close.is_before(last_refreshed) && this_week_open.is_after(now) {
            debug!(
                relative_to = ?now,
                last_refreshed = ?last_refreshed,
                "refreshed after last week's final window, first window not yet open: fresh"
            );
            return Ok(false);
        }

        let stale = match self.find_window_before(now) {
            Some(closed) => {
                let stale = !closed.is_before(last_refreshed);
                debug!(
                    relative_to = ?now,
                    last_refreshed = ?last_refreshed,
                    window_end = ?closed.end(),
                    stale,
                    "between windows"
                );
                stale
            }
            None => {
                debug!(relative_to = ?now, "no window has closed yet this week: fresh");
                false
            }
        };

        Ok(stale)
    }
}
