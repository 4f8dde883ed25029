//! Weekly-window cache staleness.
//!
//! Three layers, leaves first:
//! - [`TimeWindow`]: an inclusive time-of-day interval on one calendar date
//! - [`CalendarDay`]: the windows of one ISO weekday in a reference week
//! - [`WeekSchedule`]: the configured weekdays plus the staleness check and
//!   the `<days>|<times>[|<throttleSeconds>]` pattern DSL
//!
//! All values are immutable once built. Time zones follow the reference
//! instant: week starts, day offsets and `HHmm` resolution use its zone.

pub mod day;
pub mod pattern;
pub mod time_of_day;
pub mod week;
pub mod window;

pub use day::{iso_week_start, CalendarDay};
pub use pattern::WindowPattern;
pub use week::{
    create_interval_windows, ScheduleConfig, WeekSchedule, ISO_WEEKDAYS_EVERY_DAY,
    ISO_WEEKDAYS_MON_TO_FRI,
};
pub use window::TimeWindow;

pub use staleweek_core::{ErrorKind, Result, ScheduleError};
