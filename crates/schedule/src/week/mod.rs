//! Weekly schedules and the cache staleness check.
//!
//! A [`WeekSchedule`] is built from a [`ScheduleConfig`] (directly, from YAML,
//! or from the compact pattern DSL) and anchored to a reference instant.
//! [`WeekSchedule::is_stale`] then decides whether a cached value should be
//! refreshed.

mod config;
mod core;
mod dsl;
mod factory;
mod staleness;


pub use self::config::ScheduleConfig;
pub use self::core::WeekSchedule;
pub use self::factory::{create_interval_windows, ISO_WEEKDAYS_EVERY_DAY, ISO_WEEKDAYS_MON_TO_FRI};
