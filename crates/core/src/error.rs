use thiserror::Error;

/// Coarse category of a [`ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was well-formed but violates a schedule constraint.
    Validation,
    /// A `HHmm` time of day could not be resolved.
    Format,
    /// First/last access on a collection with no elements.
    EmptyCollection,
    /// Malformed week pattern string.
    Parse,
    /// Environment or YAML configuration could not be used.
    Config,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("ISO weekday must be between 1 and 7, got {0}")]
    InvalidIsoWeekday(u32),

    #[error("lastRefreshed ({last_refreshed}) cannot be after relativeTo ({relative_to})")]
    RefreshedAfterReference {
        last_refreshed: String,
        relative_to: String,
    },

    #[error("window end {end} precedes its start {start}")]
    InvertedWindow { start: String, end: String },

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("date out of range: {0}")]
    OutOfRange(String),

    #[error("invalid time of day '{0}', expected HHmm (e.g. 0159, 2359)")]
    InvalidTimeOfDay(String),

    #[error("local time {time} does not exist on {date}")]
    NonexistentLocalTime { date: String, time: String },

    #[error("{0} was unexpectedly empty")]
    EmptyCollection(&'static str),

    #[error("pattern error: {0}")]
    Pattern(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIsoWeekday(_)
            | Self::RefreshedAfterReference { .. }
            | Self::InvertedWindow { .. }
            | Self::InvalidInterval(_)
            | Self::OutOfRange(_) => ErrorKind::Validation,
            Self::InvalidTimeOfDay(_) | Self::NonexistentLocalTime { .. } => ErrorKind::Format,
            Self::EmptyCollection(_) => ErrorKind::EmptyCollection,
            Self::Pattern(_) => ErrorKind::Parse,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
