//! Source text of a single window: one `HHmm` instant or an `HHmm-HHmm` span.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use staleweek_core::ScheduleError;

/// Unvalidated window source as written in a week pattern.
///
/// Holds the raw strings so a window can be rebuilt against another date.
/// `HHmm` checks happen when a [`TimeWindow`](crate::TimeWindow) is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WindowPattern {
    /// `start == end`, a single checkpoint.
    Instant(String),
    Span(String, String),
}

impl WindowPattern {
    pub fn instant(at: impl Into<String>) -> Self {
        Self::Instant(at.into())
    }

    pub fn span(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Span(start.into(), end.into())
    }

    pub fn start(&self) -> &str {
        match self {
            Self::Instant(s) | Self::Span(s, _) => s,
        }
    }

    pub fn end(&self) -> &str {
        match self {
            Self::Instant(s) | Self::Span(_, s) => s,
        }
    }
}

impl FromStr for WindowPattern {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').map(str::trim).collect();
        match parts.as_slice() {
            [at] if !at.is_empty() => Ok(Self::instant(*at)),
            [start, end] if !start.is_empty() && !end.is_empty() => Ok(Self::span(*start, *end)),
            _ => Err(ScheduleError::Pattern(format!(
                "invalid time group '{}', expected HHmm or HHmm-HHmm",
                s
            ))),
        }
    }
}

impl TryFrom<String> for WindowPattern {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WindowPattern> for String {
    fn from(p: WindowPattern) -> Self {
        p.to_string()
    }
}

impl fmt::Display for WindowPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(at) => f.write_str(at),
            Self::Span(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}
