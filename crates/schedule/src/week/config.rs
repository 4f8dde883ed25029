//! Declarative form of a weekly schedule, [`ScheduleConfig`].

use serde::{Deserialize, Serialize};

use staleweek_core::{Result, ScheduleError};

use crate::pattern::WindowPattern;

/// Weekdays plus the windows shared by each of them.
///
/// Deserializes from YAML such as:
///
/// ```yaml
/// weekdays: [1, 2, 3, 4, 5]
/// windows: ["0400-0500", "1430-1945", "2100"]
/// throttle_seconds: 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// ISO weekdays, 1 = Monday .. 7 = Sunday. Order and duplicates do not matter.
    pub weekdays: Vec<u32>,
    pub windows: Vec<WindowPattern>,
    /// Grace period while inside a window. `None` disables throttling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttle_seconds: Option<u64>,
}

impl ScheduleConfig {
    pub fn new(
        weekdays: impl Into<Vec<u32>>,
        windows: impl IntoIterator<Item = WindowPattern>,
    ) -> Self {
        Self {
            weekdays: weekdays.into(),
            windows: windows.into_iter().collect(),
            throttle_seconds: None,
        }
    }

    pub fn with_throttle_seconds(mut self, seconds: u64) -> Self {
        self.throttle_seconds = Some(seconds);
        self
    }

    /// Parse a YAML document into a config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ScheduleError::Config(e.to_string()))
    }
}
