use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled key: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_opt<F>(lookup: &F, profile: &str, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = lookup(&prefixed).filter(|s| !s.is_empty()) {
            return Some(v);
        }
    }
    lookup(key).filter(|s| !s.is_empty())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub schedule: ScheduleEnvConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `STALEWEEK_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("STALEWEEK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        Self::from_lookup(profile, env_opt)
    }

    /// Build config for `profile`, resolving keys through `lookup` instead of
    /// the process environment.
    pub fn from_lookup<F>(profile: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let p = profile.to_uppercase();
        Self {
            schedule: ScheduleEnvConfig::from_lookup(&lookup, &p),
            profile: p,
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  schedule:    pattern={}",
            self.schedule.pattern.as_deref().unwrap_or("(none)")
        );
        tracing::info!(
            "  throttle:    {}",
            self.schedule
                .throttle
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "(disabled)".to_string())
        );
    }
}

// ── Schedule ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEnvConfig {
    /// Week pattern, e.g. `1-5|0930-1630|30`.
    pub pattern: Option<String>,
    /// Overrides the throttle carried by `pattern` when set.
    pub throttle: Option<Duration>,
}

impl ScheduleEnvConfig {
    fn from_lookup<F>(lookup: &F, p: &str) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let throttle_raw = profiled_opt(lookup, p, "SCHEDULE_THROTTLE");
        let throttle = throttle_raw.as_deref().and_then(parse_throttle);
        if let (Some(raw), None) = (&throttle_raw, throttle) {
            tracing::warn!(value = %raw, "ignoring unparseable SCHEDULE_THROTTLE");
        }
        Self {
            pattern: profiled_opt(lookup, p, "SCHEDULE_PATTERN"),
            throttle,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.pattern.is_some()
    }
}

// ── Throttle parsing ──────────────────────────────────────────

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supports components: `Xd` (days), `Xh` (hours), `Xm` (minutes), `Xs` (seconds).
/// Components can be combined: "2h30m", "1m30s", "90s". A bare number is
/// seconds. Returns `None` if the string is empty or unparseable.
pub fn parse_throttle(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let mut total_secs: u64 = 0;
    let mut num_buf = String::new();
    let mut found_unit = false;

    for ch in s.chars() {
        if ch.is_ascii_digit() {
            num_buf.push(ch);
        } else {
            let n: u64 = num_buf.parse().ok()?;
            num_buf.clear();
            let unit = match ch {
                'd' => 86_400,
                'h' => 3_600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_secs = total_secs.checked_add(n.checked_mul(unit)?)?;
            found_unit = true;
        }
    }

    if !num_buf.is_empty() {
        // "30m15" is ambiguous.
        if found_unit {
            return None;
        }
        total_secs = num_buf.parse().ok()?;
    }

    Some(Duration::from_secs(total_secs))
}
