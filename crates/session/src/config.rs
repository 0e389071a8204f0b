//! Session configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default CSV file for recorded scores.
pub const DEFAULT_SCORES_PATH: &str = "scores.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for piece and color selection.
    pub seed: u32,
    /// Preset player name; skips the name prompt.
    pub player: Option<String>,
    pub scores_path: PathBuf,
    /// JSON-lines event log, if enabled.
    pub log_path: Option<PathBuf>,
    pub gravity_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            player: None,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_path: None,
            gravity_enabled: true,
        }
    }
}

impl SessionConfig {
    /// Read `STACKER_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("STACKER_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let scores_path = get("STACKER_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let gravity_disabled = get("STACKER_GRAVITY_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            seed,
            player: get("STACKER_PLAYER"),
            scores_path,
            log_path: get("STACKER_LOG_PATH").map(PathBuf::from),
            gravity_enabled: !gravity_disabled,
        }
    }
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the high bits in so seeds differ across seconds too.
    (nanos ^ (nanos >> 32)) as u32
}
