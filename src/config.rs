//! Runtime configuration read from the environment.
//!
//! | variable            | meaning                          | default         |
//! |---------------------|----------------------------------|-----------------|
//! | `MATCH3_SEED`       | tile stream seed                 | wall clock      |
//! | `MATCH3_GRID_SIZE`  | board edge length                | 8               |
//! | `MATCH3_TILE_KINDS` | tile kinds in play               | 6               |
//! | `MATCH3_MIN_RUN`    | shortest matching run            | 3               |
//! | `MATCH3_TIME_LIMIT` | seconds per game                 | 60              |
//! | `MATCH3_LOG_PATH`   | JSON-lines event log (append)    | off             |
//!
//! Empty or unparsable values fall back to the default. Range checks happen
//! when the session is built.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;
use crate::types::TIME_LIMIT_SECS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub seed: u32,
    pub time_limit_secs: u32,
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            seed: 1,
            time_limit_secs: TIME_LIMIT_SECS,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from `MATCH3_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let number = |key: &str| value(key).and_then(|s| s.parse::<u32>().ok());
        let small = |key: &str| value(key).and_then(|s| s.parse::<u8>().ok());

        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            grid_size: small("MATCH3_GRID_SIZE").unwrap_or(defaults.grid_size),
            tile_kinds: small("MATCH3_TILE_KINDS").unwrap_or(defaults.tile_kinds),
            min_run: small("MATCH3_MIN_RUN").unwrap_or(defaults.min_run),
            ..defaults
        };

        Self {
            engine,
            seed: number("MATCH3_SEED").unwrap_or_else(clock_seed),
            time_limit_secs: number("MATCH3_TIME_LIMIT")
                .filter(|&secs| secs > 0)
                .unwrap_or(TIME_LIMIT_SECS),
            log_path: value("MATCH3_LOG_PATH"),
        }
    }

    pub fn time_limit_ms(&self) -> u32 {
        self.time_limit_secs.saturating_mul(1000)
    }
}

/// Seed from the sub-second part of the wall clock.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
