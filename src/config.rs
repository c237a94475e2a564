use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::hit::DEFAULT_DEDUP_WINDOW;

pub const DEDUP_WINDOW_VAR: &str = "MPSYNC_DEDUP_WINDOW_MS";
pub const DEDUP_SWEEP_VAR: &str = "MPSYNC_DEDUP_SWEEP_SECS";
pub const WORLD_VAR: &str = "MPSYNC_WORLD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Magic hits from the same aggressor closer together than this are dropped
    pub dedup_window: Duration,
    /// How often to evict stale dedup entries; `None` keeps every entry for the session
    pub dedup_sweep_interval: Option<Duration>,
    /// World description for the in-memory engine binding used by replays
    pub world_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dedup_window: DEFAULT_DEDUP_WINDOW,
            dedup_sweep_interval: None,
            world_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any key/value source; missing keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let dedup_window = match lookup(DEDUP_WINDOW_VAR) {
            Some(value) => Duration::from_millis(parse_number(DEDUP_WINDOW_VAR, &value)?),
            None => defaults.dedup_window,
        };

        let dedup_sweep_interval = match lookup(DEDUP_SWEEP_VAR) {
            Some(value) => match parse_number(DEDUP_SWEEP_VAR, &value)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => defaults.dedup_sweep_interval,
        };

        let world_path = lookup(WORLD_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let config = Self {
            dedup_window,
            dedup_sweep_interval,
            world_path,
        };

        info!(
            dedup_window_ms = config.dedup_window.as_millis() as u64,
            dedup_sweep_secs = config.dedup_sweep_interval.map(|d| d.as_secs()),
            world = ?config.world_path,
            "Loaded client config"
        );
        Ok(config)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}
