// src/config.rs

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api/v1";
pub const DEFAULT_STATE_DB: &str = "browser_state.sqlite3";
pub const DEFAULT_OUTPUT: &str = "apartments.html";
pub const DEFAULT_MAP_IMAGE: &str = "static/apartment.png";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration. Every value can be overridden through an
/// environment variable; missing or unparsable values fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub state_db: PathBuf,
    pub output: PathBuf,
    pub map_image: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            state_db: PathBuf::from(DEFAULT_STATE_DB),
            output: PathBuf::from(DEFAULT_OUTPUT),
            map_image: DEFAULT_MAP_IMAGE.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let http_timeout = match text("BROWSER_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("Ignoring invalid BROWSER_HTTP_TIMEOUT_SECS={raw:?}");
                    defaults.http_timeout
                }
            },
            None => defaults.http_timeout,
        };

        Self {
            api_base: text("BROWSER_API_BASE").unwrap_or(defaults.api_base),
            state_db: text("BROWSER_STATE_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_db),
            output: text("BROWSER_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
            map_image: text("BROWSER_MAP_IMAGE").unwrap_or(defaults.map_image),
            http_timeout,
        }
    }
}
