// File: timerdash-core/src/config.rs
//
// Defaults, then environment (a `.env` file is honoured), then whatever the
// binary overrides from its command line.

use std::time::Duration;

use tracing::debug;

use timerdash_common::models::{GameMode, GuildId};

use crate::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_GUILD: &str = "279614276338188288";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    /// Shown when no guild has an active timer.
    pub default_guild: Option<GuildId>,
    /// Mode used for event lookups when the selected guild has no timer.
    pub default_mode: GameMode,
    pub log_limit: u32,
    pub poll_gsi: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            default_guild: Some(DEFAULT_GUILD.to_string()),
            default_mode: GameMode::Regular,
            log_limit: 20,
            poll_gsi: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, Error> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        if let Some(url) = get("TIMERDASH_BASE_URL").filter(|v| !v.is_empty()) {
            cfg.base_url = url;
        }
        if let Some(raw) = get("TIMERDASH_POLL_INTERVAL_MS") {
            cfg.poll_interval = parse_millis("TIMERDASH_POLL_INTERVAL_MS", &raw)?;
        }
        if let Some(raw) = get("TIMERDASH_REQUEST_TIMEOUT_MS") {
            cfg.request_timeout = parse_millis("TIMERDASH_REQUEST_TIMEOUT_MS", &raw)?;
        }
        if let Some(guild) = get("TIMERDASH_DEFAULT_GUILD") {
            // set-but-empty means "no default guild"
            cfg.default_guild = if guild.is_empty() { None } else { Some(guild) };
        }
        if let Some(raw) = get("TIMERDASH_DEFAULT_MODE") {
            cfg.default_mode = raw
                .parse()
                .map_err(|_| Error::Config(format!("TIMERDASH_DEFAULT_MODE: unknown mode '{}'", raw)))?;
        }
        if let Some(raw) = get("TIMERDASH_LOG_LIMIT") {
            cfg.log_limit = raw
                .parse()
                .map_err(|_| Error::Config(format!("TIMERDASH_LOG_LIMIT: not a number '{}'", raw)))?;
        }
        if let Some(raw) = get("TIMERDASH_POLL_GSI") {
            cfg.poll_gsi = parse_bool("TIMERDASH_POLL_GSI", &raw)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("base URL '{}': {}", self.base_url, e)))?;
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll interval must be positive".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be positive".into()));
        }
        Ok(())
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, Error> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| Error::Config(format!("{}: expected milliseconds, got '{}'", key, raw)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, Error> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{}: expected a boolean, got '{}'", key, raw))),
    }
}
