// File: timerdash-common/src/models/status.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::models::lenient::{lenient_i64, null_as_default};

/// Discord guild id, kept as text (the server sends it as a JSON object key).
pub type GuildId = String;

/// Which event table a timer runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Regular,
    Turbo,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Regular => "regular",
            GameMode::Turbo => "turbo",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(GameMode::Regular),
            "turbo" => Ok(GameMode::Turbo),
            other => Err(Error::InvalidInput(format!("Unknown game mode: {}", other))),
        }
    }
}

// Unknown or missing modes fall back to `Regular` rather than failing the payload.
impl<'de> Deserialize<'de> for GameMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

/// Snapshot of one guild's running match timer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuildTimer {
    #[serde(default)]
    pub mode: GameMode,
    /// Seconds since the horn; negative during the pre-game countdown.
    #[serde(rename = "elapsed_time", default, deserialize_with = "lenient_i64")]
    pub elapsed_seconds: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paused: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roshan_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub glyph_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tormentor_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_events: Vec<String>,
}

/// Payload of `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotStatus {
    #[serde(rename = "bot_running", default, deserialize_with = "null_as_default")]
    pub running: bool,
    /// Keyed by guild; a guild without an entry has no active timer.
    #[serde(rename = "active_timers", default, deserialize_with = "null_as_default")]
    pub timers: BTreeMap<GuildId, GuildTimer>,
}

impl BotStatus {
    /// What the dashboard shows when the status endpoint can't be reached.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn active_guild_ids(&self) -> impl Iterator<Item = &GuildId> {
        self.timers.keys()
    }

    pub fn timer(&self, guild_id: &str) -> Option<&GuildTimer> {
        self.timers.get(guild_id)
    }
}
