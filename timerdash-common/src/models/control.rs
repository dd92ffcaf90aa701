// File: timerdash-common/src/models/control.rs
//
// Request bodies for the timer control surface.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::models::status::GameMode;

#[derive(Debug, Clone, Serialize)]
pub struct StartTimerRequest {
    pub guild_id: String,
    /// Passed through verbatim; the bot accepts `MM:SS` or plain seconds.
    pub countdown: String,
    pub mode: GameMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuildRequest {
    pub guild_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTimer {
    Roshan,
    Glyph,
    Tormentor,
}

impl SubTimer {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubTimer::Roshan => "roshan",
            SubTimer::Glyph => "glyph",
            SubTimer::Tormentor => "tormentor",
        }
    }
}

impl fmt::Display for SubTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubTimer {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "roshan" | "rosh" => Ok(SubTimer::Roshan),
            "glyph" => Ok(SubTimer::Glyph),
            "tormentor" => Ok(SubTimer::Tormentor),
            other => Err(Error::InvalidInput(format!("Unknown sub-timer: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubTimerAction {
    Start,
    Cancel,
}

impl FromStr for SubTimerAction {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(SubTimerAction::Start),
            "cancel" | "stop" => Ok(SubTimerAction::Cancel),
            other => Err(Error::InvalidInput(format!("Unknown action: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubTimerRequest {
    pub guild_id: String,
    pub action: SubTimerAction,
}

/// Whatever a write endpoint answered with. Only the message is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlAck {
    pub message: Option<String>,
    pub raw: Value,
}

impl From<Value> for ControlAck {
    fn from(raw: Value) -> Self {
        let message = match &raw {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("message").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        Self { message, raw }
    }
}
