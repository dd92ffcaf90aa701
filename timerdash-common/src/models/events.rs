// File: timerdash-common/src/models/events.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::lenient::{lenient_u64, null_as_default};
use crate::models::status::GameMode;

pub type EventId = u64;

/// A one-shot announcement at a fixed match time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticEvent {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub time: u64,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// A repeating announcement between `start_time` and `end_time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodicEvent {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub start_time: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub interval: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub end_time: u64,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Payload of `GET /events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub static_events: BTreeMap<EventId, StaticEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub periodic_events: BTreeMap<EventId, PeriodicEvent>,
}

impl EventCatalog {
    pub fn is_empty(&self) -> bool {
        self.static_events.is_empty() && self.periodic_events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.static_events.len() + self.periodic_events.len()
    }
}

/// Body of `POST /events`, minus the guild/mode envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NewEvent {
    Static {
        time: u64,
        message: String,
    },
    Periodic {
        start_time: u64,
        interval: u64,
        end_time: u64,
        message: String,
    },
}

impl NewEvent {
    /// Creation-time checks. Events read back from the server are not re-validated.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            NewEvent::Static { message, .. } => require_message(message),
            NewEvent::Periodic { start_time, interval, end_time, message } => {
                require_message(message)?;
                if *interval == 0 {
                    return Err(Error::InvalidInput("interval must be greater than zero".into()));
                }
                if start_time >= end_time {
                    return Err(Error::InvalidInput(format!(
                        "start_time ({}) must be before end_time ({})",
                        start_time, end_time
                    )));
                }
                Ok(())
            }
        }
    }
}

fn require_message(message: &str) -> Result<(), Error> {
    if message.trim().is_empty() {
        Err(Error::InvalidInput("message is required".into()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddEventRequest {
    pub guild_id: String,
    pub mode: GameMode,
    #[serde(flatten)]
    pub event: NewEvent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddEventResponse {
    pub event_id: EventId,
}
