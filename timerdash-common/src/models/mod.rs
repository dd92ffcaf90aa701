// File: timerdash-common/src/models/mod.rs
pub mod lenient;
pub mod status;
pub mod events;
pub mod logs;
pub mod gsi;
pub mod auth;
pub mod settings;
pub mod control;
pub mod envelope;

pub use status::{BotStatus, GameMode, GuildId, GuildTimer};
pub use events::{AddEventRequest, AddEventResponse, EventCatalog, EventId, NewEvent, PeriodicEvent, StaticEvent};
pub use logs::{LogEntry, LogLevel};
pub use gsi::GsiStatus;
pub use auth::{LoginRequest, LoginResponse};
pub use settings::{GuildSettings, UpdateSettingsRequest};
pub use control::{ControlAck, GuildRequest, StartTimerRequest, SubTimer, SubTimerAction, SubTimerRequest};
pub use envelope::Envelope;
