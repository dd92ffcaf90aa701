// File: timerdash-common/src/traits/api.rs
//
// The bot service as seen from the dashboard. Arguments are owned so the
// traits stay easy to mock.

use async_trait::async_trait;

use crate::error::Error;
use crate::models::{
    BotStatus, ControlAck, EventCatalog, EventId, GameMode, GsiStatus, GuildId, GuildSettings,
    LogEntry, LoginResponse, NewEvent, SubTimer, SubTimerAction,
};

pub trait TimerBotApi: DashboardApi + AuthApi + ControlApi + EventAdminApi + SettingsApi {}

impl<T> TimerBotApi for T
where
    T: DashboardApi + AuthApi + ControlApi + EventAdminApi + SettingsApi,
{
    // marker
}

/// Read-only endpoints polled by the sync engine.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_status(&self) -> Result<BotStatus, Error>;
    async fn fetch_events(&self, guild_id: GuildId, mode: GameMode) -> Result<EventCatalog, Error>;
    async fn fetch_logs(&self, limit: u32, offset: u32) -> Result<Vec<LogEntry>, Error>;
    async fn fetch_gsi_status(&self) -> Result<GsiStatus, Error>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: String, password: String) -> Result<LoginResponse, Error>;
    async fn logout(&self) -> Result<(), Error>;
}

#[async_trait]
pub trait ControlApi: Send + Sync {
    async fn start_timer(&self, guild_id: GuildId, countdown: String, mode: GameMode) -> Result<ControlAck, Error>;
    async fn stop_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error>;
    async fn pause_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error>;
    async fn unpause_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error>;
    async fn sub_timer(&self, guild_id: GuildId, timer: SubTimer, action: SubTimerAction) -> Result<ControlAck, Error>;
}

#[async_trait]
pub trait EventAdminApi: Send + Sync {
    async fn add_event(&self, guild_id: GuildId, mode: GameMode, event: NewEvent) -> Result<EventId, Error>;
    async fn remove_event(&self, guild_id: GuildId, event_id: EventId) -> Result<ControlAck, Error>;
}

#[async_trait]
pub trait SettingsApi: Send + Sync {
    async fn fetch_settings(&self, guild_id: GuildId) -> Result<GuildSettings, Error>;
    async fn update_settings(&self, guild_id: GuildId, settings: GuildSettings) -> Result<ControlAck, Error>;
}
