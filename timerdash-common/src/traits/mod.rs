pub mod api;

pub use api::{AuthApi, ControlApi, DashboardApi, EventAdminApi, SettingsApi, TimerBotApi};
