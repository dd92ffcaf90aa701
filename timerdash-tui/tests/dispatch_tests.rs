// tests/dispatch_tests.rs
//
// Prompt commands against an in-memory bot.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use timerdash_common::models::{
    BotStatus, ControlAck, EventCatalog, EventId, GameMode, GsiStatus, GuildId, GuildSettings,
    GuildTimer, LogEntry, LoginResponse, NewEvent, SubTimer, SubTimerAction,
};
use timerdash_common::traits::{AuthApi, ControlApi, DashboardApi, EventAdminApi, SettingsApi};
use timerdash_core::{DashboardConfig, Error, SessionGuard};
use timerdash_tui::DashboardContext;
use timerdash_tui::commands::dispatch;

#[derive(Default)]
struct FakeBot {
    writes: Mutex<Vec<String>>,
    settings: Mutex<GuildSettings>,
}

impl FakeBot {
    fn record(&self, entry: String) -> ControlAck {
        self.writes.lock().unwrap().push(entry);
        ControlAck::from(serde_json::Value::Null)
    }

    fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardApi for FakeBot {
    async fn fetch_status(&self) -> Result<BotStatus, Error> {
        let mut timers = BTreeMap::new();
        timers.insert("G1".to_string(), GuildTimer { mode: GameMode::Turbo, ..Default::default() });
        Ok(BotStatus { running: true, timers })
    }
    async fn fetch_events(&self, _: GuildId, _: GameMode) -> Result<EventCatalog, Error> {
        Ok(EventCatalog::default())
    }
    async fn fetch_logs(&self, _: u32, _: u32) -> Result<Vec<LogEntry>, Error> {
        Ok(Vec::new())
    }
    async fn fetch_gsi_status(&self) -> Result<GsiStatus, Error> {
        Ok(GsiStatus::default())
    }
}

#[async_trait]
impl AuthApi for FakeBot {
    async fn login(&self, username: String, _: String) -> Result<LoginResponse, Error> {
        Ok(LoginResponse { token: "t".into(), username, role: Some("admin".into()), expiry: None })
    }
    async fn logout(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[async_trait]
impl ControlApi for FakeBot {
    async fn start_timer(&self, guild_id: GuildId, countdown: String, mode: GameMode) -> Result<ControlAck, Error> {
        Ok(self.record(format!("start {} {} {}", guild_id, countdown, mode)))
    }
    async fn stop_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error> {
        Ok(self.record(format!("stop {}", guild_id)))
    }
    async fn pause_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error> {
        Ok(self.record(format!("pause {}", guild_id)))
    }
    async fn unpause_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error> {
        Ok(self.record(format!("unpause {}", guild_id)))
    }
    async fn sub_timer(&self, guild_id: GuildId, timer: SubTimer, action: SubTimerAction) -> Result<ControlAck, Error> {
        Ok(self.record(format!("{} {} {:?}", timer, guild_id, action)))
    }
}

#[async_trait]
impl EventAdminApi for FakeBot {
    async fn add_event(&self, guild_id: GuildId, mode: GameMode, event: NewEvent) -> Result<EventId, Error> {
        self.record(format!("add {} {} {:?}", guild_id, mode, event));
        Ok(9)
    }
    async fn remove_event(&self, guild_id: GuildId, event_id: EventId) -> Result<ControlAck, Error> {
        Ok(self.record(format!("rm {} {}", guild_id, event_id)))
    }
}

#[async_trait]
impl SettingsApi for FakeBot {
    async fn fetch_settings(&self, _: GuildId) -> Result<GuildSettings, Error> {
        Ok(self.settings.lock().unwrap().clone())
    }
    async fn update_settings(&self, guild_id: GuildId, settings: GuildSettings) -> Result<ControlAck, Error> {
        *self.settings.lock().unwrap() = settings;
        Ok(self.record(format!("settings {}", guild_id)))
    }
}

fn setup() -> (Arc<FakeBot>, DashboardContext) {
    colored::control::set_override(false);
    let bot = Arc::new(FakeBot::default());
    let config = DashboardConfig { default_guild: None, ..DashboardConfig::default() };
    let ctx = DashboardContext::new(bot.clone(), Arc::new(SessionGuard::new()), config).unwrap();
    (bot, ctx)
}

async fn run(ctx: &DashboardContext, line: &str) -> String {
    let (quit, output) = dispatch(line, ctx).await;
    assert!(!quit);
    output.unwrap_or_default()
}

#[tokio::test]
async fn test_writes_need_a_selected_guild() {
    let (bot, ctx) = setup();
    let out = run(&ctx, "pause").await;
    assert!(out.contains("No guild selected"), "{}", out);
    assert!(bot.writes().is_empty());
}

#[tokio::test]
async fn test_timer_commands_target_selected_guild() {
    let (bot, ctx) = setup();
    run(&ctx, "refresh").await;
    assert_eq!(ctx.engine().view().selected_guild.as_deref(), Some("G1"));

    run(&ctx, "start 10:00").await;
    run(&ctx, "pause").await;
    run(&ctx, "roshan start").await;
    run(&ctx, "glyph cancel").await;
    assert_eq!(
        bot.writes(),
        vec![
            "start G1 10:00 turbo".to_string(),
            "pause G1".to_string(),
            "roshan G1 Start".to_string(),
            "glyph G1 Cancel".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_bad_countdown_is_rejected_locally() {
    let (bot, ctx) = setup();
    ctx.engine().select_guild("G1").unwrap();
    let out = run(&ctx, "start soon").await;
    assert!(out.starts_with("Error: Invalid input"), "{}", out);
    assert!(bot.writes().is_empty());
}

#[tokio::test]
async fn test_event_add_and_remove() {
    let (bot, ctx) = setup();
    ctx.engine().select_guild("G1").unwrap();

    let out = run(&ctx, "event add periodic 2:00 2:00 30:00 Stack camps").await;
    assert!(out.contains("Added event #9"), "{}", out);
    run(&ctx, "event rm #9").await;

    let writes = bot.writes();
    assert!(writes[0].starts_with("add G1 regular Periodic"));
    assert!(writes[0].contains("Stack camps"));
    assert_eq!(writes[1], "rm G1 9");
}

#[tokio::test]
async fn test_settings_set_round_trip() {
    let (_bot, ctx) = setup();
    ctx.engine().select_guild("G1").unwrap();

    run(&ctx, "settings set timer_channel dota-timers").await;
    let out = run(&ctx, "settings").await;
    assert!(out.contains("timer_channel            dota-timers"), "{}", out);

    let out = run(&ctx, "settings set volume 11").await;
    assert!(out.contains("unknown setting 'volume'"), "{}", out);
}

#[tokio::test]
async fn test_login_and_whoami() {
    let (_bot, ctx) = setup();
    assert_eq!(run(&ctx, "whoami").await, "Not logged in.");
    let out = run(&ctx, "login admin pw").await;
    assert!(out.contains("Logged in as admin (admin)."), "{}", out);
    assert!(ctx.scheduler().is_running());

    run(&ctx, "logout").await;
    assert!(!ctx.scheduler().is_running());
    assert!(!ctx.session().is_authenticated());
}

/// Lets the polling task pick up any pending wake-up and finish its cycle.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test(start_paused = true)]
async fn test_every_write_triggers_one_refresh() {
    let (bot, ctx) = setup();
    run(&ctx, "login admin pw").await;
    settle().await;
    let mut cycle = ctx.engine().view().cycle;
    assert_eq!(cycle, 1);
    assert_eq!(ctx.engine().view().selected_guild.as_deref(), Some("G1"));

    for line in [
        "pause",
        "roshan start",
        "event add static 10:00 Wisdom runes",
        "event rm 9",
        "settings set timer_channel dota-timers",
    ] {
        let out = run(&ctx, line).await;
        assert!(!out.contains("polling is stopped"), "{}: {}", line, out);
        settle().await;
        let next = ctx.engine().view().cycle;
        assert_eq!(next, cycle + 1, "'{}' should trigger exactly one refresh", line);
        cycle = next;
    }
    assert_eq!(bot.writes().len(), 5);
    ctx.shutdown();
}

#[tokio::test]
async fn test_interval_and_unknown_commands() {
    let (_bot, ctx) = setup();
    assert_eq!(run(&ctx, "interval 2500").await, "Polling every 2500 ms.");
    assert_eq!(ctx.scheduler().interval().as_millis(), 2500);
    assert!(run(&ctx, "interval 0").await.starts_with("Error:"));
    assert!(run(&ctx, "frobnicate").await.starts_with("Unknown command"));

    let (quit, _) = dispatch("quit", &ctx).await;
    assert!(quit);
}
