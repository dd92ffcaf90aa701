// tests/test_utils/fixtures.rs

use std::collections::BTreeMap;

use timerdash_common::models::{
    BotStatus, EventCatalog, GameMode, GsiStatus, GuildTimer, LogEntry, LogLevel, PeriodicEvent,
    StaticEvent,
};

pub fn status_with(guilds: &[(&str, GameMode, i64)]) -> BotStatus {
    let timers: BTreeMap<_, _> = guilds
        .iter()
        .map(|(id, mode, elapsed)| {
            (
                id.to_string(),
                GuildTimer {
                    mode: *mode,
                    elapsed_seconds: *elapsed,
                    recent_events: vec!["Rune spawn".into()],
                    ..Default::default()
                },
            )
        })
        .collect();
    BotStatus { running: true, timers }
}

pub fn regular_status(guilds: &[&str]) -> BotStatus {
    let rows: Vec<_> = guilds.iter().map(|g| (*g, GameMode::Regular, 300)).collect();
    status_with(&rows)
}

pub fn catalog(label: &str) -> EventCatalog {
    let mut catalog = EventCatalog::default();
    catalog.static_events.insert(
        1,
        StaticEvent { time: 600, mode: GameMode::Regular, message: format!("{} static", label) },
    );
    catalog.periodic_events.insert(
        2,
        PeriodicEvent {
            start_time: 120,
            interval: 120,
            end_time: 1800,
            mode: GameMode::Regular,
            message: format!("{} periodic", label),
        },
    );
    catalog
}

pub fn logs(count: usize) -> Vec<LogEntry> {
    (0..count)
        .map(|i| LogEntry {
            timestamp: format!("2025-05-01 10:00:{:02}", i),
            level: LogLevel::Info,
            message: format!("line {}", i),
            ..Default::default()
        })
        .collect()
}

pub fn gsi_in_game() -> GsiStatus {
    GsiStatus {
        connected: true,
        last_update_seconds_ago: Some(1.5),
        in_game: true,
        game_mode: Some("all_pick".into()),
        match_id: Some("7712345678".into()),
        game_time: Some(-45),
        player_team: Some("radiant".into()),
    }
}
