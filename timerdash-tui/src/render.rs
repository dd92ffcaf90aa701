// File: timerdash-tui/src/render.rs
//
// Plain-text rendering of a published view. Pure: takes the view, returns
// the text, never touches the terminal.

use std::fmt::Write;

use colored::Colorize;

use timerdash_common::models::{EventCatalog, GsiStatus, GuildTimer, LogEntry, LogLevel};
use timerdash_core::sync::time_format::{format_clock, format_offset};
use timerdash_core::sync::Diagnostic;
use timerdash_core::ViewModel;

pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();

    let refreshed = view
        .refreshed_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let _ = writeln!(
        out,
        "{} (refreshed {}, cycle {})",
        "=== Timer Bot Dashboard ===".bold(),
        refreshed,
        view.cycle
    );

    let bot = if view.status.running { "ONLINE".green().bold() } else { "OFFLINE".red().bold() };
    let _ = writeln!(out, "Bot: {}   Active timers: {}", bot, view.status.active_count());

    render_guilds(&mut out, view);
    render_events(&mut out, view);
    if let Some(gsi) = &view.gsi {
        render_gsi(&mut out, gsi);
    }
    render_logs(&mut out, &view.logs);
    if !view.diagnostics.is_empty() {
        let _ = writeln!(out, "{}", render_diagnostics(&view.diagnostics).yellow());
    }
    out
}

fn render_guilds(out: &mut String, view: &ViewModel) {
    if view.status.timers.is_empty() {
        let _ = writeln!(out, "No active timers.");
    } else {
        let listing: Vec<String> = view
            .status
            .timers
            .iter()
            .map(|(guild, timer)| {
                let marker = if view.selected_guild.as_deref() == Some(guild.as_str()) { "*" } else { " " };
                format!("{}{} ({}, {})", marker, guild, timer.mode, format_clock(Some(timer.elapsed_seconds)))
            })
            .collect();
        let _ = writeln!(out, "Guilds: {}", listing.join(" | "));
    }

    match (&view.selected_guild, view.selected_timer()) {
        (Some(guild), Some(timer)) => render_timer(out, guild, timer),
        (Some(guild), None) => {
            let _ = writeln!(out, "Guild {}: no timer running", guild.cyan());
        }
        (None, _) => {
            let _ = writeln!(out, "No guild selected.");
        }
    }
}

fn render_timer(out: &mut String, guild: &str, timer: &GuildTimer) {
    let clock = format_clock(Some(timer.elapsed_seconds));
    let paused = if timer.paused { " [PAUSED]".yellow().to_string() } else { String::new() };
    let _ = writeln!(out, "Guild {}: {} {}{}", guild.cyan(), timer.mode, clock.bold(), paused);
    let _ = writeln!(
        out,
        "  Roshan: {}  Glyph: {}  Tormentor: {}",
        flag(timer.roshan_active),
        flag(timer.glyph_active),
        flag(timer.tormentor_active)
    );
    if !timer.recent_events.is_empty() {
        let _ = writeln!(out, "  Recent: {}", timer.recent_events.join("; "));
    }
}

fn flag(active: bool) -> String {
    if active { "active".green().to_string() } else { "-".dimmed().to_string() }
}

fn render_events(out: &mut String, view: &ViewModel) {
    let guild = view.catalog_guild.as_deref().unwrap_or("?");
    let _ = writeln!(out, "Events for guild {}:", guild);
    let _ = write!(out, "{}", render_catalog(&view.events));
}

pub fn render_catalog(catalog: &EventCatalog) -> String {
    let mut out = String::new();
    if catalog.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }
    for (id, event) in &catalog.static_events {
        let _ = writeln!(out, "  #{:<4} at {:>6}  {} ({})", id, format_offset(event.time), event.message, event.mode);
    }
    for (id, event) in &catalog.periodic_events {
        let _ = writeln!(
            out,
            "  #{:<4} from {} every {} until {}  {} ({})",
            id,
            format_offset(event.start_time),
            format_offset(event.interval),
            format_offset(event.end_time),
            event.message,
            event.mode
        );
    }
    out
}

fn render_gsi(out: &mut String, gsi: &GsiStatus) {
    if !gsi.connected {
        let _ = writeln!(out, "GSI: {}", "not connected".dimmed());
        return;
    }
    let mut parts = vec!["connected".green().to_string()];
    if gsi.in_game {
        parts.push("in game".to_string());
        if let Some(mode) = gsi.game_mode_label() {
            parts.push(mode);
        }
        if let Some(id) = &gsi.match_id {
            parts.push(format!("match {}", id));
        }
        if gsi.game_time.is_some() {
            parts.push(format_clock(gsi.game_time));
        }
        if let Some(team) = gsi.team_label() {
            parts.push(team);
        }
    }
    if let Some(ago) = gsi.last_update_seconds_ago {
        parts.push(format!("updated {:.1}s ago", ago));
    }
    let _ = writeln!(out, "GSI: {}", parts.join(", "));
}

fn render_logs(out: &mut String, logs: &[LogEntry]) {
    let _ = writeln!(out, "Logs ({}):", logs.len());
    for entry in logs {
        let level = match &entry.level {
            LogLevel::Error | LogLevel::Critical => entry.level.to_string().red(),
            LogLevel::Warn => entry.level.to_string().yellow(),
            LogLevel::Debug => entry.level.to_string().dimmed(),
            _ => entry.level.to_string().normal(),
        };
        if entry.timestamp.is_empty() {
            let _ = writeln!(out, "  {}", entry.message);
        } else {
            let _ = writeln!(out, "  [{}] {} {}", entry.timestamp, level, entry.message);
        }
    }
}

/// One-line error indicator naming the slices that fell back.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let details: Vec<String> = diagnostics
        .iter()
        .map(|d| format!("{} ({})", d.slice, d.message))
        .collect();
    format!("! Refresh problems: {}", details.join("; "))
}
