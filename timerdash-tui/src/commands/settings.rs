// File: timerdash-tui/src/commands/settings.rs

use timerdash_common::models::GuildSettings;
use timerdash_common::traits::SettingsApi;

use super::{CommandError, CommandOutput, CommandResult};
use crate::context::DashboardContext;

pub async fn handle_settings_command(args: &[&str], ctx: &DashboardContext) -> CommandOutput {
    let guild = ctx.target_guild()?;
    match args.first().copied() {
        None | Some("show") => {
            let settings = ctx.api().fetch_settings(guild.clone()).await?;
            Ok(CommandResult::new(format_settings(&guild, &settings)))
        }
        Some("set") if args.len() >= 3 => {
            let key = args[1];
            let value = args[2..].join(" ");
            let mut settings = ctx.api().fetch_settings(guild.clone()).await?;
            settings.set(key, &value).map_err(CommandError::InvalidInput)?;
            let ack = ctx.api().update_settings(guild.clone(), settings).await?;
            let message = ack.message.unwrap_or_else(|| format!("Set {} = {} for guild {}.", key, value, guild));
            Ok(CommandResult::with_warning(message, ctx.after_write()))
        }
        _ => Err(CommandError::Usage("settings | settings set <key> <value...>")),
    }
}

pub fn format_settings(guild: &str, settings: &GuildSettings) -> String {
    format!(
        "Settings for guild {}:\n  prefix                   {}\n  timer_channel            {}\n  voice_channel            {}\n  tts_language             {}\n  mindful_messages_enabled {}",
        guild,
        settings.prefix,
        settings.timer_channel,
        settings.voice_channel,
        settings.tts_language,
        settings.mindful_messages_enabled
    )
}
