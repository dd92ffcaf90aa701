// File: timerdash-tui/src/commands/timer.rs

use timerdash_common::models::{GameMode, SubTimer, SubTimerAction};
use timerdash_common::traits::ControlApi;
use timerdash_core::sync::time_format::parse_clock;

use super::{CommandError, CommandOutput, CommandResult};
use crate::context::DashboardContext;

pub async fn handle_timer_command(cmd: &str, args: &[&str], ctx: &DashboardContext) -> CommandOutput {
    let guild = ctx.target_guild()?;
    let ack = match cmd {
        "start" => {
            let countdown = args
                .first()
                .ok_or(CommandError::Usage("start <MM:SS|seconds> [regular|turbo]"))?;
            // the bot parses the countdown itself; only reject obvious typos here
            parse_clock(countdown)?;
            let mode = match args.get(1) {
                Some(raw) => raw.parse::<GameMode>()?,
                None => ctx.target_mode(),
            };
            ctx.api().start_timer(guild.clone(), countdown.to_string(), mode).await?
        }
        "stop" => ctx.api().stop_timer(guild.clone()).await?,
        "pause" => ctx.api().pause_timer(guild.clone()).await?,
        "unpause" => ctx.api().unpause_timer(guild.clone()).await?,
        _ => return Err(CommandError::Usage("start | stop | pause | unpause")),
    };

    let message = ack.message.unwrap_or_else(|| format!("{} sent for guild {}.", cmd, guild));
    Ok(CommandResult::with_warning(message, ctx.after_write()))
}

pub async fn handle_sub_timer_command(cmd: &str, args: &[&str], ctx: &DashboardContext) -> CommandOutput {
    let usage = CommandError::Usage("roshan|glyph|tormentor <start|cancel>");
    let timer: SubTimer = cmd.parse()?;
    let action: SubTimerAction = match args.first() {
        Some(raw) => raw.parse()?,
        None => return Err(usage),
    };
    let guild = ctx.target_guild()?;
    let ack = ctx.api().sub_timer(guild, timer, action).await?;
    let message = ack.message.unwrap_or_else(|| format!("{} {:?} sent.", timer, action));
    Ok(CommandResult::with_warning(message, ctx.after_write()))
}
