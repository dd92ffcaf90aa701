// File: timerdash-tui/src/commands/events.rs

use timerdash_common::models::{EventId, NewEvent};
use timerdash_common::traits::EventAdminApi;
use timerdash_core::sync::time_format::parse_clock;

use super::{CommandError, CommandOutput, CommandResult};
use crate::context::DashboardContext;
use crate::render::render_catalog;

const USAGE: &str = "event list | event add static <time> <message...> | \
event add periodic <start> <interval> <end> <message...> | event rm <id>";

pub async fn handle_event_command(args: &[&str], ctx: &DashboardContext) -> CommandOutput {
    match args.first().copied() {
        None | Some("list") => {
            let view = ctx.engine().view();
            let guild = view.catalog_guild.as_deref().unwrap_or("?");
            Ok(CommandResult::new(format!(
                "Events for guild {} ({} total):\n{}",
                guild,
                view.events.len(),
                render_catalog(&view.events)
            )))
        }
        Some("add") => {
            let event = parse_new_event(&args[1..])?;
            event.validate()?;
            let guild = ctx.target_guild()?;
            let mode = ctx.target_mode();
            let id = ctx.api().add_event(guild.clone(), mode, event).await?;
            Ok(CommandResult::with_warning(
                format!("Added event #{} for guild {} ({}).", id, guild, mode),
                ctx.after_write(),
            ))
        }
        Some("rm") | Some("remove") => {
            let id: EventId = args
                .get(1)
                .and_then(|raw| raw.trim_start_matches('#').parse().ok())
                .ok_or(CommandError::Usage("event rm <id>"))?;
            let guild = ctx.target_guild()?;
            let ack = ctx.api().remove_event(guild, id).await?;
            let message = ack.message.unwrap_or_else(|| format!("Removed event #{}.", id));
            Ok(CommandResult::with_warning(message, ctx.after_write()))
        }
        Some(_) => Err(CommandError::Usage(USAGE)),
    }
}

/// `static <time> <message...>` or `periodic <start> <interval> <end> <message...>`.
pub fn parse_new_event(args: &[&str]) -> Result<NewEvent, CommandError> {
    match args.first().copied() {
        Some("static") if args.len() >= 3 => Ok(NewEvent::Static {
            time: match_time(args[1])?,
            message: args[2..].join(" "),
        }),
        Some("periodic") if args.len() >= 5 => Ok(NewEvent::Periodic {
            start_time: match_time(args[1])?,
            interval: match_time(args[2])?,
            end_time: match_time(args[3])?,
            message: args[4..].join(" "),
        }),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

/// Event offsets are measured from the horn, so they can't be negative.
fn match_time(raw: &str) -> Result<u64, CommandError> {
    let seconds = parse_clock(raw)?;
    u64::try_from(seconds)
        .map_err(|_| CommandError::InvalidInput(format!("'{}' must not be negative", raw)))
}
