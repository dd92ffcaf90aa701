// File: timerdash-tui/src/commands/view.rs

use std::time::Duration;

use timerdash_core::CycleOutcome;

use super::{CommandError, CommandOutput, CommandResult};
use crate::context::DashboardContext;
use crate::render::render_view;

pub async fn handle_view_command(cmd: &str, args: &[&str], ctx: &DashboardContext) -> CommandOutput {
    match cmd {
        "show" => Ok(CommandResult::new(render_view(&ctx.engine().view()))),
        "refresh" => refresh(ctx).await,
        "select" => {
            let guild = args.first().ok_or(CommandError::Usage("select <guild>"))?;
            ctx.engine().select_guild(guild)?;
            let active = ctx.engine().view().status.timer(guild).is_some();
            let mut res = CommandResult::with_warning(format!("Selected guild {}.", guild), ctx.after_write());
            if !active {
                res.warnings.push(format!(
                    "guild {} has no running timer; the next refresh may switch away from it",
                    guild
                ));
            }
            Ok(res)
        }
        "interval" => {
            let usage = CommandError::Usage("interval <milliseconds>");
            let ms: u64 = match args.first().map(|s| s.parse()) {
                Some(Ok(ms)) => ms,
                _ => return Err(usage),
            };
            ctx.scheduler().configure(Duration::from_millis(ms))?;
            Ok(CommandResult::new(format!("Polling every {} ms.", ms)))
        }
        _ => Err(CommandError::Usage("show | refresh | select <guild> | interval <ms>")),
    }
}

async fn refresh(ctx: &DashboardContext) -> CommandOutput {
    if ctx.scheduler().refresh_now() {
        return Ok(CommandResult::new("Refresh requested.".to_string()));
    }
    // polling is stopped: run one cycle inline
    let text = match ctx.engine().run_cycle().await {
        CycleOutcome::Applied { .. } => render_view(&ctx.engine().view()),
        CycleOutcome::Skipped => "A refresh is already running.".to_string(),
        CycleOutcome::Abandoned => return Err(CommandError::Api(timerdash_core::Error::NotLoggedIn)),
        CycleOutcome::Discarded => "Dashboard is shutting down.".to_string(),
    };
    Ok(CommandResult::new(text))
}
