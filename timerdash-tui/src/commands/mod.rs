// File: timerdash-tui/src/commands/mod.rs

use colored::Colorize;

use timerdash_core::Error;

use crate::context::DashboardContext;

pub mod auth;
pub mod events;
pub mod settings;
pub mod timer;
pub mod view;

/// Result type that can include both data and warnings
pub struct CommandResult<T> {
    pub data: T,
    pub warnings: Vec<String>,
}

impl<T> CommandResult<T> {
    pub fn new(data: T) -> Self {
        Self { data, warnings: vec![] }
    }

    pub fn with_warning(data: T, warning: Option<String>) -> Self {
        Self { data, warnings: warning.into_iter().collect() }
    }
}

#[derive(Debug)]
pub enum CommandError {
    Api(Error),
    InvalidInput(String),
    Usage(&'static str),
    NoGuildSelected,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Api(Error::Unauthorized(msg)) => write!(f, "Not authorized ({}). Use 'login'.", msg),
            CommandError::Api(e) => write!(f, "{}", e),
            CommandError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CommandError::Usage(usage) => write!(f, "Usage: {}", usage),
            CommandError::NoGuildSelected => write!(f, "No guild selected. Use 'select <guild>'."),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<Error> for CommandError {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidInput(msg) => CommandError::InvalidInput(msg),
            other => CommandError::Api(other),
        }
    }
}

pub type CommandOutput = Result<CommandResult<String>, CommandError>;

const HELP: &str = "\
Commands:
  help
  show                                   print the current view
  refresh                                refresh now
  select <guild>                         show another guild
  interval <ms>                          change the polling interval
  start <MM:SS|seconds> [regular|turbo]  start the selected guild's timer
  stop | pause | unpause
  roshan|glyph|tormentor <start|cancel>
  event list
  event add static <time> <message...>
  event add periodic <start> <interval> <end> <message...>
  event rm <id>
  settings
  settings set <key> <value...>
  login <username> <password>
  logout
  whoami
  quit
";

/// Runs one prompt line. Returns `(quit_requested, output)`.
pub async fn dispatch(line: &str, ctx: &DashboardContext) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();
    let args = parts.get(1..).unwrap_or(&[]);

    let result = match cmd.as_str() {
        "" => return (false, None),
        "help" => return (false, Some(HELP.to_string())),
        "quit" | "exit" => return (true, Some("(timerdash) shutting down...".to_string())),
        "show" | "refresh" | "select" | "interval" => view::handle_view_command(&cmd, args, ctx).await,
        "start" | "stop" | "pause" | "unpause" => timer::handle_timer_command(&cmd, args, ctx).await,
        "roshan" | "rosh" | "glyph" | "tormentor" => timer::handle_sub_timer_command(&cmd, args, ctx).await,
        "event" | "events" => events::handle_event_command(args, ctx).await,
        "settings" => settings::handle_settings_command(args, ctx).await,
        "login" | "logout" | "whoami" => auth::handle_auth_command(&cmd, args, ctx).await,
        _ => return (false, Some(format!("Unknown command '{}'. Type 'help' for usage.", cmd))),
    };

    (false, Some(format_output(result)))
}

fn format_output(result: CommandOutput) -> String {
    match result {
        Ok(res) => {
            let mut text = res.data;
            for warning in res.warnings {
                text.push('\n');
                text.push_str(&format!("Warning: {}", warning).yellow().to_string());
            }
            text
        }
        Err(e) => format!("Error: {}", e).red().to_string(),
    }
}
