// File: timerdash-tui/src/commands/auth.rs

use super::{CommandError, CommandOutput, CommandResult};
use crate::context::DashboardContext;

pub async fn handle_auth_command(cmd: &str, args: &[&str], ctx: &DashboardContext) -> CommandOutput {
    match cmd {
        "login" => {
            let (Some(username), Some(password)) = (args.first(), args.get(1)) else {
                return Err(CommandError::Usage("login <username> <password>"));
            };
            let session = ctx.login(username, password).await?;
            let mut res = CommandResult::new(format!(
                "Logged in as {} ({}).",
                session.username,
                session.role.as_deref().unwrap_or("no role")
            ));
            if let Some(at) = session.expires_at {
                res.warnings.push(format!("session expires at {}", at.format("%Y-%m-%d %H:%M UTC")));
            }
            Ok(res)
        }
        "logout" => {
            let result = ctx.logout().await;
            let mut res = CommandResult::new("Logged out; polling stopped.".to_string());
            match result {
                Ok(()) => {}
                Err(timerdash_core::Error::NotLoggedIn) => return Err(CommandError::Api(timerdash_core::Error::NotLoggedIn)),
                Err(e) => res.warnings.push(format!("server did not confirm logout: {}", e)),
            }
            Ok(res)
        }
        "whoami" => match ctx.session().current() {
            Some(session) => Ok(CommandResult::new(format!(
                "{} ({})",
                session.username,
                session.role.as_deref().unwrap_or("no role")
            ))),
            None => Ok(CommandResult::new("Not logged in.".to_string())),
        },
        _ => Err(CommandError::Usage("login <username> <password> | logout | whoami")),
    }
}
