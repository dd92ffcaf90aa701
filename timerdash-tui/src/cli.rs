// File: timerdash-tui/src/cli.rs

use std::time::Duration;

use clap::Parser;

use timerdash_core::{DashboardConfig, Error};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "timerdash")]
#[command(author, version, about = "timerdash - live terminal dashboard for the game-timer bot")]
pub struct Args {
    /// Base URL of the bot's REST API (overrides TIMERDASH_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Polling interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Guild shown when no timer is running
    #[arg(long)]
    pub guild: Option<String>,

    /// Event mode used when the shown guild has no timer (regular|turbo)
    #[arg(long)]
    pub mode: Option<String>,

    #[arg(long)]
    pub log_limit: Option<u32>,

    /// Don't poll the Dota 2 GSI status
    #[arg(long, default_value = "false")]
    pub no_gsi: bool,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,
}

impl Args {
    /// Layers command line flags over an env-derived config.
    pub fn apply(&self, mut config: DashboardConfig) -> Result<DashboardConfig, Error> {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(ms) = self.interval_ms {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.timeout_ms {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(guild) = &self.guild {
            config.default_guild = Some(guild.clone()).filter(|g| !g.is_empty());
        }
        if let Some(mode) = &self.mode {
            config.default_mode = mode
                .parse()
                .map_err(|_| Error::Config(format!("--mode: unknown mode '{}'", mode)))?;
        }
        if let Some(limit) = self.log_limit {
            config.log_limit = limit;
        }
        if self.no_gsi {
            config.poll_gsi = false;
        }
        config.validate()?;
        Ok(config)
    }

    /// Flags win over TIMERDASH_USERNAME / TIMERDASH_PASSWORD.
    pub fn credentials<F>(&self, env: F) -> Option<(String, String)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = self.username.clone().or_else(|| env("TIMERDASH_USERNAME"))?;
        let password = self.password.clone().or_else(|| env("TIMERDASH_PASSWORD"))?;
        Some((username, password))
    }
}
