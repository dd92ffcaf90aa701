// File: timerdash-tui/src/context.rs
//
// Everything a prompt command needs: the API, the session, the sync engine
// and its scheduler.

use std::sync::Arc;

use tracing::info;

use timerdash_common::models::{GameMode, GuildId};
use timerdash_common::traits::TimerBotApi;
use timerdash_core::{DashboardConfig, DashboardEngine, Error, PollingScheduler, Session, SessionGuard};

use crate::commands::CommandError;

pub struct DashboardContext {
    api: Arc<dyn TimerBotApi>,
    session: Arc<SessionGuard>,
    engine: Arc<DashboardEngine>,
    scheduler: PollingScheduler,
    config: DashboardConfig,
}

impl DashboardContext {
    pub fn new<A>(api: Arc<A>, session: Arc<SessionGuard>, config: DashboardConfig) -> Result<Self, Error>
    where
        A: TimerBotApi + 'static,
    {
        let engine = Arc::new(DashboardEngine::new(api.clone(), &config));
        let scheduler = PollingScheduler::new(engine.clone(), config.poll_interval)?;
        Ok(Self { api, session, engine, scheduler, config })
    }

    pub fn api(&self) -> &dyn TimerBotApi {
        self.api.as_ref()
    }

    pub fn session(&self) -> &Arc<SessionGuard> {
        &self.session
    }

    pub fn engine(&self) -> &Arc<DashboardEngine> {
        &self.engine
    }

    pub fn scheduler(&self) -> &PollingScheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Guild that write commands act on.
    pub fn target_guild(&self) -> Result<GuildId, CommandError> {
        self.engine
            .view()
            .selected_guild
            .ok_or(CommandError::NoGuildSelected)
    }

    /// Mode of the selected guild's running timer, else the configured default.
    pub fn target_mode(&self) -> GameMode {
        self.engine
            .view()
            .selected_timer()
            .map(|t| t.mode)
            .unwrap_or(self.config.default_mode)
    }

    /// Called after every successful write so the view catches up quickly.
    /// Returns a warning when nothing could be scheduled.
    pub fn after_write(&self) -> Option<String> {
        if self.scheduler.refresh_now() {
            None
        } else {
            Some("polling is stopped; run 'refresh' to update the view".to_string())
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, Error> {
        let session = self.session.login(self.api(), username, password).await?;
        self.scheduler.start();
        Ok(session)
    }

    pub async fn logout(&self) -> Result<(), Error> {
        self.scheduler.stop();
        self.session.logout(self.api()).await
    }

    pub fn shutdown(&self) {
        self.scheduler.stop();
        self.engine.close();
        info!("Dashboard shut down");
    }
}
