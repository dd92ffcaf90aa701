// File: timerdash-core/src/sync/engine.rs
//
// One refresh cycle: status -> guild -> events, alongside logs and GSI, then
// reconcile and publish. The engine never fails a cycle; failures end up as
// diagnostics on the published view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use timerdash_common::models::{BotStatus, EventCatalog, GameMode, GsiStatus, GuildId};
use timerdash_common::traits::DashboardApi;

use super::guild_selector::GuildSelector;
use super::isolation::{Fetched, isolate_within};
use super::reconciler::{FetchedSlices, reconcile};
use super::{Slice, ViewModel};
use crate::Error;
use crate::config::DashboardConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new view was published. `failed` lists the slices that fell back.
    Applied { cycle: u64, failed: Vec<Slice> },
    /// Another cycle was already in flight.
    Skipped,
    /// The server rejected the session; the view was left alone.
    Abandoned,
    /// The engine was closed while the cycle was in flight.
    Discarded,
}

pub struct DashboardEngine {
    api: Arc<dyn DashboardApi>,
    selector: GuildSelector,
    default_mode: GameMode,
    log_limit: u32,
    poll_gsi: bool,
    fetch_timeout: Duration,
    view: watch::Sender<ViewModel>,
    refreshing: AtomicBool,
    closed: AtomicBool,
    cycles: AtomicU64,
}

/// Clears the refreshing flag however the cycle ends, including when its
/// future is dropped mid-flight.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DashboardEngine {
    pub fn new(api: Arc<dyn DashboardApi>, config: &DashboardConfig) -> Self {
        let (view, _) = watch::channel(ViewModel::default());
        Self {
            api,
            selector: GuildSelector::new(config.default_guild.clone()),
            default_mode: config.default_mode,
            log_limit: config.log_limit,
            poll_gsi: config.poll_gsi,
            fetch_timeout: config.request_timeout,
            view,
            refreshing: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            cycles: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view.subscribe()
    }

    /// Snapshot of the latest published view.
    pub fn view(&self) -> ViewModel {
        self.view.borrow().clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn selector(&self) -> &GuildSelector {
        &self.selector
    }

    /// Operator override. Visible immediately; the next cycle keeps it while
    /// the guild stays active.
    pub fn select_guild(&self, guild_id: &str) -> Result<(), Error> {
        let guild_id = guild_id.trim();
        if guild_id.is_empty() {
            return Err(Error::InvalidInput("guild id must not be empty".into()));
        }
        self.view.send_modify(|view| view.selected_guild = Some(guild_id.to_string()));
        info!("Selected guild {}", guild_id);
        Ok(())
    }

    /// Stops publishing; cycles still in flight are discarded.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!("Dashboard engine closed");
        }
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Refresh already in flight, skipping");
            return CycleOutcome::Skipped;
        }
        let _guard = RefreshGuard(&self.refreshing);

        let prior_selection = self.view.borrow().selected_guild.clone();
        let ((status, events, events_guild), logs, gsi) = tokio::join!(
            self.fetch_status_and_events(prior_selection),
            isolate_within(Slice::Logs, self.fetch_timeout, self.api.fetch_logs(self.log_limit, 0)),
            self.fetch_gsi(),
        );
        let fetched = FetchedSlices { status, events, events_guild, logs, gsi };

        if fetched.any_unauthorized() {
            warn!("Session rejected by the server, abandoning refresh");
            return CycleOutcome::Abandoned;
        }
        if self.is_closed() {
            debug!("Engine closed during refresh, discarding results");
            return CycleOutcome::Discarded;
        }

        let failed = fetched.failed_slices();
        let cycle = self.cycles.fetch_add(1, Ordering::AcqRel) + 1;
        let refreshed_at = Utc::now();
        // reconcile against whatever is published right now, so a selection
        // made during the fetch is honoured
        self.view.send_modify(|view| {
            let mut next = reconcile(view, fetched, &self.selector);
            next.cycle = cycle;
            next.refreshed_at = Some(refreshed_at);
            *view = next;
        });

        if failed.is_empty() {
            debug!("Refresh #{} applied", cycle);
        } else {
            debug!("Refresh #{} applied with failed slices {:?}", cycle, failed);
        }
        CycleOutcome::Applied { cycle, failed }
    }

    async fn fetch_status_and_events(
        &self,
        prior_selection: Option<GuildId>,
    ) -> (Fetched<BotStatus>, Fetched<EventCatalog>, Option<GuildId>) {
        let status = isolate_within(Slice::Status, self.fetch_timeout, self.api.fetch_status()).await;

        let target = match &status {
            Fetched::Ok(s) => self
                .selector
                .select(prior_selection.as_deref(), s.active_guild_ids())
                .map(|guild| {
                    let mode = s.timer(&guild).map(|t| t.mode).unwrap_or(self.default_mode);
                    (guild, mode)
                }),
            _ => None,
        };
        let Some((guild, mode)) = target else {
            return (status, Fetched::Skipped, None);
        };

        let events = isolate_within(
            Slice::Events,
            self.fetch_timeout,
            self.api.fetch_events(guild.clone(), mode),
        )
        .await;
        (status, events, Some(guild))
    }

    async fn fetch_gsi(&self) -> Fetched<GsiStatus> {
        if !self.poll_gsi {
            return Fetched::Skipped;
        }
        isolate_within(Slice::Gsi, self.fetch_timeout, self.api.fetch_gsi_status()).await
    }
}
