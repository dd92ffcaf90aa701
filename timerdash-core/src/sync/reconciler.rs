// File: timerdash-core/src/sync/reconciler.rs

use timerdash_common::models::{BotStatus, EventCatalog, GsiStatus, GuildId, LogEntry};

use super::guild_selector::GuildSelector;
use super::isolation::Fetched;
use super::{Diagnostic, Slice, ViewModel};

/// Raw results of one cycle, one entry per slice.
#[derive(Debug, Clone)]
pub struct FetchedSlices {
    pub status: Fetched<BotStatus>,
    pub events: Fetched<EventCatalog>,
    /// Guild the events fetch was issued for.
    pub events_guild: Option<GuildId>,
    pub logs: Fetched<Vec<LogEntry>>,
    pub gsi: Fetched<GsiStatus>,
}

impl FetchedSlices {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        [
            self.status.diagnostic(),
            self.events.diagnostic(),
            self.logs.diagnostic(),
            self.gsi.diagnostic(),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    pub fn failed_slices(&self) -> Vec<Slice> {
        self.diagnostics().iter().map(|d| d.slice).collect()
    }

    pub fn any_unauthorized(&self) -> bool {
        self.status.is_unauthorized()
            || self.events.is_unauthorized()
            || self.logs.is_unauthorized()
            || self.gsi.is_unauthorized()
    }
}

/// Merges a cycle's results into the prior view.
///
/// | slice  | on failure              |
/// |--------|-------------------------|
/// | status | offline (no timers)     |
/// | events | prior catalog retained  |
/// | logs   | empty                   |
/// | gsi    | none                    |
///
/// The selected guild is recomputed from the reconciled status, using the
/// prior selection as the sticky candidate. Bookkeeping (`cycle`,
/// `refreshed_at`) is carried over untouched.
pub fn reconcile(prior: &ViewModel, fetched: FetchedSlices, selector: &GuildSelector) -> ViewModel {
    let diagnostics = fetched.diagnostics();

    let status = fetched.status.ok().unwrap_or_else(BotStatus::offline);

    let (events, catalog_guild) = match fetched.events {
        Fetched::Ok(catalog) => (catalog, fetched.events_guild),
        Fetched::Failed(_) | Fetched::Skipped => (prior.events.clone(), prior.catalog_guild.clone()),
    };

    let logs = fetched.logs.ok().unwrap_or_default();
    let gsi = fetched.gsi.ok();

    let selected_guild = selector.select(prior.selected_guild.as_deref(), status.active_guild_ids());

    ViewModel {
        status,
        events,
        logs,
        gsi,
        selected_guild,
        catalog_guild,
        diagnostics,
        cycle: prior.cycle,
        refreshed_at: prior.refreshed_at,
    }
}
