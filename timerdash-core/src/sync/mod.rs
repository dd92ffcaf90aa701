// File: timerdash-core/src/sync/mod.rs
//
// Polling state synchronisation: fetch the independent slices, isolate their
// failures, reconcile into one ViewModel, publish it atomically.

pub mod time_format;
pub mod isolation;
pub mod guild_selector;
pub mod reconciler;
pub mod engine;
pub mod scheduler;

use std::fmt;

use chrono::{DateTime, Utc};

use timerdash_common::FailureKind;
use timerdash_common::models::{BotStatus, EventCatalog, GsiStatus, GuildId, GuildTimer, LogEntry};

pub use engine::{CycleOutcome, DashboardEngine};
pub use guild_selector::GuildSelector;
pub use isolation::{Fetched, isolate, isolate_within};
pub use reconciler::{FetchedSlices, reconcile};
pub use scheduler::PollingScheduler;

/// One independently fetched part of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slice {
    Status,
    Events,
    Logs,
    Gsi,
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slice::Status => "status",
            Slice::Events => "events",
            Slice::Logs => "logs",
            Slice::Gsi => "gsi",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub slice: Slice,
    pub kind: FailureKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Everything the dashboard renders. Replaced wholesale, never patched
/// field by field from concurrent fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub status: BotStatus,
    pub events: EventCatalog,
    pub logs: Vec<LogEntry>,
    pub gsi: Option<GsiStatus>,
    pub selected_guild: Option<GuildId>,
    /// Guild the event catalog belongs to; lags `selected_guild` when the
    /// last events fetch failed.
    pub catalog_guild: Option<GuildId>,
    /// Failures of the cycle that produced this view.
    pub diagnostics: Vec<Diagnostic>,
    pub cycle: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl ViewModel {
    pub fn selected_timer(&self) -> Option<&GuildTimer> {
        self.selected_guild
            .as_deref()
            .and_then(|guild| self.status.timer(guild))
    }

    pub fn failed_slices(&self) -> Vec<Slice> {
        self.diagnostics.iter().map(|d| d.slice).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
