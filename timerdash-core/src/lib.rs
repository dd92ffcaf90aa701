// ========================================================
// File: timerdash-core/src/lib.rs
// ========================================================

pub mod client;
pub mod config;
pub mod http;
pub mod session;
pub mod sync;

pub use timerdash_common::Error;

pub use client::RestClient;
pub use config::DashboardConfig;
pub use session::{Session, SessionGuard, SessionState};
pub use sync::{CycleOutcome, DashboardEngine, PollingScheduler, ViewModel};
