// File: timerdash-core/src/sync/scheduler.rs
//
// Drives the engine on a background task. Cycles run one after another on
// that task, so a tick or manual refresh can never overlap an in-flight
// cycle. Requests arriving mid-cycle collapse into a single follow-up cycle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use super::engine::{CycleOutcome, DashboardEngine};
use crate::Error;

struct Running {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

pub struct PollingScheduler {
    engine: Arc<DashboardEngine>,
    interval: watch::Sender<Duration>,
    wake: Arc<Notify>,
    running: Mutex<Option<Running>>,
}

impl PollingScheduler {
    pub fn new(engine: Arc<DashboardEngine>, interval: Duration) -> Result<Self, Error> {
        check_interval(interval)?;
        let (interval, _) = watch::channel(interval);
        Ok(Self {
            engine,
            interval,
            wake: Arc::new(Notify::new()),
            running: Mutex::new(None),
        })
    }

    pub fn engine(&self) -> &Arc<DashboardEngine> {
        &self.engine
    }

    pub fn interval(&self) -> Duration {
        *self.interval.borrow()
    }

    /// Reschedules the next tick at the new interval; no extra fetch.
    pub fn configure(&self, interval: Duration) -> Result<(), Error> {
        check_interval(interval)?;
        self.interval.send_replace(interval);
        info!("Polling interval set to {:?}", interval);
        Ok(())
    }

    /// Starts polling with an immediate first cycle. No-op while running.
    pub fn start(&self) {
        let mut running = self.lock();
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            debug!("Scheduler already running");
            return;
        }
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(poll_loop(
            self.engine.clone(),
            self.interval.subscribe(),
            self.wake.clone(),
            shutdown_rx,
        ));
        *running = Some(Running { handle, shutdown });
        info!("Polling started every {:?}", self.interval());
    }

    /// Cancels the pending tick and any in-flight cycle. Idempotent.
    pub fn stop(&self) {
        let Some(running) = self.lock().take() else {
            return;
        };
        let _ = running.shutdown.send(true);
        running.handle.abort();
        info!("Polling stopped");
    }

    pub fn is_running(&self) -> bool {
        self.lock().as_ref().is_some_and(|r| !r.handle.is_finished())
    }

    /// Asks for a cycle as soon as possible. Returns false when stopped.
    pub fn refresh_now(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.wake.notify_one();
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Running>> {
        // the guarded state stays consistent even if a holder panicked
        self.running.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn check_interval(interval: Duration) -> Result<(), Error> {
    if interval.is_zero() {
        return Err(Error::InvalidInput("polling interval must be positive".into()));
    }
    Ok(())
}

async fn poll_loop(
    engine: Arc<DashboardEngine>,
    mut interval: watch::Receiver<Duration>,
    wake: Arc<Notify>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut period = *interval.borrow_and_update();
    let mut next_tick = Instant::now();

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            changed = interval.changed() => {
                if changed.is_err() {
                    break;
                }
                period = *interval.borrow_and_update();
                next_tick = Instant::now() + period;
                debug!("Next refresh rescheduled in {:?}", period);
                continue;
            }
            _ = wake.notified() => debug!("Manual refresh"),
            _ = sleep_until(next_tick) => {}
        }

        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            outcome = engine.run_cycle() => log_outcome(&outcome),
        }
        next_tick = Instant::now() + period;
    }
    debug!("Polling loop exited");
}

fn log_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::Applied { cycle, failed } if failed.is_empty() => {
            debug!("Cycle {} complete", cycle)
        }
        CycleOutcome::Applied { cycle, failed } => {
            debug!("Cycle {} complete, degraded slices: {:?}", cycle, failed)
        }
        CycleOutcome::Skipped => debug!("Cycle skipped, another refresh in flight"),
        CycleOutcome::Abandoned => warn!("Cycle abandoned, session no longer valid"),
        CycleOutcome::Discarded => debug!("Cycle discarded"),
    }
}
