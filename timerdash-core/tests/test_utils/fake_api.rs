// tests/test_utils/fake_api.rs

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use timerdash_common::models::{BotStatus, EventCatalog, GameMode, GsiStatus, GuildId, LogEntry};
use timerdash_common::traits::DashboardApi;
use timerdash_core::Error;

/// What a scripted endpoint answers with.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Unavailable,
    Unauthorized,
    /// Never answers.
    Hang,
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, Error> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Unavailable => Err(Error::Status { status: 503, body: "unavailable".into() }),
            Reply::Unauthorized => Err(Error::Unauthorized("Invalid or expired token".into())),
            Reply::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
pub struct Calls {
    pub status: AtomicUsize,
    pub events: AtomicUsize,
    pub logs: AtomicUsize,
    pub gsi: AtomicUsize,
}

impl Calls {
    pub fn status(&self) -> usize {
        self.status.load(Ordering::SeqCst)
    }
    pub fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }
    pub fn logs(&self) -> usize {
        self.logs.load(Ordering::SeqCst)
    }
}

/// Hand-written fake with per-endpoint replies, an artificial status latency
/// and in-flight accounting for overlap checks.
pub struct ScriptedApi {
    pub status: Mutex<Reply<BotStatus>>,
    pub events: Mutex<Reply<EventCatalog>>,
    pub logs: Mutex<Reply<Vec<LogEntry>>>,
    pub gsi: Mutex<Reply<GsiStatus>>,
    pub status_latency: Duration,
    pub calls: Calls,
    pub event_requests: Mutex<Vec<(GuildId, GameMode)>>,
    status_in_flight: AtomicUsize,
    pub max_status_in_flight: AtomicUsize,
}

impl ScriptedApi {
    pub fn new(status: BotStatus, events: EventCatalog, logs: Vec<LogEntry>) -> Self {
        Self {
            status: Mutex::new(Reply::Ok(status)),
            events: Mutex::new(Reply::Ok(events)),
            logs: Mutex::new(Reply::Ok(logs)),
            gsi: Mutex::new(Reply::Ok(GsiStatus::default())),
            status_latency: Duration::ZERO,
            calls: Calls::default(),
            event_requests: Mutex::new(Vec::new()),
            status_in_flight: AtomicUsize::new(0),
            max_status_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_status_latency(mut self, latency: Duration) -> Self {
        self.status_latency = latency;
        self
    }

    pub fn set_status(&self, reply: Reply<BotStatus>) {
        *self.status.lock().unwrap() = reply;
    }

    pub fn set_events(&self, reply: Reply<EventCatalog>) {
        *self.events.lock().unwrap() = reply;
    }

    pub fn set_logs(&self, reply: Reply<Vec<LogEntry>>) {
        *self.logs.lock().unwrap() = reply;
    }

    pub fn set_gsi(&self, reply: Reply<GsiStatus>) {
        *self.gsi.lock().unwrap() = reply;
    }

    pub fn event_requests(&self) -> Vec<(GuildId, GameMode)> {
        self.event_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardApi for ScriptedApi {
    async fn fetch_status(&self) -> Result<BotStatus, Error> {
        self.calls.status.fetch_add(1, Ordering::SeqCst);
        let now = self.status_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_status_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.status_latency.is_zero() {
            tokio::time::sleep(self.status_latency).await;
        }
        let reply = self.status.lock().unwrap().clone();
        let result = reply.resolve().await;

        self.status_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn fetch_events(&self, guild_id: GuildId, mode: GameMode) -> Result<EventCatalog, Error> {
        self.calls.events.fetch_add(1, Ordering::SeqCst);
        self.event_requests.lock().unwrap().push((guild_id, mode));
        let reply = self.events.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn fetch_logs(&self, _limit: u32, _offset: u32) -> Result<Vec<LogEntry>, Error> {
        self.calls.logs.fetch_add(1, Ordering::SeqCst);
        let reply = self.logs.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn fetch_gsi_status(&self) -> Result<GsiStatus, Error> {
        self.calls.gsi.fetch_add(1, Ordering::SeqCst);
        let reply = self.gsi.lock().unwrap().clone();
        reply.resolve().await
    }
}
