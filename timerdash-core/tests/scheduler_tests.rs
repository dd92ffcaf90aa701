// tests/scheduler_tests.rs
//
// Timing behaviour of the polling scheduler. Time is paused, so sleeps only
// advance the virtual clock.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use timerdash_core::{DashboardConfig, DashboardEngine, PollingScheduler};

use test_utils::fake_api::ScriptedApi;
use test_utils::fixtures::*;

const INTERVAL: Duration = Duration::from_secs(5);

fn setup(latency: Duration) -> (Arc<ScriptedApi>, Arc<DashboardEngine>, PollingScheduler) {
    let api = Arc::new(
        ScriptedApi::new(regular_status(&["A"]), catalog("A"), logs(1)).with_status_latency(latency),
    );
    let engine = Arc::new(DashboardEngine::new(api.clone(), &DashboardConfig::default()));
    let scheduler = PollingScheduler::new(engine.clone(), INTERVAL).unwrap();
    (api, engine, scheduler)
}

#[tokio::test(start_paused = true)]
async fn test_first_cycle_runs_immediately() {
    let (api, engine, scheduler) = setup(Duration::ZERO);
    let mut rx = engine.subscribe();

    scheduler.start();
    rx.changed().await.unwrap();
    assert_eq!(api.calls.status(), 1);
    assert_eq!(rx.borrow().cycle, 1);
}

#[tokio::test(start_paused = true)]
async fn test_polls_on_interval() {
    let (api, _engine, scheduler) = setup(Duration::ZERO);
    scheduler.start();

    sleep(Duration::from_millis(100)).await;
    assert_eq!(api.calls.status(), 1);

    sleep(INTERVAL).await;
    assert_eq!(api.calls.status(), 2);

    sleep(INTERVAL * 2).await;
    assert_eq!(api.calls.status(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_during_slow_cycle_never_overlaps() {
    let (api, engine, scheduler) = setup(Duration::from_secs(3));
    scheduler.start();

    sleep(Duration::from_millis(500)).await;
    assert!(engine.is_refreshing());
    for _ in 0..5 {
        assert!(scheduler.refresh_now());
    }

    // first cycle finishes at 3s, the coalesced follow-up at 6s
    sleep(Duration::from_secs(6)).await;
    assert_eq!(api.max_status_in_flight.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(api.calls.status(), 2);
    assert_eq!(engine.view().cycle, 2);
}

#[tokio::test(start_paused = true)]
async fn test_configure_reschedules_without_fetching() {
    let (api, _engine, scheduler) = setup(Duration::ZERO);
    scheduler.start();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(api.calls.status(), 1);

    scheduler.configure(Duration::from_secs(60)).unwrap();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(api.calls.status(), 1, "reconfiguring must not fetch");

    sleep(INTERVAL * 2).await;
    assert_eq!(api.calls.status(), 1, "old interval no longer applies");

    sleep(Duration::from_secs(60)).await;
    assert_eq!(api.calls.status(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stop_drops_in_flight_cycle() {
    let (api, engine, scheduler) = setup(Duration::from_secs(3));
    scheduler.start();
    sleep(Duration::from_secs(1)).await;
    assert!(engine.is_refreshing());

    scheduler.stop();
    sleep(Duration::from_secs(30)).await;

    assert_eq!(api.calls.status(), 1);
    assert_eq!(engine.view().cycle, 0, "in-flight result must not be applied");
    assert!(!engine.is_refreshing());
    assert!(!scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop() {
    let (api, engine, scheduler) = setup(Duration::ZERO);
    scheduler.start();
    sleep(Duration::from_millis(100)).await;
    scheduler.stop();

    scheduler.start();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(api.calls.status(), 2);
    assert_eq!(engine.view().cycle, 2);
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_polling() {
    let (api, _engine, scheduler) = setup(Duration::ZERO);
    scheduler.start();
    sleep(Duration::from_millis(100)).await;
    drop(scheduler);

    sleep(INTERVAL * 3).await;
    assert_eq!(api.calls.status(), 1);
}
