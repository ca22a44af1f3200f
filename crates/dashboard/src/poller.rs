//! Background refresh of the dashboard state.
//!
//! Two tasks run until [`PollerHandle::shutdown`]: a fetch loop on the poll
//! interval (first fetch immediately) and a clock that ticks the state every
//! second. At most one fetch is in flight; ticks that land while one is still
//! running are skipped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use common::format::{format_date, offset_from_minutes};
use tokio::sync::{Notify, RwLock, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::client::ChecklistClient;
use crate::state::DashboardState;

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    pub clock_interval: Duration,
    /// Offset used to decide which checks happened "today".
    pub utc_offset_minutes: i32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            clock_interval: Duration::from_secs(1),
            utc_offset_minutes: -180,
        }
    }
}

struct Shared {
    state: RwLock<DashboardState>,
    in_flight: Arc<AtomicBool>,
    closed: AtomicBool,
    refresh: Notify,
    version: watch::Sender<u64>,
}

impl Shared {
    fn bump(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }
}

/// Holds the in-flight flag for the lifetime of one fetch, aborted or not.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Poller {
    client: ChecklistClient,
    config: PollerConfig,
}

impl Poller {
    pub fn new(client: ChecklistClient, config: PollerConfig) -> Self {
        Self { client, config }
    }

    /// Starts the fetch loop and the clock on the current runtime.
    pub fn spawn(self) -> PollerHandle {
        let (version, _) = watch::channel(0);
        let shared = Arc::new(Shared {
            state: RwLock::new(DashboardState::new(Utc::now())),
            in_flight: Arc::new(AtomicBool::new(false)),
            closed: AtomicBool::new(false),
            refresh: Notify::new(),
            version,
        });
        let (shutdown, shutdown_rx) = watch::channel(false);

        tracing::info!(
            url = %self.client.url(),
            interval_secs = self.config.interval.as_secs_f64(),
            "starting dashboard poller"
        );

        let tasks = vec![
            tokio::spawn(fetch_loop(
                Arc::clone(&shared),
                self.client,
                self.config.clone(),
                shutdown_rx.clone(),
            )),
            tokio::spawn(clock_loop(
                Arc::clone(&shared),
                self.config.clock_interval,
                shutdown_rx,
            )),
        ];

        PollerHandle {
            shared,
            shutdown,
            tasks,
        }
    }
}

async fn fetch_loop(
    shared: Arc<Shared>,
    client: ChecklistClient,
    config: PollerConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut fetches = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => start_fetch(&shared, &client, &config, &mut fetches).await,
            () = shared.refresh.notified() => {
                tracing::debug!("manual refresh requested");
                start_fetch(&shared, &client, &config, &mut fetches).await;
            }
            Some(joined) = fetches.join_next() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!(error = %e, "fetch task panicked");
                    }
                }
            }
        }
    }

    fetches.abort_all();
    tracing::debug!("fetch loop stopped");
}

async fn start_fetch(
    shared: &Arc<Shared>,
    client: &ChecklistClient,
    config: &PollerConfig,
    fetches: &mut JoinSet<()>,
) {
    let Some(guard) = InFlightGuard::try_acquire(&shared.in_flight) else {
        tracing::debug!("previous fetch still running, skipping tick");
        metrics::counter!("dashboard_fetches_skipped_total").increment(1);
        return;
    };

    shared.state.write().await.begin_fetch();
    shared.bump();

    let shared = Arc::clone(shared);
    let client = client.clone();
    let offset = offset_from_minutes(config.utc_offset_minutes);
    fetches.spawn(async move {
        let _guard = guard;
        let result = client.fetch().await;

        let mut state = shared.state.write().await;
        if shared.closed.load(Ordering::Acquire) {
            tracing::debug!("discarding response received after shutdown");
            return;
        }
        match result {
            Ok(summary) => {
                let now = Utc::now();
                state.apply_success(&summary, &format_date(now, offset), now);
                metrics::counter!("dashboard_fetches_total", "outcome" => "ok").increment(1);
                tracing::debug!(total = summary.total, "dashboard refreshed");
            }
            Err(e) => {
                state.apply_failure(e.to_string());
                metrics::counter!("dashboard_fetches_total", "outcome" => "error").increment(1);
                tracing::warn!(error = %e, "dashboard fetch failed, keeping previous data");
            }
        }
        drop(state);
        shared.bump();
    });
}

async fn clock_loop(
    shared: Arc<Shared>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                shared.state.write().await.tick(Utc::now());
                shared.bump();
            }
        }
    }
}

/// Control handle for a running [`Poller`].
pub struct PollerHandle {
    shared: Arc<Shared>,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    /// Snapshot of the current state.
    pub async fn state(&self) -> DashboardState {
        self.shared.state.read().await.clone()
    }

    /// Requests a fetch outside the schedule.
    pub fn refresh_now(&self) {
        self.shared.refresh.notify_one();
    }

    /// Receiver that changes whenever the state does.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.version.subscribe()
    }

    /// Stops both timers, drops any in-flight request and returns the final state.
    pub async fn shutdown(self) -> DashboardState {
        self.shared.closed.store(true, Ordering::Release);
        let _ = self.shutdown.send(true);

        for task in self.tasks {
            if let Err(e) = task.await {
                if e.is_panic() {
                    tracing::error!(error = %e, "poller task panicked");
                }
            }
        }
        tracing::info!("dashboard poller stopped");
        self.shared.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_guard_is_exclusive_and_released_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));

        let guard = InFlightGuard::try_acquire(&flag).unwrap();
        assert!(flag.load(Ordering::Acquire));
        assert!(InFlightGuard::try_acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlightGuard::try_acquire(&flag).is_some());
    }

    #[test]
    fn default_config_polls_every_thirty_seconds() {
        let config = PollerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.clock_interval, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn shutdown_without_reachable_endpoint_returns_promptly() {
        let client = ChecklistClient::new("http://127.0.0.1:9/checklist", None).unwrap();
        let handle = Poller::new(client, PollerConfig::default()).spawn();

        let state = tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .unwrap();
        assert!(state.view().is_none());
    }
}
