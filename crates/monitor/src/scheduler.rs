//! The three monitor timers.
//!
//! Each timer is its own tokio task with its own cancellation token, so
//! teardown cancels every one of them. Timer callbacks take the monitor lock,
//! run to completion and release it; status fetches run in a separate task
//! and only take the lock to hand over the result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use aptfetch_status::StatusSource;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{StatusMonitor, epoch_now};

/// Cancellation handles, one per timer.
#[derive(Default)]
struct Timers {
    refresh: Option<CancellationToken>,
    poll: Option<CancellationToken>,
    blink: Option<CancellationToken>,
}

impl Timers {
    fn active(&self) -> usize {
        [&self.refresh, &self.poll, &self.blink]
            .iter()
            .filter(|t| t.is_some())
            .count()
    }
}

/// Drives a [`StatusMonitor`] from its refresh, poll and blink timers.
pub struct Scheduler {
    monitor: Arc<Mutex<StatusMonitor>>,
    source: Arc<dyn StatusSource>,
    refresh_interval: Duration,
    poll_interval: Duration,
    blink_interval: Duration,
    timers: Timers,
    fetch_in_flight: Arc<AtomicBool>,
}

impl Scheduler {
    /// Creates a scheduler using the intervals from the monitor's config.
    pub async fn new(monitor: Arc<Mutex<StatusMonitor>>, source: Arc<dyn StatusSource>) -> Self {
        let (refresh_interval, poll_interval, blink_interval) = {
            let guard = monitor.lock().await;
            let config = guard.config();
            (
                config.refresh_interval,
                config.poll_interval,
                config.blink_interval,
            )
        };

        Self {
            monitor,
            source,
            refresh_interval,
            poll_interval,
            blink_interval,
            timers: Timers::default(),
            fetch_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Registers all three timers. Must be called inside a tokio runtime.
    ///
    /// The refresh and poll timers fire immediately, then periodically.
    /// Calling `start` again restarts every timer.
    pub fn start(&mut self) {
        self.stop();

        let refresh = CancellationToken::new();
        tokio::spawn(refresh_loop(
            Arc::clone(&self.monitor),
            Arc::clone(&self.source),
            Arc::clone(&self.fetch_in_flight),
            self.refresh_interval,
            refresh.clone(),
        ));
        self.timers.refresh = Some(refresh);

        let poll = CancellationToken::new();
        tokio::spawn(poll_loop(
            Arc::clone(&self.monitor),
            self.poll_interval,
            poll.clone(),
        ));
        self.timers.poll = Some(poll);

        let blink = CancellationToken::new();
        tokio::spawn(blink_loop(
            Arc::clone(&self.monitor),
            self.blink_interval,
            blink.clone(),
        ));
        self.timers.blink = Some(blink);

        tracing::info!(
            refresh_secs = self.refresh_interval.as_secs(),
            poll_secs = self.poll_interval.as_secs(),
            blink_secs = self.blink_interval.as_secs(),
            "monitor timers started"
        );
    }

    /// Cancels every registered timer and any fetch in flight.
    pub fn stop(&mut self) {
        let mut stopped = 0;
        for timer in [
            &mut self.timers.refresh,
            &mut self.timers.poll,
            &mut self.timers.blink,
        ] {
            if let Some(cancel) = timer.take() {
                cancel.cancel();
                stopped += 1;
            }
        }
        if stopped > 0 {
            tracing::info!(stopped, "monitor timers stopped");
        }
    }

    /// Number of registered timers (0 or 3).
    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }

    pub fn is_running(&self) -> bool {
        self.active_timers() > 0
    }

    /// Returns `true` while a status fetch is outstanding.
    pub fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight.load(Ordering::Acquire)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs one status fetch and hands the result to the monitor.
///
/// Fetch failures leave the snapshot as it was.
pub async fn refresh(monitor: &Mutex<StatusMonitor>, source: &dyn StatusSource) {
    match source.fetch().await {
        Ok(raw) => {
            monitor.lock().await.apply_status_text(&raw);
        }
        Err(e) => tracing::warn!("status fetch failed: {e}"),
    }
}

async fn refresh_loop(
    monitor: Arc<Mutex<StatusMonitor>>,
    source: Arc<dyn StatusSource>,
    in_flight: Arc<AtomicBool>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if in_flight.swap(true, Ordering::AcqRel) {
                    tracing::debug!("previous status fetch still running, skipping refresh");
                    continue;
                }

                let monitor = Arc::clone(&monitor);
                let source = Arc::clone(&source);
                let in_flight = Arc::clone(&in_flight);
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            tracing::debug!("status fetch abandoned on shutdown");
                        }
                        _ = refresh(&monitor, source.as_ref()) => {}
                    }
                    in_flight.store(false, Ordering::Release);
                });
            }
        }
    }
}

async fn poll_loop(monitor: Arc<Mutex<StatusMonitor>>, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => monitor.lock().await.poll_lock(),
        }
    }
}

async fn blink_loop(
    monitor: Arc<Mutex<StatusMonitor>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // Skip the first immediate tick.
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => monitor.lock().await.tick(epoch_now()),
        }
    }
}
