//! Periodic removal of expired revocation entries
//!
//! The sweeper owns its background task. Stop it with
//! [`SweepHandle::shutdown`] or by dropping the handle.

use std::sync::Arc;
use std::time::Duration;

use ks_shared::config::RevocationConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::store::{RevocationStore, RevocationStrategy};

/// Sweep schedule
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Time between two sweeps
    pub interval: Duration,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl SweepConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            enabled: true,
        }
    }

    /// Default schedule: every 5 minutes in memory, hourly when persistent
    pub fn for_strategy(strategy: RevocationStrategy) -> Self {
        match strategy {
            RevocationStrategy::Memory => Self::new(Duration::from_secs(300)),
            RevocationStrategy::Persistent => Self::new(Duration::from_secs(3600)),
        }
    }

    pub fn from_revocation_config(config: &RevocationConfig) -> Self {
        Self {
            interval: config.sweep_interval(),
            enabled: config.sweep_enabled,
        }
    }
}

/// Spawns sweep loops over a [`RevocationStore`]
pub struct RevocationSweeper;

impl RevocationSweeper {
    /// Start sweeping `store` every `config.interval`
    ///
    /// The first sweep runs one full interval after spawning. Must be called
    /// from within a tokio runtime.
    pub fn spawn(store: Arc<dyn RevocationStore>, config: SweepConfig) -> SweepHandle {
        let (stop_tx, stop_rx) = watch::channel(false);

        if !config.enabled || config.interval.is_zero() {
            warn!(strategy = %store.strategy(), "Revocation sweeper is disabled");
            return SweepHandle {
                stop: stop_tx,
                task: None,
            };
        }

        let task = tokio::spawn(sweep_loop(store, config.interval, stop_rx));

        SweepHandle {
            stop: stop_tx,
            task: Some(task),
        }
    }

    /// Run a single sweep, logging the outcome
    pub async fn sweep_once(store: &dyn RevocationStore) -> Option<usize> {
        match store.sweep_expired().await {
            Ok(removed) => {
                if removed > 0 {
                    info!(strategy = %store.strategy(), removed, "Swept expired revocations");
                } else {
                    debug!(strategy = %store.strategy(), "No expired revocations to sweep");
                }
                Some(removed)
            }
            Err(e) => {
                error!(strategy = %store.strategy(), error = %e, "Revocation sweep failed");
                None
            }
        }
    }
}

async fn sweep_loop(
    store: Arc<dyn RevocationStore>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) {
    info!(
        strategy = %store.strategy(),
        interval_secs = period.as_secs(),
        "Revocation sweeper started"
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                RevocationSweeper::sweep_once(store.as_ref()).await;
            }
            changed = stop.changed() => {
                // A closed channel means the handle was dropped.
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
        }
    }

    info!(strategy = %store.strategy(), "Revocation sweeper stopped");
}

/// Owner of a running sweep loop
#[derive(Debug)]
pub struct SweepHandle {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Signal the loop to stop and wait for it to exit
    ///
    /// A sweep already in progress finishes first.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);

        if let Some(task) = self.task {
            if let Err(e) = task.await {
                error!(error = %e, "Revocation sweeper task failed");
            }
        }
    }

    /// True once the loop has exited, or if it never started
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }
}
