//! Periodic reconcile driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::error::ReconcileError;
use crate::service::ReconcileService;

/// Runs a reconcile pass on a fixed interval until cancelled.
pub struct ReconcileLoop {
    service: Arc<ReconcileService>,
    interval: Duration,
    passes: AtomicU64,
}

impl ReconcileLoop {
    pub fn new(service: Arc<ReconcileService>) -> Self {
        Self {
            service,
            interval: Duration::from_secs(60),
            passes: AtomicU64::new(0),
        }
    }

    /// Set the interval between passes.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of passes attempted so far.
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }

    /// Run until the watch value flips to `true` or its sender is dropped.
    /// The first pass runs immediately.
    pub async fn run(self: Arc<Self>, cancel: watch::Receiver<bool>) {
        info!("Reconcile loop started (interval: {:?})", self.interval);

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cancel = cancel;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.passes.fetch_add(1, Ordering::Relaxed);
                    match self.service.reconcile().await {
                        Ok(_) => {}
                        Err(ReconcileError::PassFailed(report)) => {
                            warn!(
                                "Reconcile pass left {} definition(s) out of line",
                                report.failures.len()
                            );
                        }
                        Err(e) => error!("Reconcile pass failed: {}", e),
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Reconcile loop shutting down");
                        break;
                    }
                }
            }
        }
    }
}
