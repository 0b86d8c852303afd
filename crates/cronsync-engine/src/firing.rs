//! Per-handle firing loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use cronsync_protocols::{JobContext, JobFactory};

use crate::entry::Entry;

pub(crate) type FactorySlot = Arc<RwLock<Option<Arc<dyn JobFactory>>>>;

/// Spawn the firing task for `entry`. Runs until the entry is cancelled or
/// its trigger has no upcoming fire time.
pub(crate) fn spawn(entry: Arc<Entry>, factory: FactorySlot) {
    tokio::spawn(async move {
        debug!(target: "cronsync_engine", "Armed {} ({})", entry.key, entry.trigger.expression());
        let mut last: Option<DateTime<Utc>> = None;

        loop {
            let now = Utc::now();
            // Never hand out the same fire time twice if the wakeup lands a
            // hair before it on the wall clock.
            let from = match last {
                Some(prev) if prev > now => prev,
                _ => now,
            };
            let Some(next) = entry.trigger.next_after(&from) else {
                debug!(target: "cronsync_engine", "{} has no upcoming fire time", entry.key);
                break;
            };
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);

            tokio::select! {
                _ = entry.cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
            last = Some(next);

            if entry.is_paused() {
                continue;
            }
            fire(&entry, &factory, next);
        }

        debug!(target: "cronsync_engine", "Firing loop for {} stopped", entry.key);
    });
}

fn fire(entry: &Arc<Entry>, factory: &FactorySlot, scheduled_for: DateTime<Utc>) {
    let Some(factory) = factory.read().clone() else {
        warn!(target: "cronsync_engine", "{} fired but no job factory is installed", entry.key);
        return;
    };

    let job = match factory.new_job(&entry.key, &entry.payload) {
        Ok(job) => job,
        Err(e) => {
            warn!(target: "cronsync_engine", "Failed to create job for {}: {}", entry.key, e);
            return;
        }
    };

    entry.record_fire();
    let ctx = JobContext::new(entry.key.clone(), entry.payload.clone(), scheduled_for);
    debug!(
        target: "cronsync_engine",
        "Firing {} (fire_id={}, scheduled_for={})",
        ctx.key,
        ctx.fire_id,
        scheduled_for.to_rfc3339()
    );

    tokio::spawn(async move {
        if let Err(e) = job.execute(&ctx).await {
            warn!(target: "cronsync_engine", "Job {} failed: {}", ctx.key, e);
        }
    });
}
