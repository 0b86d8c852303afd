//! Live handle state owned by the engine.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

use cronsync_protocols::{HandleState, JobKey, JobPayload, ScheduledHandle, Trigger};

pub(crate) struct Entry {
    pub(crate) key: JobKey,
    pub(crate) trigger: Trigger,
    pub(crate) payload: JobPayload,
    paused: AtomicBool,
    armed: AtomicBool,
    fire_count: AtomicU64,
    pub(crate) cancel: CancellationToken,
}

impl Entry {
    pub(crate) fn new(
        key: JobKey,
        trigger: Trigger,
        payload: JobPayload,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            key,
            trigger,
            payload,
            paused: AtomicBool::new(false),
            armed: AtomicBool::new(false),
            fire_count: AtomicU64::new(0),
            cancel,
        }
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub(crate) fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub(crate) fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Returns `true` exactly once, for the caller that should spawn the
    /// firing task.
    pub(crate) fn arm(&self) -> bool {
        !self.armed.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn record_fire(&self) {
        self.fire_count.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn fire_count(&self) -> u64 {
        self.fire_count.load(Ordering::Relaxed)
    }

    pub(crate) fn handle(&self) -> ScheduledHandle {
        let paused = self.is_paused();
        ScheduledHandle {
            key: self.key.clone(),
            trigger: self.trigger.clone(),
            payload: self.payload.clone(),
            state: if paused {
                HandleState::Paused
            } else {
                HandleState::Normal
            },
            next_fire_time: if paused {
                None
            } else {
                self.trigger.next_fire_time()
            },
        }
    }
}
