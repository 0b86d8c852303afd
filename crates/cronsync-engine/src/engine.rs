//! CronEngine - keyed registry of live cron triggers.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use cronsync_protocols::{
    EngineError, EngineState, JobFactory, JobKey, JobPayload, ScheduledHandle, SchedulerEngine,
    Trigger,
};

use crate::entry::Entry;
use crate::firing::{self, FactorySlot};

/// In-process scheduler engine.
///
/// Handles can be registered before [`start`](SchedulerEngine::start); they
/// begin firing once the engine is started. After
/// [`shutdown`](SchedulerEngine::shutdown) the engine rejects every mutation.
pub struct CronEngine {
    entries: DashMap<JobKey, Arc<Entry>>,
    factory: FactorySlot,
    state: RwLock<EngineState>,
    cancel: CancellationToken,
}

impl CronEngine {
    /// Create a new engine in standby.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            factory: Arc::new(RwLock::new(None)),
            state: RwLock::new(EngineState::Standby),
            cancel: CancellationToken::new(),
        }
    }

    /// Let a paused handle fire again. Returns `false` if the key is absent.
    pub fn resume(&self, key: &JobKey) -> bool {
        match self.entries.get(key) {
            Some(entry) => {
                entry.resume();
                true
            }
            None => false,
        }
    }

    /// Number of times a handle has fired.
    pub fn fire_count(&self, key: &JobKey) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.fire_count())
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        if *self.state.read() == EngineState::Shutdown {
            return Err(EngineError::Shutdown);
        }
        Ok(())
    }

    fn arm(&self, entry: &Arc<Entry>) {
        if entry.arm() {
            firing::spawn(entry.clone(), self.factory.clone());
        }
    }
}

impl Default for CronEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CronEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[async_trait]
impl SchedulerEngine for CronEngine {
    fn state(&self) -> EngineState {
        *self.state.read()
    }

    fn set_job_factory(&self, factory: Arc<dyn JobFactory>) {
        *self.factory.write() = Some(factory);
        debug!(target: "cronsync_engine", "Job factory installed");
    }

    async fn schedule(
        &self,
        key: JobKey,
        trigger: Trigger,
        payload: JobPayload,
    ) -> Result<(), EngineError> {
        // Hold the state lock across the insert; shutdown clears the registry
        // only after it has flipped the state.
        let (entry, started) = {
            let state = self.state.read();
            if *state == EngineState::Shutdown {
                return Err(EngineError::Shutdown);
            }

            let entry = match self.entries.entry(key.clone()) {
                MapEntry::Occupied(_) => return Err(EngineError::Conflict(key)),
                MapEntry::Vacant(slot) => {
                    let entry = Arc::new(Entry::new(
                        key.clone(),
                        trigger,
                        payload,
                        self.cancel.child_token(),
                    ));
                    slot.insert(entry.clone());
                    entry
                }
            };
            (entry, *state == EngineState::Started)
        };

        debug!(
            target: "cronsync_engine",
            "Scheduled {} with cron '{}'",
            key,
            entry.trigger.expression()
        );

        if started {
            self.arm(&entry);
        }
        Ok(())
    }

    async fn lookup(&self, key: &JobKey) -> Result<Option<ScheduledHandle>, EngineError> {
        Ok(self.entries.get(key).map(|entry| entry.handle()))
    }

    async fn exists(&self, key: &JobKey) -> Result<bool, EngineError> {
        Ok(self.entries.contains_key(key))
    }

    async fn pause(&self, key: &JobKey) -> Result<bool, EngineError> {
        self.ensure_running()?;
        match self.entries.get(key) {
            Some(entry) => {
                entry.pause();
                debug!(target: "cronsync_engine", "Paused {}", key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, key: &JobKey) -> Result<bool, EngineError> {
        self.ensure_running()?;
        match self.entries.remove(key) {
            Some((_, entry)) => {
                entry.cancel.cancel();
                debug!(target: "cronsync_engine", "Deleted {}", key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn keys(&self, group: &str) -> Result<Vec<JobKey>, EngineError> {
        let mut keys: Vec<JobKey> = self
            .entries
            .iter()
            .filter(|item| item.key().group == group)
            .map(|item| item.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn start(&self) -> Result<(), EngineError> {
        {
            let mut state = self.state.write();
            match *state {
                EngineState::Shutdown => return Err(EngineError::Shutdown),
                EngineState::Started => {
                    debug!(target: "cronsync_engine", "Engine already started");
                    return Ok(());
                }
                EngineState::Standby => *state = EngineState::Started,
            }
        }

        let entries: Vec<Arc<Entry>> = self.entries.iter().map(|item| item.value().clone()).collect();
        for entry in &entries {
            self.arm(entry);
        }

        info!(target: "cronsync_engine", "Scheduler engine started with {} handle(s)", entries.len());
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), EngineError> {
        {
            let mut state = self.state.write();
            if *state == EngineState::Shutdown {
                return Ok(());
            }
            *state = EngineState::Shutdown;
        }

        self.cancel.cancel();
        self.entries.clear();
        info!(target: "cronsync_engine", "Scheduler engine shut down");
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
