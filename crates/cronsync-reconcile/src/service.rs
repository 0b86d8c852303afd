//! ReconcileService - diff and apply between the job store and the engine.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use cronsync_protocols::{
    EngineState, HandleState, JobDefinition, JobFactory, JobKey, JobPayload, JobStore,
    ScheduledHandle, SchedulerEngine, Trigger,
};

use crate::error::ReconcileError;
use crate::report::{PlanStep, ReconcileAction, ReconcileReport};
use crate::settings::ReconcileSettings;

/// Keeps engine handles in line with the job store.
///
/// The service owns no schedule state of its own: every decision is made
/// from a fresh store listing and fresh engine lookups.
pub struct ReconcileService {
    engine: Arc<dyn SchedulerEngine>,
    store: Arc<dyn JobStore>,
    settings: ReconcileSettings,
    /// Held for the whole of `init`, `reconcile` and `plan`.
    pass_guard: Mutex<()>,
}

impl ReconcileService {
    pub fn new(
        engine: Arc<dyn SchedulerEngine>,
        store: Arc<dyn JobStore>,
        settings: ReconcileSettings,
    ) -> Self {
        Self {
            engine,
            store,
            settings,
            pass_guard: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &ReconcileSettings {
        &self.settings
    }

    pub fn engine(&self) -> &Arc<dyn SchedulerEngine> {
        &self.engine
    }

    /// Key of the handle for a definition ID.
    pub fn key_for(&self, id: &str) -> JobKey {
        JobKey::for_definition(&self.settings.group, &self.settings.key_prefix, id)
    }

    /// Key of the maintenance job.
    pub fn maintenance_key(&self) -> JobKey {
        JobKey::new(&self.settings.group, ReconcileSettings::MAINTENANCE_JOB_NAME)
    }

    /// Bootstrap the engine: install the job factory, schedule the
    /// maintenance job and every enabled definition, then start firing.
    ///
    /// Call once per process. Any error is fatal to startup; a second call
    /// fails on the maintenance job's key.
    pub async fn init(&self, factory: Arc<dyn JobFactory>) -> Result<(), ReconcileError> {
        let _guard = self.pass_guard.lock().await;

        let state = self.engine.state();
        if state == EngineState::Shutdown {
            return Err(ReconcileError::EngineUnavailable(state));
        }
        self.engine.set_job_factory(factory);

        self.schedule_maintenance_job().await?;

        let definitions = self.store.list_job_definitions().await?;
        let mut scheduled = 0usize;
        for def in definitions.iter().filter(|d| d.is_enabled()) {
            self.schedule_job(def).await?;
            scheduled += 1;
        }

        self.engine.start().await?;
        info!(
            "Reconcile service initialized: {} of {} definition(s) scheduled, maintenance cron '{}'",
            scheduled,
            definitions.len(),
            self.settings.maintenance_cron
        );
        Ok(())
    }

    async fn schedule_maintenance_job(&self) -> Result<(), ReconcileError> {
        let key = self.maintenance_key();
        let trigger = Trigger::cron(&self.settings.maintenance_cron)?;
        self.engine
            .schedule(key.clone(), trigger, JobPayload::Maintenance)
            .await?;
        debug!("Scheduled maintenance job {}", key);
        Ok(())
    }

    /// Schedule a handle for `definition` with a snapshot of it attached.
    ///
    /// A key that is already live is an error: the caller should have
    /// replaced it instead.
    pub async fn schedule_job(&self, definition: &JobDefinition) -> Result<JobKey, ReconcileError> {
        let key = self.key_for(&definition.id);
        self.check_reserved(&key)?;

        let trigger = Trigger::cron(&definition.cron_expression)?;
        self.engine
            .schedule(
                key.clone(),
                trigger,
                JobPayload::Definition(definition.clone()),
            )
            .await?;

        debug!("Scheduled {} with cron '{}'", key, definition.cron_expression);
        Ok(key)
    }

    /// Pause then delete a handle. Returns `false` if it was already gone,
    /// including when it vanishes between the calls.
    pub async fn delete_job(&self, key: &JobKey) -> Result<bool, ReconcileError> {
        if !self.engine.exists(key).await? {
            debug!("{} already absent, nothing to delete", key);
            return Ok(false);
        }
        if !self.engine.pause(key).await? {
            debug!("{} vanished before pause", key);
            return Ok(false);
        }
        let deleted = self.engine.delete(key).await?;
        if deleted {
            debug!("Deleted {}", key);
        } else {
            debug!("{} vanished before delete", key);
        }
        Ok(deleted)
    }

    /// Delete the current handle for `definition` and schedule a fresh one.
    pub async fn replace_job(&self, definition: &JobDefinition) -> Result<JobKey, ReconcileError> {
        let key = self.key_for(&definition.id);
        self.check_reserved(&key)?;
        self.delete_job(&key).await?;
        self.schedule_job(definition).await
    }

    /// Run one reconcile pass.
    ///
    /// Definitions are handled one at a time in store order. A failing
    /// definition is logged and skipped; if any failed, the pass returns
    /// [`ReconcileError::PassFailed`] with everything that was applied.
    pub async fn reconcile(&self) -> Result<ReconcileReport, ReconcileError> {
        let _guard = self.pass_guard.lock().await;

        let definitions = self.store.list_job_definitions().await?;
        let mut report = ReconcileReport::default();

        for def in &definitions {
            self.reconcile_one(def, &mut report).await;
        }

        report.orphans = self.find_orphans(&definitions).await;
        for orphan in &report.orphans {
            warn!("{} has no stored definition; leaving it scheduled", orphan);
        }

        info!(
            "Reconcile pass complete: {} scheduled, {} replaced, {} removed, {} unchanged, {} failed, {} orphaned",
            report.count(ReconcileAction::Schedule),
            report.count(ReconcileAction::Replace),
            report.count(ReconcileAction::Remove),
            report.count(ReconcileAction::Unchanged),
            report.failures.len(),
            report.orphans.len()
        );

        if report.has_failures() {
            return Err(ReconcileError::PassFailed(Box::new(report)));
        }
        Ok(report)
    }

    /// Compute what a pass would do, without touching the engine.
    ///
    /// A definition the pass would fail on is returned as a rejected step;
    /// only a store listing failure aborts the plan.
    pub async fn plan(&self) -> Result<Vec<PlanStep>, ReconcileError> {
        let _guard = self.pass_guard.lock().await;

        let definitions = self.store.list_job_definitions().await?;
        let mut planned = Vec::with_capacity(definitions.len());
        for def in definitions {
            let key = self.key_for(&def.id);
            let outcome = self.plan_one(&def, &key).await.map_err(|e| e.to_string());
            planned.push(PlanStep {
                definition: def,
                key,
                outcome,
            });
        }
        Ok(planned)
    }

    async fn plan_one(
        &self,
        def: &JobDefinition,
        key: &JobKey,
    ) -> Result<ReconcileAction, ReconcileError> {
        self.check_reserved(key)?;
        let handle = self.engine.lookup(key).await?;
        let action = Self::decide(def, handle.as_ref());
        if matches!(action, ReconcileAction::Schedule | ReconcileAction::Replace) {
            Trigger::cron(&def.cron_expression)?;
        }
        Ok(action)
    }

    async fn reconcile_one(&self, def: &JobDefinition, report: &mut ReconcileReport) {
        let key = self.key_for(&def.id);

        if let Err(e) = self.check_reserved(&key) {
            warn!("Skipping definition '{}': {}", def.id, e);
            report.fail(&def.id, key, None, e.to_string());
            return;
        }

        let handle = match self.engine.lookup(&key).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Lookup of {} failed: {}", key, e);
                report.fail(&def.id, key, None, e.to_string());
                return;
            }
        };

        let action = Self::decide(def, handle.as_ref());
        match self.apply(def, &key, action).await {
            Ok(()) => {
                if action.is_mutation() {
                    info!("{} {} (definition '{}')", action, key, def.id);
                }
                report.record(&def.id, key, action);
            }
            Err(e) => {
                warn!("Failed to {} {} (definition '{}'): {}", action, key, def.id, e);
                report.fail(&def.id, key, Some(action), e.to_string());
            }
        }
    }

    async fn apply(
        &self,
        def: &JobDefinition,
        key: &JobKey,
        action: ReconcileAction,
    ) -> Result<(), ReconcileError> {
        match action {
            ReconcileAction::Schedule => self.schedule_job(def).await.map(|_| ()),
            ReconcileAction::Replace => self.replace_job(def).await.map(|_| ()),
            ReconcileAction::Remove => self.delete_job(key).await.map(|_| ()),
            ReconcileAction::Unchanged | ReconcileAction::Skip => Ok(()),
        }
    }

    /// The per-definition diff.
    ///
    /// A live handle counts as stale when its payload is not an equal
    /// definition snapshot, or when it is paused: a remove that paused the
    /// handle but failed to delete it leaves one behind.
    fn decide(def: &JobDefinition, handle: Option<&ScheduledHandle>) -> ReconcileAction {
        match (handle, def.is_enabled()) {
            (None, true) => ReconcileAction::Schedule,
            (None, false) => ReconcileAction::Skip,
            (Some(_), false) => ReconcileAction::Remove,
            (Some(handle), true) => {
                if handle.state == HandleState::Normal
                    && handle.payload.definition() == Some(def)
                {
                    ReconcileAction::Unchanged
                } else {
                    ReconcileAction::Replace
                }
            }
        }
    }

    /// Live definition keys in the group with no stored definition.
    async fn find_orphans(&self, definitions: &[JobDefinition]) -> Vec<JobKey> {
        let live = match self.engine.keys(&self.settings.group).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Could not list live keys for orphan detection: {}", e);
                return Vec::new();
            }
        };

        let maintenance = self.maintenance_key();
        live.into_iter()
            .filter(|key| *key != maintenance)
            .filter(|key| key.name.starts_with(&self.settings.key_prefix))
            .filter(|key| !definitions.iter().any(|d| self.key_for(&d.id) == *key))
            .collect()
    }

    fn check_reserved(&self, key: &JobKey) -> Result<(), ReconcileError> {
        if *key == self.maintenance_key() {
            return Err(ReconcileError::ReservedKey(key.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
