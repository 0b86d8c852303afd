//! Scheduler engine protocol.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::definition::JobDefinition;
use crate::error::EngineError;
use crate::job::JobFactory;
use crate::key::JobKey;
use crate::trigger::Trigger;

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Accepting handles, not firing yet.
    Standby,
    /// Firing triggers.
    Started,
    /// Permanently stopped.
    Shutdown,
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineState::Standby => write!(f, "standby"),
            EngineState::Started => write!(f, "started"),
            EngineState::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Per-handle firing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Normal,
    Paused,
}

/// Data attached to a handle when it is scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "definition", rename_all = "snake_case")]
pub enum JobPayload {
    /// The fixed housekeeping job.
    Maintenance,
    /// Snapshot of a declared definition taken at schedule time.
    Definition(JobDefinition),
}

impl JobPayload {
    /// The definition snapshot, if this is a definition job.
    pub fn definition(&self) -> Option<&JobDefinition> {
        match self {
            JobPayload::Definition(def) => Some(def),
            JobPayload::Maintenance => None,
        }
    }
}

/// Read-only view of a live handle.
#[derive(Debug, Clone)]
pub struct ScheduledHandle {
    pub key: JobKey,
    pub trigger: Trigger,
    pub payload: JobPayload,
    pub state: HandleState,
    pub next_fire_time: Option<DateTime<Utc>>,
}

/// Registry of live cron triggers.
///
/// Implementations own per-key thread-safety; callers never lock around
/// these calls.
#[async_trait]
pub trait SchedulerEngine: Send + Sync {
    /// Current lifecycle state.
    fn state(&self) -> EngineState;

    /// Install the factory that produces the work run on each fire.
    fn set_job_factory(&self, factory: Arc<dyn JobFactory>);

    /// Register a new handle. Fails with [`EngineError::Conflict`] if the key
    /// is already live.
    async fn schedule(
        &self,
        key: JobKey,
        trigger: Trigger,
        payload: JobPayload,
    ) -> Result<(), EngineError>;

    /// Look up a live handle.
    async fn lookup(&self, key: &JobKey) -> Result<Option<ScheduledHandle>, EngineError>;

    /// Whether a handle with this key is live.
    async fn exists(&self, key: &JobKey) -> Result<bool, EngineError>;

    /// Stop a handle from firing. Returns `false` if the key is absent.
    async fn pause(&self, key: &JobKey) -> Result<bool, EngineError>;

    /// Remove a handle. Returns `false` if the key is absent.
    async fn delete(&self, key: &JobKey) -> Result<bool, EngineError>;

    /// All live keys in a group, sorted.
    async fn keys(&self, group: &str) -> Result<Vec<JobKey>, EngineError>;

    /// Begin firing triggers.
    async fn start(&self) -> Result<(), EngineError>;

    /// Stop firing and drop every handle.
    async fn shutdown(&self) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_definition_accessor() {
        let def = JobDefinition::new("1", "0 * * * * *");
        let payload = JobPayload::Definition(def.clone());
        assert_eq!(payload.definition(), Some(&def));
        assert!(JobPayload::Maintenance.definition().is_none());
    }

    #[test]
    fn test_payload_serialization_tag() {
        let value = serde_json::to_value(JobPayload::Maintenance).unwrap();
        assert_eq!(value["kind"], "maintenance");
    }

    #[test]
    fn test_engine_state_display() {
        assert_eq!(EngineState::Standby.to_string(), "standby");
        assert_eq!(EngineState::Started.to_string(), "started");
        assert_eq!(EngineState::Shutdown.to_string(), "shutdown");
    }
}
