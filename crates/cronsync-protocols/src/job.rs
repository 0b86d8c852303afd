//! Work executed when a handle fires.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::JobPayload;
use crate::error::JobError;
use crate::key::JobKey;

/// Context handed to a job on each fire.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Unique ID of this fire.
    pub fire_id: Uuid,
    pub key: JobKey,
    pub payload: JobPayload,
    /// Time the trigger was due.
    pub scheduled_for: DateTime<Utc>,
    /// Time the job actually started.
    pub fired_at: DateTime<Utc>,
}

impl JobContext {
    pub fn new(key: JobKey, payload: JobPayload, scheduled_for: DateTime<Utc>) -> Self {
        Self {
            fire_id: Uuid::new_v4(),
            key,
            payload,
            scheduled_for,
            fired_at: Utc::now(),
        }
    }
}

/// A unit of work bound to a scheduled handle.
#[async_trait]
pub trait Job: Send + Sync {
    async fn execute(&self, ctx: &JobContext) -> Result<(), JobError>;
}

/// Produces the job instance for a handle each time it fires.
pub trait JobFactory: Send + Sync {
    fn new_job(&self, key: &JobKey, payload: &JobPayload) -> Result<Arc<dyn Job>, JobError>;
}
