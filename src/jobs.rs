//! Job factory bound into the engine at startup.
//!
//! The work a monitor performs is owned elsewhere; here a fire is logged with
//! everything the snapshot carries.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use cronsync_protocols::{Job, JobContext, JobDefinition, JobError, JobFactory, JobKey, JobPayload};

/// Builds a [`MaintenanceJob`] or [`MonitorJob`] from the handle's payload.
pub(crate) struct LoggingJobFactory;

impl JobFactory for LoggingJobFactory {
    fn new_job(&self, _key: &JobKey, payload: &JobPayload) -> Result<Arc<dyn Job>, JobError> {
        Ok(match payload {
            JobPayload::Maintenance => Arc::new(MaintenanceJob),
            JobPayload::Definition(def) => Arc::new(MonitorJob {
                definition: def.clone(),
            }),
        })
    }
}

pub(crate) struct MaintenanceJob;

#[async_trait]
impl Job for MaintenanceJob {
    async fn execute(&self, ctx: &JobContext) -> Result<(), JobError> {
        info!(
            fire_id = %ctx.fire_id,
            scheduled_for = %ctx.scheduled_for.to_rfc3339(),
            "Maintenance job fired"
        );
        Ok(())
    }
}

pub(crate) struct MonitorJob {
    definition: JobDefinition,
}

#[async_trait]
impl Job for MonitorJob {
    async fn execute(&self, ctx: &JobContext) -> Result<(), JobError> {
        let def = &self.definition;
        info!(
            fire_id = %ctx.fire_id,
            key = %ctx.key,
            title = %def.title,
            service = def.service.as_deref().unwrap_or("-"),
            instance = def.instance.as_deref().unwrap_or("-"),
            "Monitor job fired"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_factory_builds_jobs_for_each_payload() {
        let factory = LoggingJobFactory;
        let key = JobKey::new("cronsync", "maintenance");

        let job = factory.new_job(&key, &JobPayload::Maintenance).unwrap();
        let ctx = JobContext::new(key.clone(), JobPayload::Maintenance, Utc::now());
        job.execute(&ctx).await.unwrap();

        let payload = JobPayload::Definition(JobDefinition::new("1", "0/5 * * * * ?"));
        let job = factory.new_job(&key, &payload).unwrap();
        let ctx = JobContext::new(key, payload, Utc::now());
        job.execute(&ctx).await.unwrap();
    }
}
