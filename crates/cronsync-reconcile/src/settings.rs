//! Reconcile settings.

use cronsync_config::SchedulerConfig;

/// Static settings of a [`ReconcileService`](crate::ReconcileService).
#[derive(Debug, Clone)]
pub struct ReconcileSettings {
    /// Group tag shared by every handle the service owns.
    pub group: String,
    /// Prefix joined with a definition ID to form its key name.
    pub key_prefix: String,
    /// Cron expression of the maintenance job.
    pub maintenance_cron: String,
}

impl ReconcileSettings {
    /// Name of the maintenance job's key inside the group.
    pub const MAINTENANCE_JOB_NAME: &'static str = "maintenance";
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self::from(&SchedulerConfig::default())
    }
}

impl From<&SchedulerConfig> for ReconcileSettings {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            group: config.group.clone(),
            key_prefix: config.key_prefix.clone(),
            maintenance_cron: config.maintenance_cron.clone(),
        }
    }
}
