//! Scheduler engine errors.

use thiserror::Error;

use crate::key::JobKey;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A handle with this key is already scheduled.
    #[error("Job already scheduled: {0}")]
    Conflict(JobKey),

    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },

    #[error("Scheduler engine has been shut down")]
    Shutdown,

    #[error("No job factory installed")]
    NoJobFactory,

    #[error("Scheduler engine error: {0}")]
    Internal(String),
}
