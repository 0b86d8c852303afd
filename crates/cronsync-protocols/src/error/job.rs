//! Job execution errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Job execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Unsupported job payload: {0}")]
    UnsupportedPayload(String),
}
