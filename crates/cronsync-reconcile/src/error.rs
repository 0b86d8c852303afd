//! Reconciliation errors.

use thiserror::Error;

use cronsync_protocols::{EngineError, EngineState, JobKey, StoreError};

use crate::report::ReconcileReport;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The engine cannot accept handles; startup must not continue.
    #[error("Scheduler engine unavailable (state: {0})")]
    EngineUnavailable(EngineState),

    #[error("Scheduler engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Job store error: {0}")]
    Store(#[from] StoreError),

    /// A definition's key collides with the maintenance job.
    #[error("Key {0} is reserved for the maintenance job")]
    ReservedKey(JobKey),

    /// At least one definition failed; the rest of the pass was applied.
    #[error(
        "Reconcile pass failed for {} of {} definition(s)",
        .0.failures.len(),
        .0.total()
    )]
    PassFailed(Box<ReconcileReport>),
}

impl ReconcileError {
    /// The pass report, if this error came out of a partially applied pass.
    pub fn report(&self) -> Option<&ReconcileReport> {
        match self {
            ReconcileError::PassFailed(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReconcileAction;

    #[test]
    fn test_engine_unavailable_display() {
        let err = ReconcileError::EngineUnavailable(EngineState::Shutdown);
        assert!(err.to_string().contains("shutdown"));
    }

    #[test]
    fn test_conflict_is_wrapped() {
        let err = ReconcileError::from(EngineError::Conflict(JobKey::new("cronsync", "monitor_1")));
        assert!(matches!(err, ReconcileError::Engine(EngineError::Conflict(_))));
        assert!(err.to_string().contains("monitor_1"));
    }

    #[test]
    fn test_pass_failed_counts() {
        let mut report = ReconcileReport::default();
        report.record("1", JobKey::new("cronsync", "monitor_1"), ReconcileAction::Schedule);
        report.fail("2", JobKey::new("cronsync", "monitor_2"), None, "bad cron");

        let err = ReconcileError::PassFailed(Box::new(report));
        assert_eq!(err.to_string(), "Reconcile pass failed for 1 of 2 definition(s)");
        assert_eq!(err.report().unwrap().failures[0].id, "2");
    }
}
