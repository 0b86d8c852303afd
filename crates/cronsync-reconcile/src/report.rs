//! Pass outcomes.

use cronsync_protocols::{JobDefinition, JobKey};

/// What a pass does (or did) with one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Enabled with no handle: create one.
    Schedule,
    /// Enabled with a stale snapshot: delete, then schedule fresh.
    Replace,
    /// Disabled with a handle: pause, then delete.
    Remove,
    /// Enabled and the snapshot matches.
    Unchanged,
    /// Disabled with no handle.
    Skip,
}

impl ReconcileAction {
    /// Whether the action touches the engine.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ReconcileAction::Schedule | ReconcileAction::Replace | ReconcileAction::Remove
        )
    }
}

impl std::fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileAction::Schedule => write!(f, "schedule"),
            ReconcileAction::Replace => write!(f, "replace"),
            ReconcileAction::Remove => write!(f, "remove"),
            ReconcileAction::Unchanged => write!(f, "unchanged"),
            ReconcileAction::Skip => write!(f, "skip"),
        }
    }
}

/// One planned or applied step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub id: String,
    pub key: JobKey,
    pub action: ReconcileAction,
}

/// One row of a dry run, with the definition it was computed from.
#[derive(Debug, Clone)]
pub struct PlanStep {
    pub definition: JobDefinition,
    pub key: JobKey,
    /// What a pass would do, or why it would reject the definition.
    pub outcome: Result<ReconcileAction, String>,
}

impl PlanStep {
    pub fn action(&self) -> Option<ReconcileAction> {
        self.outcome.as_ref().ok().copied()
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome.is_err()
    }
}

/// A definition the pass could not bring in line.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub id: String,
    pub key: JobKey,
    /// Planned action, when the failure happened while applying it.
    pub action: Option<ReconcileAction>,
    pub message: String,
}

/// Result of one reconcile pass.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Steps applied, in store order.
    pub applied: Vec<PlannedAction>,
    pub failures: Vec<ItemFailure>,
    /// Live definition handles with no stored definition. Left in place.
    pub orphans: Vec<JobKey>,
}

impl ReconcileReport {
    pub fn record(&mut self, id: impl Into<String>, key: JobKey, action: ReconcileAction) {
        self.applied.push(PlannedAction {
            id: id.into(),
            key,
            action,
        });
    }

    pub fn fail(
        &mut self,
        id: impl Into<String>,
        key: JobKey,
        action: Option<ReconcileAction>,
        message: impl Into<String>,
    ) {
        self.failures.push(ItemFailure {
            id: id.into(),
            key,
            action,
            message: message.into(),
        });
    }

    /// Definitions visited, successful or not.
    pub fn total(&self) -> usize {
        self.applied.len() + self.failures.len()
    }

    /// Number of applied steps with the given action.
    pub fn count(&self, action: ReconcileAction) -> usize {
        self.applied.iter().filter(|a| a.action == action).count()
    }

    /// Number of applied steps that mutated the engine.
    pub fn mutations(&self) -> usize {
        self.applied.iter().filter(|a| a.action.is_mutation()).count()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Action applied to a definition in this pass.
    pub fn action_for(&self, id: &str) -> Option<ReconcileAction> {
        self.applied.iter().find(|a| a.id == id).map(|a| a.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> JobKey {
        JobKey::new("cronsync", name)
    }

    #[test]
    fn test_counts() {
        let mut report = ReconcileReport::default();
        report.record("1", key("monitor_1"), ReconcileAction::Schedule);
        report.record("2", key("monitor_2"), ReconcileAction::Unchanged);
        report.record("3", key("monitor_3"), ReconcileAction::Replace);
        report.fail("4", key("monitor_4"), Some(ReconcileAction::Schedule), "boom");

        assert_eq!(report.total(), 4);
        assert_eq!(report.mutations(), 2);
        assert_eq!(report.count(ReconcileAction::Unchanged), 1);
        assert!(report.has_failures());
        assert_eq!(report.action_for("3"), Some(ReconcileAction::Replace));
        assert_eq!(report.action_for("4"), None);
    }

    #[test]
    fn test_plan_step_outcome() {
        let planned = PlanStep {
            definition: JobDefinition::new("1", "0 0 * * * ?"),
            key: key("monitor_1"),
            outcome: Ok(ReconcileAction::Schedule),
        };
        assert_eq!(planned.action(), Some(ReconcileAction::Schedule));
        assert!(!planned.is_rejected());

        let rejected = PlanStep {
            outcome: Err("reserved".to_string()),
            ..planned
        };
        assert_eq!(rejected.action(), None);
        assert!(rejected.is_rejected());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(ReconcileAction::Schedule.to_string(), "schedule");
        assert_eq!(ReconcileAction::Skip.to_string(), "skip");
        assert!(!ReconcileAction::Unchanged.is_mutation());
        assert!(ReconcileAction::Remove.is_mutation());
    }
}
