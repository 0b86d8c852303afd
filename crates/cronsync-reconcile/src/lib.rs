//! # cronsync Reconcile
//!
//! Keeps the live handles of a [`SchedulerEngine`] in line with the
//! definitions returned by a [`JobStore`].
//!
//! Each pass walks the store in order and, per definition, schedules,
//! removes, replaces or leaves alone the matching handle. Triggers are
//! immutable, so any change to a definition is applied as delete then
//! schedule. Passes are single-flight: overlapping callers run one after
//! another.
//!
//! Definitions removed from the store outright are not cleaned up. Their
//! handles are reported as orphans and left running.
//!
//! [`SchedulerEngine`]: cronsync_protocols::SchedulerEngine
//! [`JobStore`]: cronsync_protocols::JobStore

mod error;
mod report;
mod runner;
mod service;
mod settings;

pub use error::ReconcileError;
pub use report::{ItemFailure, PlanStep, PlannedAction, ReconcileAction, ReconcileReport};
pub use runner::ReconcileLoop;
pub use service::ReconcileService;
pub use settings::ReconcileSettings;
