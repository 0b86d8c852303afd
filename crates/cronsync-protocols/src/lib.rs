//! # cronsync Protocols
//!
//! Shared types and trait seams for the cronsync workspace.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`SchedulerEngine`] - Live trigger registry that fires scheduled jobs
//! - [`JobStore`] - Read-only source of declared job definitions
//! - [`JobFactory`] / [`Job`] - Work bound to a handle when its trigger fires

pub mod definition;
pub mod engine;
pub mod error;
pub mod job;
pub mod key;
pub mod store;
pub mod trigger;

pub use definition::{JobDefinition, JobStatus, NotifyTargets};
pub use engine::{EngineState, HandleState, JobPayload, ScheduledHandle, SchedulerEngine};
pub use error::{EngineError, JobError, StoreError};
pub use job::{Job, JobContext, JobFactory};
pub use key::JobKey;
pub use store::JobStore;
pub use trigger::Trigger;
