//! # cronsync Engine
//!
//! In-process implementation of [`SchedulerEngine`] built on tokio.
//!
//! Every handle gets its own firing task once the engine is started. The
//! task sleeps until the trigger's next fire time, asks the installed
//! [`JobFactory`] for a job and runs it on a separate task so a slow job
//! never delays the next fire.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cronsync_engine::CronEngine;
//! use cronsync_protocols::{JobKey, JobPayload, SchedulerEngine, Trigger};
//!
//! let engine = CronEngine::new();
//! engine.set_job_factory(factory);
//! engine
//!     .schedule(JobKey::new("cronsync", "maintenance"), Trigger::cron("0 0 3 * * ?")?, JobPayload::Maintenance)
//!     .await?;
//! engine.start().await?;
//! ```
//!
//! [`SchedulerEngine`]: cronsync_protocols::SchedulerEngine
//! [`JobFactory`]: cronsync_protocols::JobFactory

mod engine;
mod entry;
mod firing;

pub use engine::CronEngine;
