//! # cronsync Store
//!
//! [`JobStore`] implementations. The reconcile core only ever reads through
//! the trait; the write helpers on each store are for the CLI and tests.
//!
//! [`JobStore`]: cronsync_protocols::JobStore

mod file;
mod memory;

pub use file::FileJobStore;
pub use memory::MemoryJobStore;
