//! Job store protocol.

use async_trait::async_trait;

use crate::definition::JobDefinition;
use crate::error::StoreError;

/// Read-only view of the declared job definitions.
///
/// An empty result means there is nothing to schedule.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All definitions, in the store's order.
    async fn list_job_definitions(&self) -> Result<Vec<JobDefinition>, StoreError>;
}
