//! In-memory job store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use cronsync_protocols::{JobDefinition, JobStatus, JobStore, StoreError};

/// In-memory job store. Keeps insertion order.
pub struct MemoryJobStore {
    definitions: RwLock<Vec<JobDefinition>>,
}

impl MemoryJobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            definitions: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding `definitions` in the given order.
    pub fn with_definitions(definitions: Vec<JobDefinition>) -> Self {
        Self {
            definitions: RwLock::new(definitions),
        }
    }

    /// Insert a definition, replacing one with the same ID in place.
    pub async fn save(&self, definition: JobDefinition) {
        let mut definitions = self.definitions.write().await;
        match definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(existing) => *existing = definition,
            None => definitions.push(definition),
        }
    }

    /// Remove a definition outright. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut definitions = self.definitions.write().await;
        let before = definitions.len();
        definitions.retain(|d| d.id != id);
        definitions.len() != before
    }

    /// Flip a definition's status. Returns whether it existed.
    pub async fn set_status(&self, id: &str, status: JobStatus) -> bool {
        let mut definitions = self.definitions.write().await;
        match definitions.iter_mut().find(|d| d.id == id) {
            Some(def) => {
                def.status = status;
                true
            }
            None => false,
        }
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list_job_definitions(&self) -> Result<Vec<JobDefinition>, StoreError> {
        Ok(self.definitions.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_keeps_order() {
        let store = MemoryJobStore::new();
        store.save(JobDefinition::new("2", "0 * * * * *")).await;
        store.save(JobDefinition::new("1", "0 * * * * *")).await;

        let ids: Vec<String> = store
            .list_job_definitions()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_save_replaces_in_place() {
        let store = MemoryJobStore::with_definitions(vec![
            JobDefinition::new("1", "0 * * * * *"),
            JobDefinition::new("2", "0 * * * * *"),
        ]);
        store.save(JobDefinition::new("1", "0 0 * * * *")).await;

        let all = store.list_job_definitions().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "1");
        assert_eq!(all[0].cron_expression, "0 0 * * * *");
    }

    #[tokio::test]
    async fn test_remove_and_set_status() {
        let store = MemoryJobStore::with_definitions(vec![JobDefinition::new("1", "0 * * * * *")]);

        assert!(store.set_status("1", JobStatus::Disabled).await);
        assert!(!store.set_status("2", JobStatus::Disabled).await);
        assert_eq!(
            store.list_job_definitions().await.unwrap()[0].status,
            JobStatus::Disabled
        );

        assert!(store.remove("1").await);
        assert!(!store.remove("1").await);
        assert!(store.list_job_definitions().await.unwrap().is_empty());
    }
}
