//! File system based job store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use cronsync_protocols::{JobDefinition, JobStore, StoreError};

/// Job store backed by one JSON file per definition under `<root>/jobs`.
///
/// Definitions are listed in file name order. A missing directory means an
/// empty store; unreadable or malformed files are skipped with a warning, as
/// is any file repeating an ID already listed.
pub struct FileJobStore {
    storage_path: PathBuf,
}

impl FileJobStore {
    /// Create a store rooted at `storage_path`, creating `jobs/` if needed.
    pub async fn new(storage_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let storage_path = storage_path.into();
        fs::create_dir_all(storage_path.join("jobs")).await?;

        debug!("FileJobStore initialized at {:?}", storage_path);
        Ok(Self { storage_path })
    }

    /// Open a store without touching the file system.
    pub fn open(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    pub fn jobs_dir(&self) -> PathBuf {
        self.storage_path.join("jobs")
    }

    fn job_path(&self, id: &str) -> PathBuf {
        self.jobs_dir().join(format!("{}.json", Self::sanitize_id(id)))
    }

    fn sanitize_id(id: &str) -> String {
        id.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Write a definition, replacing any previous file for the same ID.
    pub async fn save(&self, definition: &JobDefinition) -> Result<(), StoreError> {
        fs::create_dir_all(self.jobs_dir()).await?;
        let path = self.job_path(&definition.id);
        let content = serde_json::to_string_pretty(definition)?;
        fs::write(&path, content).await?;

        debug!("Saved job definition '{}' to {:?}", definition.id, path);
        Ok(())
    }

    /// Load one definition by ID.
    pub async fn load(&self, id: &str) -> Result<Option<JobDefinition>, StoreError> {
        let path = self.job_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Delete a definition's file. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let path = self.job_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        debug!("Deleted job definition '{}' from {:?}", id, path);
        Ok(true)
    }

    async fn read_definition(path: &Path) -> Option<JobDefinition> {
        match fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str::<JobDefinition>(&content) {
                Ok(def) => Some(def),
                Err(e) => {
                    warn!("Failed to deserialize job definition from {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read job definition file {:?}: {}", path, e);
                None
            }
        }
    }
}

#[async_trait]
impl JobStore for FileJobStore {
    async fn list_job_definitions(&self) -> Result<Vec<JobDefinition>, StoreError> {
        let jobs_dir = self.jobs_dir();
        if !jobs_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&jobs_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut definitions = Vec::with_capacity(paths.len());
        let mut seen = HashSet::new();
        for path in &paths {
            let Some(def) = Self::read_definition(path).await else {
                continue;
            };
            if !seen.insert(def.id.clone()) {
                warn!("Skipping {:?}: job definition '{}' is already listed", path, def.id);
                continue;
            }
            definitions.push(def);
        }

        debug!("Loaded {} job definitions from {:?}", definitions.len(), jobs_dir);
        Ok(definitions)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
