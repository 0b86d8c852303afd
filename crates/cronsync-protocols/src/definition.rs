//! Declared job definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a definition should have a live handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "StatusRepr")]
pub enum JobStatus {
    /// The definition should be scheduled.
    #[default]
    Enabled,
    /// The definition should not be scheduled.
    Disabled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Enabled => write!(f, "enabled"),
            JobStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// Accepted on-disk spellings: `1`/`0` or `"enabled"`/`"disabled"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<StatusRepr> for JobStatus {
    type Error = String;

    fn try_from(repr: StatusRepr) -> Result<Self, Self::Error> {
        match repr {
            StatusRepr::Code(1) => Ok(JobStatus::Enabled),
            StatusRepr::Code(0) => Ok(JobStatus::Disabled),
            StatusRepr::Code(other) => Err(format!("unknown job status code {}", other)),
            StatusRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "enabled" => Ok(JobStatus::Enabled),
                "disabled" => Ok(JobStatus::Disabled),
                _ => Err(format!("unknown job status '{}'", name)),
            },
        }
    }
}

/// Where a firing job reports its results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyTargets {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(default)]
    pub mobiles: Vec<String>,
}

/// Job definition as declared in the job store.
///
/// Equality covers every field, so any edit (including to `attributes`)
/// makes a live snapshot stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    /// Unique definition ID.
    pub id: String,
    /// Human readable title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cron schedule expression (seconds-first).
    pub cron_expression: String,
    /// Whether the definition should be live.
    #[serde(default)]
    pub status: JobStatus,
    /// Service the job watches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Service instance the job watches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Notification targets.
    #[serde(default)]
    pub notify: NotifyTargets,
    /// Additional execution attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl JobDefinition {
    /// Create a new enabled definition.
    pub fn new(id: impl Into<String>, cron_expression: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: None,
            cron_expression: cron_expression.into(),
            status: JobStatus::Enabled,
            service: None,
            instance: None,
            notify: NotifyTargets::default(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_service(mut self, service: impl Into<String>, instance: Option<String>) -> Self {
        self.service = Some(service.into());
        self.instance = instance;
        self
    }

    pub fn with_notify(mut self, notify: NotifyTargets) -> Self {
        self.notify = notify;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Whether the definition should have a live handle.
    pub fn is_enabled(&self) -> bool {
        self.status == JobStatus::Enabled
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
