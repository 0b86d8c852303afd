//! Two-part handle keys.

use serde::{Deserialize, Serialize};

/// Key under which a handle lives in the scheduler engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobKey {
    pub group: String,
    pub name: String,
}

impl JobKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Key for a declared definition: `prefix` + `id` inside `group`.
    pub fn for_definition(group: &str, prefix: &str, id: &str) -> Self {
        Self::new(group, format!("{}{}", prefix, id))
    }
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_definition_is_deterministic() {
        let a = JobKey::for_definition("cronsync", "monitor_", "1");
        let b = JobKey::for_definition("cronsync", "monitor_", "1");
        assert_eq!(a, b);
        assert_eq!(a.name, "monitor_1");
        assert_eq!(a.group, "cronsync");
    }

    #[test]
    fn test_groups_separate_keys() {
        let a = JobKey::new("alpha", "monitor_1");
        let b = JobKey::new("beta", "monitor_1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(JobKey::new("cronsync", "maintenance").to_string(), "cronsync.maintenance");
    }
}
