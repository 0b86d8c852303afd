//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scheduler and reconciliation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Group tag shared by every handle this service owns.
    #[serde(default = "default_group")]
    pub group: String,

    /// Prefix joined with a definition ID to form its key name.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Cron expression for the maintenance job.
    #[serde(default = "default_maintenance_cron")]
    pub maintenance_cron: String,

    /// Seconds between reconcile passes.
    #[serde(default = "default_reconcile_interval")]
    pub reconcile_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            key_prefix: default_key_prefix(),
            maintenance_cron: default_maintenance_cron(),
            reconcile_interval_secs: default_reconcile_interval(),
        }
    }
}

fn default_group() -> String {
    "cronsync".to_string()
}

fn default_key_prefix() -> String {
    "monitor_".to_string()
}

fn default_maintenance_cron() -> String {
    "0 0 3 * * ?".to_string()
}

fn default_reconcile_interval() -> u64 {
    60
}

/// Job store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory of the file store; definitions live in `<path>/jobs`.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files. Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `~/.cronsync`, or `.cronsync` when there is no home directory.
pub fn cronsync_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".cronsync"))
        .unwrap_or_else(|| PathBuf::from(".cronsync"))
}

fn default_store_path() -> PathBuf {
    cronsync_dir()
}
