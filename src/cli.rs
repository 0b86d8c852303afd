//! CLI definitions for cronsync.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cronsync CLI.
#[derive(Parser)]
#[command(name = "cronsync")]
#[command(about = "Keeps cron-triggered jobs in sync with their stored definitions")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "cronsync.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Bootstrap the scheduler and reconcile until interrupted (default)
    Run {
        /// Override the reconcile interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Validate configuration and stored definitions, and show the startup plan
    Check {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}
