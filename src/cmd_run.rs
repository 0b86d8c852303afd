//! `run` subcommand: bootstrap and reconcile until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use cronsync_config::{Config, ConfigValidator};
use cronsync_engine::CronEngine;
use cronsync_protocols::SchedulerEngine;
use cronsync_reconcile::{ReconcileLoop, ReconcileService, ReconcileSettings};
use cronsync_store::FileJobStore;

use crate::jobs::LoggingJobFactory;

pub(crate) async fn run(
    config: Config,
    interval_override: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting cronsync v{}", env!("CARGO_PKG_VERSION"));

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in &warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let store = Arc::new(FileJobStore::new(&config.store.path).await?);
    info!("Job store: {}", store.jobs_dir().display());

    let engine = Arc::new(CronEngine::new());
    let service = Arc::new(ReconcileService::new(
        engine.clone(),
        store,
        ReconcileSettings::from(&config.scheduler),
    ));

    service.init(Arc::new(LoggingJobFactory)).await?;

    let interval_secs = interval_override.unwrap_or(config.scheduler.reconcile_interval_secs);
    let runner = Arc::new(ReconcileLoop::new(service).with_interval(Duration::from_secs(interval_secs)));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let loop_handle = tokio::spawn(runner.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    let _ = shutdown_tx.send(true);
    if let Err(e) = loop_handle.await {
        warn!("Reconcile loop task ended abnormally: {}", e);
    }
    engine.shutdown().await?;

    info!("cronsync stopped");
    Ok(())
}
