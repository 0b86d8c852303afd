//! `check` subcommand: validate and show what startup would schedule.

use std::sync::Arc;

use cronsync_config::{Config, ConfigValidator};
use cronsync_engine::CronEngine;
use cronsync_protocols::Trigger;
use cronsync_reconcile::{ReconcileService, ReconcileSettings};
use cronsync_store::FileJobStore;

pub(crate) async fn check(config: Config, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &validation.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !validation.is_valid() {
        return Err(format!("{} configuration error(s)", validation.errors.len()).into());
    }

    // A fresh engine shows exactly what `run` would do at startup.
    let service = ReconcileService::new(
        Arc::new(CronEngine::new()),
        Arc::new(FileJobStore::open(&config.store.path)),
        ReconcileSettings::from(&config.scheduler),
    );
    let plan = service.plan().await?;

    // Bad crons are reported for disabled definitions too.
    let mut invalid = 0usize;
    for step in &plan {
        let def = &step.definition;
        if let Err(e) = Trigger::cron(&def.cron_expression) {
            println!("error: definition '{}': {}", def.id, e);
            invalid += 1;
        } else if let Err(reason) = &step.outcome {
            println!("error: definition '{}': {}", def.id, reason);
            invalid += 1;
        }
    }

    match format {
        "json" => {
            let rows: Vec<serde_json::Value> = plan
                .iter()
                .map(|step| {
                    serde_json::json!({
                        "id": step.definition.id,
                        "key": step.key.to_string(),
                        "status": step.definition.status,
                        "cron": step.definition.cron_expression,
                        "action": step.action().map(|a| a.to_string()),
                        "error": step.outcome.as_ref().err(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            if plan.is_empty() {
                println!("No job definitions found in {}.", config.store.path.display());
            } else {
                println!("{:<12} {:<28} {:<10} {:<20} {}", "ID", "KEY", "STATUS", "CRON", "ACTION");
                println!("{}", "-".repeat(80));
                for step in &plan {
                    let action = match step.action() {
                        Some(action) => action.to_string(),
                        None => "rejected".to_string(),
                    };
                    println!(
                        "{:<12} {:<28} {:<10} {:<20} {}",
                        step.definition.id,
                        step.key.to_string(),
                        step.definition.status.to_string(),
                        step.definition.cron_expression,
                        action
                    );
                }
            }
        }
    }

    if invalid > 0 {
        return Err(format!("{} definition(s) would fail to reconcile", invalid).into());
    }
    Ok(())
}
