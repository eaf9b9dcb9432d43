//! Hyperparams command implementation.

use super::types::HyperparamsArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use trainbench_backend::HttpBackend;
use trainbench_training::{ClientConfig, FixedSession, TrainingWorkflow};

/// Fetch and print a model's default hyperparameters.
///
/// An unavailable service prints an empty set, like the train form would.
pub async fn execute(args: HyperparamsArgs, config: &ClientConfig) -> Result<()> {
    let backend = HttpBackend::from_config(config).context("Failed to create HTTP client")?;
    let mut workflow = TrainingWorkflow::new(Arc::new(FixedSession::none()));
    workflow.load_defaults(&backend, args.model).await;
    let defaults = workflow.hyperparams();

    if args.json {
        println!("{}", serde_json::to_string_pretty(defaults)?);
        return Ok(());
    }

    println!();
    println!("{}", format!("Default Hyperparameters: {}", args.model).bold().cyan());
    println!();

    if defaults.is_empty() {
        println!("  {}", "No default hyperparameters available.".dimmed());
        println!("  {}", format!("Is the training service running at {}?", backend.base_url()).dimmed());
        println!();
        return Ok(());
    }

    let width = defaults.keys().map(str::len).max().unwrap_or(0);
    for (key, value) in defaults.iter() {
        println!("  {:<width$}  {}", key, value.field_text().cyan(), width = width);
    }
    println!();
    Ok(())
}
