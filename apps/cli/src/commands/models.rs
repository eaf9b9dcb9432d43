//! Models command implementation.

use super::types::ModelsArgs;
use anyhow::Result;
use colored::Colorize;
use trainbench_training::ModelChoice;

/// List the model choices the training service accepts.
pub fn execute(args: &ModelsArgs) -> Result<()> {
    if args.json {
        let names: Vec<_> = ModelChoice::ALL.iter().map(|m| m.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    println!();
    println!("{}", format!("Available Models ({})", ModelChoice::ALL.len()).bold().cyan());
    println!();
    for (i, model) in ModelChoice::ALL.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dimmed(), model.as_str().cyan());
    }
    println!();
    println!("  {}", "Tip: `trainbench hyperparams <MODEL>` shows a model's defaults.".dimmed());
    println!();
    Ok(())
}
