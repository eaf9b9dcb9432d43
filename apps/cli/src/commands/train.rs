//! Train command implementation.

use super::render::print_report;
use super::types::TrainArgs;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use trainbench_backend::HttpBackend;
use trainbench_training::{ClientConfig, Density, FullResultView, SubmitControl, TrainingWorkflow};

pub async fn execute(args: TrainArgs, config: &ClientConfig) -> Result<()> {
    let backend = HttpBackend::from_config(config).context("Failed to create HTTP client")?;
    let session = config.session_source(args.session.clone());
    let mut workflow = TrainingWorkflow::new(Arc::new(session));

    if let Some(model) = args.model {
        workflow.load_defaults(&backend, model).await;
        if workflow.hyperparams().is_empty() {
            warn!(model = %model, "No default hyperparameters loaded; training with an empty set");
        }
    }

    for (key, value) in &args.params {
        if !workflow.edit_param(key, value.as_str()) {
            eprintln!(
                "{} unknown hyperparameter '{}' ignored",
                "warning:".yellow().bold(),
                key
            );
        }
    }

    if let Some(target) = &args.target {
        workflow.set_target(target.as_str());
    }

    let spinner = (!args.json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(SubmitControl::new(Density::Full, true).label);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let outcome = workflow.submit(&backend).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    if let Err(notice) = outcome {
        bail!("{notice}");
    }

    let Some(report) = workflow.report() else {
        bail!("Training finished without a report");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(&FullResultView::new(report));
    }

    if args.open {
        match report.download_url() {
            Some(url) => open::that(url).with_context(|| format!("Failed to open {url}"))?,
            None => eprintln!("{} no download link to open", "warning:".yellow().bold()),
        }
    }

    Ok(())
}
