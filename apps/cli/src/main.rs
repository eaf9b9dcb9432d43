//! trainbench CLI - Command-line client for the training service
//!
//! Picks a model, fetches its default hyperparameters, submits a training
//! request for the active dataset session and prints the full report.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{hyperparams, models, train};
use commands::types::{HyperparamsArgs, ModelsArgs, TrainArgs};

/// trainbench - train models on a prepared dataset session
#[derive(Parser, Debug)]
#[command(
    name = "trainbench",
    author,
    version,
    about = "trainbench - train models on a prepared dataset session",
    long_about = "trainbench talks to a training service: it fetches default hyperparameters,\nsubmits training requests for a cleaned dataset session and prints the resulting metrics."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Training service URL (overrides TRAINBENCH_BACKEND_URL and config files)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the models the training service accepts
    Models(ModelsArgs),

    /// Show the default hyperparameters for a model
    Hyperparams(HyperparamsArgs),

    /// Train a model on the active session and print the report
    ///
    /// Fetches the model's defaults, applies --param overrides, submits the
    /// request and prints model, problem type, all metrics and the download link.
    Train(TrainArgs),
}

fn parse_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let client_config = config::load_config(args.backend_url.clone());

    // Initialize tracing. Logs go to stderr so `--json` output stays clean.
    let level = args
        .log_level
        .as_deref()
        .or(client_config.log_level.as_deref())
        .map_or(Level::WARN, parse_level);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Models(cmd) => models::execute(&cmd)?,
        Command::Hyperparams(cmd) => hyperparams::execute(cmd, &client_config).await?,
        Command::Train(cmd) => train::execute(cmd, &client_config).await?,
    }

    Ok(())
}
