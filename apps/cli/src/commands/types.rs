//! Command type definitions shared between main.rs and tests.

use clap::Args;
use trainbench_training::ModelChoice;

/// Parse a `KEY=VALUE` hyperparameter override.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing hyperparameter name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_model(raw: &str) -> Result<ModelChoice, String> {
    raw.parse::<ModelChoice>().map_err(|e| e.to_string())
}

#[derive(Args, Debug, Clone)]
pub struct ModelsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct HyperparamsArgs {
    /// Model to look up (e.g. LogisticRegression)
    #[arg(value_parser = parse_model)]
    pub model: ModelChoice,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Dataset session id (overrides TRAINBENCH_SESSION_ID, config and session file)
    #[arg(long)]
    pub session: Option<String>,

    /// Model to train
    #[arg(short, long, value_parser = parse_model)]
    pub model: Option<ModelChoice>,

    /// Target column (leave empty to use the last column)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Hyperparameter override, repeatable (e.g. --param max_iter=200)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Print the raw training report as JSON
    #[arg(long)]
    pub json: bool,

    /// Open the model download link in the default browser
    #[arg(long)]
    pub open: bool,
}
