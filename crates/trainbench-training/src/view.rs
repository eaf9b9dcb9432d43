//! Presentation-neutral views of the workflow state.
//!
//! Both front-ends draw from these; neither inspects a `TrainingReport`
//! directly.

use crate::report::{ScalarMetric, TrainingReport};

/// How much detail a front-end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Full,
    Compact,
}

/// State of the train button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}

impl SubmitControl {
    pub fn new(density: Density, loading: bool) -> Self {
        let label = match (density, loading) {
            (Density::Full, false) => "🚀 Train Model",
            (Density::Full, true) => "⏳ Training...",
            (Density::Compact, false) => "🚀 Train",
            (Density::Compact, true) => "Training...",
        };
        Self { label, enabled: !loading }
    }
}

/// Everything the full report shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FullResultView {
    pub status: String,
    pub model_name: String,
    pub problem_type: String,
    /// The whole metrics map as indented JSON.
    pub metrics_json: String,
    pub download_url: Option<String>,
    /// Server-side model path, when the service reported one.
    pub server_file: Option<String>,
}

impl FullResultView {
    pub fn new(report: &TrainingReport) -> Self {
        Self {
            status: report.status.clone(),
            model_name: report.model_name.clone(),
            problem_type: report.problem_type.clone(),
            metrics_json: report.metrics_pretty(),
            download_url: report.download_url().map(str::to_string),
            server_file: Some(report.model_path.clone()).filter(|p| !p.is_empty()),
        }
    }
}

/// Everything the compact panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactResultView {
    pub model_name: String,
    pub problem_type: String,
    pub target_label: String,
    pub model_path: String,
    pub artifact_file: Option<String>,
    pub metrics: Vec<ScalarMetric>,
    pub download_url: Option<String>,
}

impl CompactResultView {
    pub const INFERRED_TARGET: &'static str = "auto (last column)";
    pub const NO_METRICS: &'static str = "No scalar metrics returned";
    pub const NO_RESULTS: &'static str = "No results yet";

    pub fn new(report: &TrainingReport) -> Self {
        Self {
            model_name: report.model_name.clone(),
            problem_type: report.problem_type.clone(),
            target_label: report
                .target_column
                .clone()
                .unwrap_or_else(|| Self::INFERRED_TARGET.to_string()),
            model_path: report.model_path.clone(),
            artifact_file: report.hf_filename.clone().filter(|f| !f.is_empty()),
            metrics: report.scalar_metrics(),
            download_url: report.download_url().map(str::to_string),
        }
    }

    /// One `name: value` line per scalar metric, or the placeholder.
    pub fn metric_lines(&self) -> Vec<String> {
        if self.metrics.is_empty() {
            return vec![Self::NO_METRICS.to_string()];
        }
        self.metrics.iter().map(ToString::to_string).collect()
    }
}
