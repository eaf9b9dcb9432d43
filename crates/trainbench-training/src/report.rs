use crate::hyperparams::HyperparameterMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful `POST /train-model`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub status: String,
    pub model_name: String,
    /// Problem type the service detected ("classification", "regression", ...).
    #[serde(default)]
    pub problem_type: String,
    /// Column the service trained against; `None` when it was inferred and not echoed.
    #[serde(default)]
    pub target_column: Option<String>,
    #[serde(default)]
    pub hyperparameters_used: HyperparameterMap,
    /// Metric name to value. Values may be scalars or nested structures
    /// (confusion matrices, per-class reports, cluster labels).
    #[serde(default)]
    pub metrics: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub huggingface_download_url: Option<String>,
    #[serde(default)]
    pub model_path: String,
}

/// A metric whose value is a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarMetric {
    pub name: String,
    pub value: f64,
}

impl ScalarMetric {
    /// Value rounded to four decimal places.
    pub fn formatted(&self) -> String {
        format!("{:.4}", self.value)
    }
}

impl std::fmt::Display for ScalarMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.formatted())
    }
}

impl TrainingReport {
    /// Metrics that are finite numbers, in report order.
    ///
    /// Booleans, strings, nulls, arrays and objects are skipped.
    pub fn scalar_metrics(&self) -> Vec<ScalarMetric> {
        self.metrics
            .iter()
            .filter_map(|(name, value)| {
                let Value::Number(number) = value else {
                    return None;
                };
                let value = number.as_f64()?;
                value.is_finite().then(|| ScalarMetric { name: name.clone(), value })
            })
            .collect()
    }

    /// Download link for the hosted artifact, if the upload succeeded.
    pub fn download_url(&self) -> Option<&str> {
        self.huggingface_download_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Metrics as indented JSON.
    pub fn metrics_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.metrics).unwrap_or_else(|_| "{}".to_string())
    }
}
