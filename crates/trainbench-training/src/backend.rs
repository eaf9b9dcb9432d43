use crate::error::BackendResult;
use crate::hyperparams::HyperparameterMap;
use crate::model::ModelChoice;
use crate::report::TrainingReport;
use async_trait::async_trait;

/// A validated training submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRequest {
    pub session_id: String,
    /// Trimmed target column; `None` lets the service infer it.
    pub target: Option<String>,
    pub model_choice: ModelChoice,
    pub params: HyperparameterMap,
}

impl TrainingRequest {
    /// `params` form field value.
    pub fn params_json(&self) -> String {
        self.params.to_json()
    }

    /// Form fields in submission order. `target` is left out when unset.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("session_id", self.session_id.clone())];
        if let Some(target) = &self.target {
            fields.push(("target", target.clone()));
        }
        fields.push(("model_choice", self.model_choice.as_str().to_string()));
        fields.push(("params", self.params_json()));
        fields
    }
}

/// The remote training service.
#[async_trait]
pub trait TrainingBackend: Send + Sync {
    /// `GET /hyperparameters?model_name=...`
    async fn default_hyperparameters(&self, model: ModelChoice) -> BackendResult<HyperparameterMap>;

    /// `POST /train-model`
    async fn train(&self, request: &TrainingRequest) -> BackendResult<TrainingReport>;
}
