//! trainbench Backend
//!
//! `reqwest` implementation of [`TrainingBackend`] for the training service's
//! HTTP API:
//!
//! - `GET  /hyperparameters?model_name=<model>`
//! - `POST /train-model` (multipart form)

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use trainbench_training::{
    BackendError, BackendResult, ClientConfig, HyperparameterMap, ModelChoice, TrainingBackend, TrainingReport,
    TrainingRequest,
};

/// HTTP client for the training service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL without a trailing slash (e.g. "http://localhost:7860").
    base_url: String,
    /// HTTP client for making requests.
    client: Client,
}

#[derive(Deserialize)]
struct DefaultsResponse {
    default_hyperparameters: HyperparameterMap,
}

impl HttpBackend {
    /// Creates a backend for `base_url` with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: Self::normalize(base_url.into()), client: Client::new() }
    }

    /// Creates a backend whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns `BackendError::Client` if the HTTP client cannot be created.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;
        Ok(Self { base_url: Self::normalize(base_url.into()), client })
    }

    /// Creates a backend from the URL and timeout in `config`.
    pub fn from_config(config: &ClientConfig) -> BackendResult<Self> {
        Self::with_timeout(config.backend_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn normalize(mut base_url: String) -> String {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        base_url
    }

    fn send_error(&self, e: &reqwest::Error) -> BackendError {
        error!(error = %e, base_url = %self.base_url, "Failed to reach training service");
        BackendError::Unreachable { url: self.base_url.clone(), message: e.to_string() }
    }

    /// Turns a response into `T`, or into a `Status` error carrying any `detail`.
    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| BackendError::Decode(e.to_string()))?;

        if !status.is_success() {
            let detail = BackendError::detail_from_body(&body);
            error!(status = %status, detail = ?detail, "Training service returned error status");
            return Err(BackendError::Status { status: status.as_u16(), detail });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse training service response");
            BackendError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl TrainingBackend for HttpBackend {
    async fn default_hyperparameters(&self, model: ModelChoice) -> BackendResult<HyperparameterMap> {
        let url = format!("{}/hyperparameters", self.base_url);
        debug!(model = %model, url = %url, "Fetching default hyperparameters");

        let response = self
            .client
            .get(&url)
            .query(&[("model_name", model.as_str())])
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let defaults: DefaultsResponse = Self::decode(response).await?;
        Ok(defaults.default_hyperparameters)
    }

    async fn train(&self, request: &TrainingRequest) -> BackendResult<TrainingReport> {
        let url = format!("{}/train-model", self.base_url);
        debug!(
            model = %request.model_choice,
            target = ?request.target,
            params = request.params.len(),
            "Posting training request"
        );

        let form = request
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        Self::decode(response).await
    }
}
