//! The training request workflow.
//!
//! One state machine shared by every front-end:
//!
//! ```text
//! Idle -> Validating -> (reject: Idle + Notice)
//!                    -> Submitting -> (ok: Idle + Report)
//!                                  -> (err: Idle + Notice, Report unchanged)
//! ```
//!
//! Front-ends that drive requests on background tasks use the split calls
//! (`select_model`/`apply_defaults`, `begin_submit`/`finish_submit`).
//! Sequential callers can use `load_defaults` and `submit`.

use crate::backend::{TrainingBackend, TrainingRequest};
use crate::error::BackendResult;
use crate::hyperparams::HyperparameterMap;
use crate::model::ModelChoice;
use crate::report::TrainingReport;
use crate::session::SessionSource;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Generic message when the service gives no `detail`.
pub const TRAINING_FAILED: &str = "Training failed";

/// Identifies one hyperparameter fetch. Only the latest ticket may update state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    model: ModelChoice,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }
}

/// Blocking, user-facing outcome of a rejected or failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoSession,
    NoModel,
    InProgress,
    TrainingFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSession => f.write_str("No active session. Please clean and save your dataset first."),
            Self::NoModel => f.write_str("Please select a model first!"),
            Self::InProgress => f.write_str("Training is already in progress."),
            Self::TrainingFailed(message) => f.write_str(message),
        }
    }
}

/// Form and result state for one training panel.
pub struct TrainingWorkflow {
    session: Arc<dyn SessionSource>,
    model: Option<ModelChoice>,
    target: String,
    hyperparams: HyperparameterMap,
    report: Option<TrainingReport>,
    loading: bool,
    last_token: u64,
}

impl fmt::Debug for TrainingWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingWorkflow")
            .field("model", &self.model)
            .field("target", &self.target)
            .field("hyperparams", &self.hyperparams)
            .field("has_report", &self.report.is_some())
            .field("loading", &self.loading)
            .field("last_token", &self.last_token)
            .finish_non_exhaustive()
    }
}

impl TrainingWorkflow {
    pub fn new(session: Arc<dyn SessionSource>) -> Self {
        Self {
            session,
            model: None,
            target: String::new(),
            hyperparams: HyperparameterMap::new(),
            report: None,
            loading: false,
            last_token: 0,
        }
    }

    pub fn session_id(&self) -> Option<String> {
        self.session.session_id()
    }

    pub fn model(&self) -> Option<ModelChoice> {
        self.model
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    pub fn target_mut(&mut self) -> &mut String {
        &mut self.target
    }

    pub fn hyperparams(&self) -> &HyperparameterMap {
        &self.hyperparams
    }

    /// Edits an existing hyperparameter field. The value is stored as text.
    pub fn edit_param(&mut self, key: &str, text: impl Into<String>) -> bool {
        self.hyperparams.edit(key, text)
    }

    pub fn report(&self) -> Option<&TrainingReport> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Selects a model. Returns the ticket for the defaults fetch this requires,
    /// or `None` when the model was already selected.
    pub fn select_model(&mut self, model: ModelChoice) -> Option<FetchTicket> {
        if self.model == Some(model) {
            return None;
        }
        self.model = Some(model);
        self.last_token += 1;
        debug!(model = %model, token = self.last_token, "Model selected");
        Some(FetchTicket { token: self.last_token, model })
    }

    /// Applies the outcome of a defaults fetch.
    ///
    /// Stale tickets are ignored. A failed fetch clears the map. Returns
    /// whether the outcome was applied.
    pub fn apply_defaults(&mut self, ticket: FetchTicket, outcome: BackendResult<HyperparameterMap>) -> bool {
        if ticket.token != self.last_token {
            debug!(
                model = %ticket.model,
                token = ticket.token,
                latest = self.last_token,
                "Discarding stale hyperparameter defaults"
            );
            return false;
        }

        self.hyperparams = match outcome {
            Ok(defaults) => {
                debug!(model = %ticket.model, count = defaults.len(), "Loaded hyperparameter defaults");
                defaults
            }
            Err(e) => {
                warn!(model = %ticket.model, error = %e, "Hyperparameter defaults unavailable");
                HyperparameterMap::new()
            }
        };
        true
    }

    /// Selects `model` and fetches its defaults in one step.
    pub async fn load_defaults(&mut self, backend: &dyn TrainingBackend, model: ModelChoice) -> bool {
        let Some(ticket) = self.select_model(model) else {
            return false;
        };
        let outcome = backend.default_hyperparameters(model).await;
        self.apply_defaults(ticket, outcome)
    }

    /// Validates the form and enters the submitting state.
    pub fn begin_submit(&mut self) -> Result<TrainingRequest, Notice> {
        if self.loading {
            return Err(Notice::InProgress);
        }
        let Some(session_id) = self.session.session_id() else {
            return Err(Notice::NoSession);
        };
        let Some(model_choice) = self.model else {
            return Err(Notice::NoModel);
        };

        let target = Some(self.target.trim()).filter(|t| !t.is_empty()).map(str::to_string);
        self.loading = true;
        info!(model = %model_choice, target = ?target, "Submitting training request");

        Ok(TrainingRequest { session_id, target, model_choice, params: self.hyperparams.clone() })
    }

    /// Leaves the submitting state with the service's answer.
    ///
    /// On success the previous report is replaced; on failure it is kept.
    pub fn finish_submit(&mut self, outcome: BackendResult<TrainingReport>) -> Result<(), Notice> {
        self.loading = false;
        match outcome {
            Ok(report) => {
                info!(model = %report.model_name, status = %report.status, "Training successful");
                self.report = Some(report);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Training request failed");
                let message = e.detail().unwrap_or(TRAINING_FAILED).to_string();
                Err(Notice::TrainingFailed(message))
            }
        }
    }

    /// Validates, sends and records a submission.
    pub async fn submit(&mut self, backend: &dyn TrainingBackend) -> Result<(), Notice> {
        let request = self.begin_submit()?;
        let guard = SubmitGuard { workflow: self };
        let outcome = backend.train(&request).await;
        guard.workflow.finish_submit(outcome)
    }
}

/// Clears the loading flag if a `submit` future is dropped mid-request.
struct SubmitGuard<'a> {
    workflow: &'a mut TrainingWorkflow,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.workflow.loading = false;
    }
}
