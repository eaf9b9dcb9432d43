//! trainbench Training
//!
//! Backend-agnostic primitives for the training request workflow:
//! - Choosing a model and editing its hyperparameters (`HyperparameterMap`)
//! - Reading the active dataset session (`SessionSource`)
//! - Validating and submitting a training request (`TrainingWorkflow`)
//! - Talking to a training service (`TrainingBackend`)
//! - Turning a `TrainingReport` into full or compact views

pub mod backend;
pub mod config;
pub mod error;
pub mod hyperparams;
pub mod model;
pub mod report;
pub mod session;
pub mod view;
pub mod workflow;

pub use backend::{TrainingBackend, TrainingRequest};
pub use config::{ClientConfig, ConfigError, ConfigResult, DEFAULT_BACKEND_URL};
pub use error::{BackendError, BackendResult};
pub use hyperparams::{HyperValue, HyperparameterMap};
pub use model::{ModelChoice, UnknownModel};
pub use report::{ScalarMetric, TrainingReport};
pub use session::{ChainedSession, EnvSession, FixedSession, SessionFile, SessionSource};
pub use view::{CompactResultView, Density, FullResultView, SubmitControl};
pub use workflow::{FetchTicket, Notice, TrainingWorkflow};
