use thiserror::Error;

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Failure talking to the training service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("training service not reachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("training service returned {status}")]
    Status {
        status: u16,
        /// The `detail` string from the error body, when the service sent one.
        detail: Option<String>,
    },

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BackendError {
    /// Human-readable message supplied by the service, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail: Some(detail), .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }

    /// Extracts the string `detail` field from an error response body.
    ///
    /// Bodies that are not JSON, or whose `detail` is not a string (FastAPI
    /// validation errors send an array), yield `None`.
    pub fn detail_from_body(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("detail")?.as_str().map(str::to_string)
    }
}
