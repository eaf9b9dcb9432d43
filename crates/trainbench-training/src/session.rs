//! Access to the dataset session created by the clean/save step.
//!
//! The workflow only ever reads a session id. Where it comes from (a flag,
//! the environment, a file the dataset step wrote) is decided by whoever
//! builds the workflow.

use std::path::PathBuf;
use tracing::debug;

/// Read-only accessor for the active session id.
pub trait SessionSource: Send + Sync {
    /// The current session id, or `None` when no session is active.
    fn session_id(&self) -> Option<String>;
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A session id fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct FixedSession(Option<String>);

impl FixedSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self(Some(session_id.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for FixedSession {
    fn from(session_id: Option<String>) -> Self {
        Self(session_id)
    }
}

impl SessionSource for FixedSession {
    fn session_id(&self) -> Option<String> {
        self.0.as_deref().and_then(non_blank)
    }
}

/// Session id read from an environment variable on every access.
#[derive(Debug, Clone)]
pub struct EnvSession {
    var: String,
}

impl EnvSession {
    pub const DEFAULT_VAR: &'static str = "TRAINBENCH_SESSION_ID";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSession {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl SessionSource for EnvSession {
    fn session_id(&self) -> Option<String> {
        std::env::var(&self.var).ok().as_deref().and_then(non_blank)
    }
}

/// Session id stored in a file, re-read on every access.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionSource for SessionFile {
    fn session_id(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => non_blank(&contents),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No session file");
                None
            }
        }
    }
}

/// First source with a session wins.
#[derive(Default)]
pub struct ChainedSession {
    sources: Vec<Box<dyn SessionSource>>,
}

impl ChainedSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, source: impl SessionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl SessionSource for ChainedSession {
    fn session_id(&self) -> Option<String> {
        self.sources.iter().find_map(|source| source.session_id())
    }
}
