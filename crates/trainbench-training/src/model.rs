use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Models the training service knows how to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelChoice {
    RandomForestClassifier,
    LogisticRegression,
    RandomForestRegressor,
    LinearRegression,
    KMeans,
}

impl ModelChoice {
    /// All choices, in selector order.
    pub const ALL: [Self; 5] = [
        Self::RandomForestClassifier,
        Self::LogisticRegression,
        Self::RandomForestRegressor,
        Self::LinearRegression,
        Self::KMeans,
    ];

    /// Wire name used for both `model_name` and `model_choice`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RandomForestClassifier => "RandomForestClassifier",
            Self::LogisticRegression => "LogisticRegression",
            Self::RandomForestRegressor => "RandomForestRegressor",
            Self::LinearRegression => "LinearRegression",
            Self::KMeans => "KMeans",
        }
    }

    /// Position in [`ModelChoice::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model '{0}' (expected one of: RandomForestClassifier, LogisticRegression, RandomForestRegressor, LinearRegression, KMeans)")]
pub struct UnknownModel(pub String);

impl FromStr for ModelChoice {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}
