//! Evaluator configuration, loadable from JSON.
//!
//! Every key is optional; absent keys take the defaults:
//!
//! ```json
//! {
//!   "thresholds": { "low": 0.30, "high": 0.70 },
//!   "profile": "extended",
//!   "reload_per_request": false
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::decision_support::RecommendationProfile;
use crate::risk::TierThresholds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tier thresholds low={low}, high={high} (need 0 <= low <= high <= 1)")]
    InvalidThresholds { low: f64, high: f64 },
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub thresholds: TierThresholds,
    pub profile: RecommendationProfile,
    /// Reload the model before every evaluation
    pub reload_per_request: bool,
}

impl EvaluatorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: EvaluatorConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        EvaluatorConfig::from_json_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()
    }
}
