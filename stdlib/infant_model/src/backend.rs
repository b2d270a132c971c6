//! Inference contract and error types for risk models

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ModelRow;

/// Errors that can occur while loading or invoking a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model loading failed: {0}")]
    LoadError(String),
    #[error("Failed to read model artifact '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid model artifact: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Inference failed: {0}")]
    InferenceError(String),
    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
}

/// A trained binary classifier over [`ModelRow`]s.
///
/// Implementations are read-only once loaded.
pub trait RiskModel: Send + Sync {
    /// Identifier shown in logs and reports
    fn name(&self) -> &str;

    /// Predicted class label (0 or 1)
    fn predict(&self, row: &ModelRow) -> Result<u8, ModelError>;

    /// Class probabilities `[p0, p1]`
    fn predict_proba(&self, row: &ModelRow) -> Result<[f64; 2], ModelError>;
}

impl<M: RiskModel + ?Sized> RiskModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, row: &ModelRow) -> Result<u8, ModelError> {
        (**self).predict(row)
    }

    fn predict_proba(&self, row: &ModelRow) -> Result<[f64; 2], ModelError> {
        (**self).predict_proba(row)
    }
}

/// Positive-class probability from a `predict_proba` result.
///
/// Rejects vectors with non-finite entries or a positive entry outside [0, 1].
pub fn positive_probability(proba: [f64; 2]) -> Result<f64, ModelError> {
    let [p0, p1] = proba;
    if !p0.is_finite() || !p1.is_finite() {
        return Err(ModelError::InvalidOutput(format!(
            "non-finite probability vector [{p0}, {p1}]"
        )));
    }
    if !(0.0..=1.0).contains(&p1) {
        return Err(ModelError::InvalidOutput(format!(
            "positive-class probability {p1} outside [0, 1]"
        )));
    }
    Ok(p1)
}
