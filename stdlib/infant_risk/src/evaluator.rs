//! End-to-end evaluation: validate, encode, score, recommend.

use infant_model::{ModelError, ModelHandle, ModelRow};
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

use crate::config::{ConfigError, EvaluatorConfig};
use crate::decision_support::{recommend, RecommendationSet};
use crate::encode::encode;
use crate::record::{InputError, InputRecord};
use crate::risk::{score, PredictionResult};

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("model failure: {0}")]
    Model(#[from] ModelError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Outcome of one evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub model: String,
    pub row: ModelRow,
    pub prediction: PredictionResult,
    pub recommendations: RecommendationSet,
}

impl Evaluation {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "model": self.model,
            "risk_level": self.prediction.tier.label(),
            "color": self.prediction.tier.color(),
            "probability": self.prediction.probability,
            "percentage": self.prediction.percentage(),
            "label": self.prediction.label,
            "recommendations": self.recommendations,
            "model_input": self.row.to_json(),
        })
    }
}

/// Owns the model handle and configuration for a run of evaluations.
#[derive(Debug)]
pub struct RiskEvaluator {
    handle: ModelHandle,
    config: EvaluatorConfig,
}

impl RiskEvaluator {
    pub fn new(handle: ModelHandle, config: EvaluatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { handle, config })
    }

    pub fn with_defaults(handle: ModelHandle) -> Self {
        Self {
            handle,
            config: EvaluatorConfig::default(),
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn handle(&self) -> &ModelHandle {
        &self.handle
    }

    /// Reload the model from its source.
    pub fn refresh(&mut self) -> Result<(), ModelError> {
        self.handle.refresh()
    }

    /// Evaluate a record, reloading the model first when
    /// `reload_per_request` is configured. Invalid input is rejected before
    /// the model source is touched.
    pub fn evaluate(&mut self, record: &InputRecord) -> Result<Evaluation, EvaluationError> {
        record.validate()?;
        if self.config.reload_per_request {
            self.handle.refresh()?;
        }
        self.evaluate_loaded(record)
    }

    /// Evaluate a record against the currently loaded model.
    pub fn evaluate_loaded(&self, record: &InputRecord) -> Result<Evaluation, EvaluationError> {
        record.validate()?;
        let row = encode(record)?;
        let model = self.handle.model();
        let prediction = score(model, &row, &self.config.thresholds)?;
        let recommendations = recommend(record, prediction.tier, self.config.profile);
        log::debug!(
            "evaluated record with model '{}': {} ({})",
            model.name(),
            prediction.tier,
            prediction.percentage()
        );
        Ok(Evaluation {
            model: model.name().to_string(),
            row,
            prediction,
            recommendations,
        })
    }

    /// Parse an untyped field map and evaluate it.
    pub fn evaluate_json(&mut self, value: &JsonValue) -> Result<Evaluation, EvaluationError> {
        let record = InputRecord::from_json(value)?;
        self.evaluate(&record)
    }
}
