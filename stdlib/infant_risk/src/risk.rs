use infant_model::{positive_probability, ModelError, ModelRow, RiskModel};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// Display color for the tier label
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Medium => "orange",
            RiskTier::High => "red",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cut points splitting [0, 1] into Low `[0, low)`, Medium `[low, high)`
/// and High `[high, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub low: f64,
    pub high: f64,
}

impl TierThresholds {
    pub const STANDARD: TierThresholds = TierThresholds {
        low: 0.30,
        high: 0.70,
    };

    pub const THIRDS: TierThresholds = TierThresholds {
        low: 0.33,
        high: 0.66,
    };

    pub fn new(low: f64, high: f64) -> Result<Self, ConfigError> {
        let t = TierThresholds { low, high };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = (0.0..=1.0).contains(&self.low)
            && (0.0..=1.0).contains(&self.high)
            && self.low <= self.high;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidThresholds {
                low: self.low,
                high: self.high,
            })
        }
    }

    pub fn tier(&self, probability: f64) -> RiskTier {
        if probability < self.low {
            RiskTier::Low
        } else if probability < self.high {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of the positive (death within 0-11 months) class
    pub probability: f64,
    pub tier: RiskTier,
    /// Class label reported by the model's own decision rule
    pub label: u8,
}

impl PredictionResult {
    /// Probability as a percentage with two decimals, e.g. `"12.34%"`
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

/// Run the model on an encoded row and bucket the positive-class probability.
pub fn score(
    model: &dyn RiskModel,
    row: &ModelRow,
    thresholds: &TierThresholds,
) -> Result<PredictionResult, ModelError> {
    let label = model.predict(row)?;
    let probability = positive_probability(model.predict_proba(row)?)?;
    let tier = thresholds.tier(probability);
    log::debug!(
        "model '{}' scored p={probability:.4} -> {tier} (label {label})",
        model.name()
    );
    Ok(PredictionResult {
        probability,
        tier,
        label,
    })
}
