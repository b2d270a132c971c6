//! Infant mortality risk evaluation.
//!
//! A survey [`InputRecord`] is encoded into the classifier's training schema,
//! scored by a [`RiskModel`](infant_model::RiskModel), bucketed into a
//! [`RiskTier`] and paired with static recommendations.

pub mod config;
pub mod decision_support;
pub mod encode;
pub mod evaluator;
pub mod record;
pub mod risk;

pub use config::{ConfigError, EvaluatorConfig};
pub use decision_support::{recommend, RecommendationProfile, RecommendationSet};
pub use encode::encode;
pub use evaluator::{Evaluation, EvaluationError, RiskEvaluator};
pub use record::{FieldKind, FieldSpec, InputError, InputRecord};
pub use risk::{score, PredictionResult, RiskTier, TierThresholds};

pub use infant_model::{ModelError, ModelHandle, RiskModel, WealthIndex};
