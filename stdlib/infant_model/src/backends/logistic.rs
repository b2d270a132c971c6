//! Logistic-regression artifact: p = sigmoid(intercept + sum(w * x))
//!
//! Artifacts are JSON documents keyed by training column name:
//!
//! ```json
//! {
//!   "name": "child-recode-v1",
//!   "intercept": -2.1,
//!   "coefficients": {
//!     "v170 - has an account in a bank or other financial institution": -0.4,
//!     "v136 - number of household members (listed)": -0.05,
//!     "bord - birth order number": 0.22,
//!     "m14 - number of antenatal visits during pregnancy": -0.12,
//!     "v190 - wealth index combined": 0.1
//!   },
//!   "wealth_levels": ["Poorest", "Poorer", "Middle", "Richer", "Richest"]
//! }
//! ```
//!
//! The ordinal column is coded as the label's position in `wealth_levels`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use crate::backend::{ModelError, RiskModel};
use crate::schema::{ColumnValue, ModelRow, WealthIndex, COLUMNS};

fn default_decision_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
    pub wealth_levels: Vec<WealthIndex>,
    /// Probability at or above which `predict` returns 1
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

impl LogisticModel {
    pub fn from_json_str(s: &str) -> Result<LogisticModel, ModelError> {
        let model: LogisticModel = serde_json::from_str(s)?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<LogisticModel, ModelError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = LogisticModel::from_json_str(&s)?;
        log::debug!(
            "parsed logistic artifact '{}' from {}",
            model.name,
            path.display()
        );
        Ok(model)
    }

    /// Check the artifact against the training schema.
    pub fn validate(&self) -> Result<(), ModelError> {
        for column in COLUMNS {
            if !self.coefficients.contains_key(column) {
                return Err(ModelError::SchemaMismatch(format!(
                    "no coefficient for column '{column}'"
                )));
            }
        }
        if let Some(extra) = self
            .coefficients
            .keys()
            .find(|k| !COLUMNS.contains(&k.as_str()))
        {
            return Err(ModelError::SchemaMismatch(format!(
                "coefficient for unknown column '{extra}'"
            )));
        }

        for level in WealthIndex::ALL {
            let count = self.wealth_levels.iter().filter(|w| **w == level).count();
            if count != 1 {
                return Err(ModelError::SchemaMismatch(format!(
                    "wealth level '{level}' listed {count} times in wealth_levels"
                )));
            }
        }
        if !self.intercept.is_finite() || self.coefficients.values().any(|w| !w.is_finite()) {
            return Err(ModelError::LoadError(
                "intercept and coefficients must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(ModelError::LoadError(format!(
                "decision_threshold {} outside [0, 1]",
                self.decision_threshold
            )));
        }
        Ok(())
    }

    fn ordinal_code(&self, label: WealthIndex) -> Result<f64, ModelError> {
        self.wealth_levels
            .iter()
            .position(|w| *w == label)
            .map(|i| i as f64)
            .ok_or_else(|| {
                ModelError::SchemaMismatch(format!("wealth level '{label}' not in artifact"))
            })
    }

    fn linear_predictor(&self, row: &ModelRow) -> Result<f64, ModelError> {
        let mut z = self.intercept;
        for (column, value) in row.columns() {
            let w = self.coefficients.get(column).copied().ok_or_else(|| {
                ModelError::SchemaMismatch(format!("no coefficient for column '{column}'"))
            })?;
            let x = match value {
                ColumnValue::Integer(v) => v as f64,
                ColumnValue::Ordinal(label) => self.ordinal_code(label)?,
            };
            z += w * x;
        }
        if z.is_finite() {
            Ok(z)
        } else {
            Err(ModelError::InferenceError(format!(
                "linear predictor diverged to {z}"
            )))
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl RiskModel for LogisticModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &ModelRow) -> Result<u8, ModelError> {
        let [_, p1] = self.predict_proba(row)?;
        Ok(u8::from(p1 >= self.decision_threshold))
    }

    fn predict_proba(&self, row: &ModelRow) -> Result<[f64; 2], ModelError> {
        let p1 = sigmoid(self.linear_predictor(row)?);
        Ok([1.0 - p1, p1])
    }
}
