#![allow(dead_code)]

use infant_model::{ModelError, ModelRow, RiskModel};
use infant_risk::{InputRecord, WealthIndex};

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Returns the same positive-class probability for every row.
pub struct FixedProbability(pub f64);

impl RiskModel for FixedProbability {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, _row: &ModelRow) -> Result<u8, ModelError> {
        Ok(u8::from(self.0 >= 0.5))
    }

    fn predict_proba(&self, _row: &ModelRow) -> Result<[f64; 2], ModelError> {
        Ok([1.0 - self.0, self.0])
    }
}

/// Always fails, like an artifact whose schema drifted from the encoder.
pub struct BrokenModel;

impl RiskModel for BrokenModel {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict(&self, _row: &ModelRow) -> Result<u8, ModelError> {
        Err(ModelError::SchemaMismatch("column 'hisei' expected".into()))
    }

    fn predict_proba(&self, _row: &ModelRow) -> Result<[f64; 2], ModelError> {
        Err(ModelError::SchemaMismatch("column 'hisei' expected".into()))
    }
}

/// Richest household without a bank account: only the bank-account rule fires.
pub fn richest_unbanked() -> InputRecord {
    InputRecord {
        has_bank_account: false,
        wealth: WealthIndex::Richest,
        household_size: 5,
        birth_order: 1,
        antenatal_visits: 4,
    }
}
