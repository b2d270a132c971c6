//! User-supplied survey fields and their declared form constraints

use infant_model::WealthIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("missing field '{0}'")]
    MissingField(String),
    #[error("field '{field}' is malformed: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("field '{field}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Boolean {
        default: bool,
    },
    Integer {
        min: u32,
        max: u32,
        default: u32,
        step: u32,
    },
    Ordinal {
        options: &'static [WealthIndex],
        default: WealthIndex,
    },
}

/// Declared shape of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub prompt: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

pub const HAS_BANK_ACCOUNT: FieldSpec = FieldSpec {
    name: "has_bank_account",
    prompt: "Does the mother have a bank account?",
    kind: FieldKind::Boolean { default: false },
};

pub const WEALTH: FieldSpec = FieldSpec {
    name: "wealth",
    prompt: "What is the household's wealth level?",
    kind: FieldKind::Ordinal {
        options: &WealthIndex::ALL,
        default: WealthIndex::Poorest,
    },
};

/// Inclusive bounds of an integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    name: &'static str,
    min: u32,
    max: u32,
}

impl Bounds {
    fn check(&self, value: i64) -> Result<u32, InputError> {
        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(InputError::OutOfRange {
                field: self.name.to_string(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        // bounded by `max` above
        Ok(value as u32)
    }
}

const HOUSEHOLD_SIZE_BOUNDS: Bounds = Bounds {
    name: "household_size",
    min: 1,
    max: 30,
};

const BIRTH_ORDER_BOUNDS: Bounds = Bounds {
    name: "birth_order",
    min: 1,
    max: 20,
};

const ANTENATAL_VISITS_BOUNDS: Bounds = Bounds {
    name: "antenatal_visits",
    min: 0,
    max: 50,
};

pub const HOUSEHOLD_SIZE: FieldSpec = FieldSpec {
    name: HOUSEHOLD_SIZE_BOUNDS.name,
    prompt: "How many people live in the household?",
    kind: FieldKind::Integer {
        min: HOUSEHOLD_SIZE_BOUNDS.min,
        max: HOUSEHOLD_SIZE_BOUNDS.max,
        default: 5,
        step: 1,
    },
};

pub const BIRTH_ORDER: FieldSpec = FieldSpec {
    name: BIRTH_ORDER_BOUNDS.name,
    prompt: "What is the birth order of this child?",
    kind: FieldKind::Integer {
        min: BIRTH_ORDER_BOUNDS.min,
        max: BIRTH_ORDER_BOUNDS.max,
        default: 1,
        step: 1,
    },
};

pub const ANTENATAL_VISITS: FieldSpec = FieldSpec {
    name: ANTENATAL_VISITS_BOUNDS.name,
    prompt: "How many antenatal visits did the mother have?",
    kind: FieldKind::Integer {
        min: ANTENATAL_VISITS_BOUNDS.min,
        max: ANTENATAL_VISITS_BOUNDS.max,
        default: 4,
        step: 1,
    },
};

/// One survey submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub has_bank_account: bool,
    pub wealth: WealthIndex,
    pub household_size: u32,
    pub birth_order: u32,
    pub antenatal_visits: u32,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            has_bank_account: false,
            wealth: WealthIndex::Poorest,
            household_size: 5,
            birth_order: 1,
            antenatal_visits: 4,
        }
    }
}

impl InputRecord {
    /// Form fields in display order
    pub const FIELDS: [FieldSpec; 5] = [
        HAS_BANK_ACCOUNT,
        WEALTH,
        HOUSEHOLD_SIZE,
        BIRTH_ORDER,
        ANTENATAL_VISITS,
    ];

    /// Check the numeric fields against their declared bounds.
    pub fn validate(&self) -> Result<(), InputError> {
        HOUSEHOLD_SIZE_BOUNDS.check(i64::from(self.household_size))?;
        BIRTH_ORDER_BOUNDS.check(i64::from(self.birth_order))?;
        ANTENATAL_VISITS_BOUNDS.check(i64::from(self.antenatal_visits))?;
        Ok(())
    }

    /// Build a record from an untyped field map such as a form submission.
    ///
    /// Every declared field must be present. Keys that are not form fields
    /// are ignored.
    pub fn from_json(value: &JsonValue) -> Result<InputRecord, InputError> {
        let obj = value.as_object().ok_or_else(|| InputError::InvalidField {
            field: "<record>".to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        for key in obj.keys() {
            if !Self::FIELDS.iter().any(|f| f.name == key) {
                log::debug!("ignoring unknown input field '{key}'");
            }
        }

        let field = |spec: &FieldSpec| {
            obj.get(spec.name)
                .ok_or_else(|| InputError::MissingField(spec.name.to_string()))
        };
        let malformed = |spec: &FieldSpec, reason: &str| InputError::InvalidField {
            field: spec.name.to_string(),
            reason: reason.to_string(),
        };
        let integer = |spec: &FieldSpec, bounds: Bounds| -> Result<u32, InputError> {
            let v = field(spec)?
                .as_i64()
                .ok_or_else(|| malformed(spec, "expected an integer"))?;
            bounds.check(v)
        };

        let has_bank_account = field(&HAS_BANK_ACCOUNT)?
            .as_bool()
            .ok_or_else(|| malformed(&HAS_BANK_ACCOUNT, "expected true or false"))?;
        let wealth_label = field(&WEALTH)?
            .as_str()
            .ok_or_else(|| malformed(&WEALTH, "expected a wealth label"))?;
        let wealth = WealthIndex::parse(wealth_label).ok_or_else(|| InputError::InvalidField {
            field: WEALTH.name.to_string(),
            reason: format!("unknown wealth level '{wealth_label}'"),
        })?;

        Ok(InputRecord {
            has_bank_account,
            wealth,
            household_size: integer(&HOUSEHOLD_SIZE, HOUSEHOLD_SIZE_BOUNDS)?,
            birth_order: integer(&BIRTH_ORDER, BIRTH_ORDER_BOUNDS)?,
            antenatal_visits: integer(&ANTENATAL_VISITS, ANTENATAL_VISITS_BOUNDS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_field_specs() {
        let record = InputRecord::default();
        for spec in InputRecord::FIELDS {
            match (spec.name, spec.kind) {
                ("has_bank_account", FieldKind::Boolean { default }) => {
                    assert_eq!(record.has_bank_account, default)
                }
                ("wealth", FieldKind::Ordinal { default, options }) => {
                    assert_eq!(record.wealth, default);
                    assert_eq!(options.len(), 5);
                }
                ("household_size", FieldKind::Integer { default, .. }) => {
                    assert_eq!(record.household_size, default)
                }
                ("birth_order", FieldKind::Integer { default, .. }) => {
                    assert_eq!(record.birth_order, default)
                }
                ("antenatal_visits", FieldKind::Integer { default, .. }) => {
                    assert_eq!(record.antenatal_visits, default)
                }
                other => panic!("unexpected field spec {other:?}"),
            }
        }
        assert!(record.validate().is_ok());
    }

    #[test]
    fn bounds_agree_with_integer_field_specs() {
        for (spec, bounds) in [
            (HOUSEHOLD_SIZE, HOUSEHOLD_SIZE_BOUNDS),
            (BIRTH_ORDER, BIRTH_ORDER_BOUNDS),
            (ANTENATAL_VISITS, ANTENATAL_VISITS_BOUNDS),
        ] {
            let FieldKind::Integer { min, max, .. } = spec.kind else {
                panic!("{} is not an integer field", spec.name);
            };
            assert_eq!((spec.name, min, max), (bounds.name, bounds.min, bounds.max));
            assert_eq!(bounds.check(i64::from(max)), Ok(max));
            assert!(matches!(
                bounds.check(i64::from(max) + 1),
                Err(InputError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let record = InputRecord {
            household_size: 0,
            ..InputRecord::default()
        };
        assert_eq!(
            record.validate(),
            Err(InputError::OutOfRange {
                field: "household_size".into(),
                value: 0,
                min: 1,
                max: 30,
            })
        );

        let record = InputRecord {
            antenatal_visits: 51,
            ..InputRecord::default()
        };
        assert!(matches!(record.validate(), Err(InputError::OutOfRange { .. })));
    }

    #[test]
    fn from_json_reads_form_submission() {
        let record = InputRecord::from_json(&json!({
            "has_bank_account": true,
            "wealth": "richer",
            "household_size": 7,
            "birth_order": 3,
            "antenatal_visits": 0,
            "submit": "Predict Risk"
        }))
        .unwrap();
        assert_eq!(
            record,
            InputRecord {
                has_bank_account: true,
                wealth: WealthIndex::Richer,
                household_size: 7,
                birth_order: 3,
                antenatal_visits: 0,
            }
        );
    }

    #[test]
    fn from_json_reports_missing_and_malformed_fields() {
        let err = InputRecord::from_json(&json!({
            "has_bank_account": false,
            "wealth": "Middle",
            "household_size": 4,
            "birth_order": 2
        }))
        .unwrap_err();
        assert_eq!(err, InputError::MissingField("antenatal_visits".into()));

        let err = InputRecord::from_json(&json!({
            "has_bank_account": "yes",
            "wealth": "Middle",
            "household_size": 4,
            "birth_order": 2,
            "antenatal_visits": 1
        }))
        .unwrap_err();
        assert!(matches!(err, InputError::InvalidField { ref field, .. } if field == "has_bank_account"));

        let err = InputRecord::from_json(&json!({
            "has_bank_account": false,
            "wealth": "Middle",
            "household_size": 2.5,
            "birth_order": 2,
            "antenatal_visits": 1
        }))
        .unwrap_err();
        assert!(matches!(err, InputError::InvalidField { ref field, .. } if field == "household_size"));

        let err = InputRecord::from_json(&json!({
            "has_bank_account": false,
            "wealth": "Middle",
            "household_size": 4,
            "birth_order": -1,
            "antenatal_visits": 1
        }))
        .unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { value: -1, .. }));

        assert!(InputRecord::from_json(&json!([1, 2])).is_err());
    }
}
