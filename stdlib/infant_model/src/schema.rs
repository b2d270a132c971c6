//! Training schema of the infant mortality classifier.
//!
//! The model was fitted on five DHS child-recode columns. [`ModelRow`] is the
//! single-row record handed to a [`RiskModel`](crate::RiskModel); it can only
//! be produced through [`ModelRowBuilder`], which refuses to build while any
//! column is still unset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

use crate::backend::ModelError;

pub const BANK_ACCOUNT: &str = "v170 - has an account in a bank or other financial institution";
pub const HOUSEHOLD_MEMBERS: &str = "v136 - number of household members (listed)";
pub const BIRTH_ORDER: &str = "bord - birth order number";
pub const ANTENATAL_VISITS: &str = "m14 - number of antenatal visits during pregnancy";
pub const WEALTH_INDEX: &str = "v190 - wealth index combined";

/// Column names in the order the model was trained on.
pub const COLUMNS: [&str; 5] = [
    BANK_ACCOUNT,
    HOUSEHOLD_MEMBERS,
    BIRTH_ORDER,
    ANTENATAL_VISITS,
    WEALTH_INDEX,
];

/// Five-level household wealth index, poorest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WealthIndex {
    Poorest,
    Poorer,
    Middle,
    Richer,
    Richest,
}

impl WealthIndex {
    pub const ALL: [WealthIndex; 5] = [
        WealthIndex::Poorest,
        WealthIndex::Poorer,
        WealthIndex::Middle,
        WealthIndex::Richer,
        WealthIndex::Richest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WealthIndex::Poorest => "Poorest",
            WealthIndex::Poorer => "Poorer",
            WealthIndex::Middle => "Middle",
            WealthIndex::Richer => "Richer",
            WealthIndex::Richest => "Richest",
        }
    }

    /// Mirror image on the five-level scale: Poorest and Richest swap,
    /// Poorer and Richer swap, Middle stays.
    ///
    /// The classifier's training data carried the wealth labels in this
    /// reversed order, so user selections are mirrored before inference.
    /// Applying it twice yields the original level.
    pub fn mirrored(self) -> WealthIndex {
        match self {
            WealthIndex::Poorest => WealthIndex::Richest,
            WealthIndex::Poorer => WealthIndex::Richer,
            WealthIndex::Middle => WealthIndex::Middle,
            WealthIndex::Richer => WealthIndex::Poorer,
            WealthIndex::Richest => WealthIndex::Poorest,
        }
    }

    pub fn parse(label: &str) -> Option<WealthIndex> {
        WealthIndex::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for WealthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage kind of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Ordinal,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Integer => f.write_str("int64"),
            ColumnKind::Ordinal => f.write_str("ordinal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue {
    Integer(i64),
    Ordinal(WealthIndex),
}

impl ColumnValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValue::Integer(_) => ColumnKind::Integer,
            ColumnValue::Ordinal(_) => ColumnKind::Ordinal,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Integer(v) => write!(f, "{v}"),
            ColumnValue::Ordinal(w) => write!(f, "{w}"),
        }
    }
}

/// One encoded row, exactly one value per training column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    bank_account: u8,
    household_members: u32,
    birth_order: u32,
    antenatal_visits: u32,
    wealth_index: WealthIndex,
}

impl ModelRow {
    pub fn builder() -> ModelRowBuilder {
        ModelRowBuilder::default()
    }

    /// 1 when the mother holds a bank account, else 0
    pub fn bank_account(&self) -> u8 {
        self.bank_account
    }

    pub fn household_members(&self) -> u32 {
        self.household_members
    }

    pub fn birth_order(&self) -> u32 {
        self.birth_order
    }

    pub fn antenatal_visits(&self) -> u32 {
        self.antenatal_visits
    }

    /// Wealth label as the model sees it (already mirrored by the encoder).
    pub fn wealth_index(&self) -> WealthIndex {
        self.wealth_index
    }

    /// Columns paired with their values, in training order.
    pub fn columns(&self) -> [(&'static str, ColumnValue); 5] {
        [
            (BANK_ACCOUNT, ColumnValue::Integer(i64::from(self.bank_account))),
            (
                HOUSEHOLD_MEMBERS,
                ColumnValue::Integer(i64::from(self.household_members)),
            ),
            (BIRTH_ORDER, ColumnValue::Integer(i64::from(self.birth_order))),
            (
                ANTENATAL_VISITS,
                ColumnValue::Integer(i64::from(self.antenatal_visits)),
            ),
            (WEALTH_INDEX, ColumnValue::Ordinal(self.wealth_index)),
        ]
    }

    pub fn get(&self, column: &str) -> Option<ColumnValue> {
        self.columns()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// JSON object keyed by column name
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (name, value) in self.columns() {
            let v = match value {
                ColumnValue::Integer(i) => JsonValue::from(i),
                ColumnValue::Ordinal(w) => JsonValue::from(w.as_str()),
            };
            map.insert(name.to_string(), v);
        }
        JsonValue::Object(map)
    }
}

/// Builder for [`ModelRow`]. Every setter must be called before
/// [`build`](ModelRowBuilder::build) succeeds.
#[derive(Debug, Clone, Default)]
pub struct ModelRowBuilder {
    bank_account: Option<u8>,
    household_members: Option<u32>,
    birth_order: Option<u32>,
    antenatal_visits: Option<u32>,
    wealth_index: Option<WealthIndex>,
}

impl ModelRowBuilder {
    pub fn bank_account(mut self, has_account: bool) -> Self {
        self.bank_account = Some(u8::from(has_account));
        self
    }

    pub fn household_members(mut self, members: u32) -> Self {
        self.household_members = Some(members);
        self
    }

    pub fn birth_order(mut self, order: u32) -> Self {
        self.birth_order = Some(order);
        self
    }

    pub fn antenatal_visits(mut self, visits: u32) -> Self {
        self.antenatal_visits = Some(visits);
        self
    }

    pub fn wealth_index(mut self, label: WealthIndex) -> Self {
        self.wealth_index = Some(label);
        self
    }

    pub fn build(self) -> Result<ModelRow, ModelError> {
        let missing = |column: &str| ModelError::MissingColumn(column.to_string());
        Ok(ModelRow {
            bank_account: self.bank_account.ok_or_else(|| missing(BANK_ACCOUNT))?,
            household_members: self
                .household_members
                .ok_or_else(|| missing(HOUSEHOLD_MEMBERS))?,
            birth_order: self.birth_order.ok_or_else(|| missing(BIRTH_ORDER))?,
            antenatal_visits: self
                .antenatal_visits
                .ok_or_else(|| missing(ANTENATAL_VISITS))?,
            wealth_index: self.wealth_index.ok_or_else(|| missing(WEALTH_INDEX))?,
        })
    }
}
