//! Static recommendation rules.
//!
//! A recommendation list starts with the boilerplate for the risk tier (unless
//! the profile is [`RecommendationProfile::Minimal`]) and then appends the
//! field-triggered messages in a fixed order. Messages are deduplicated
//! keeping the first occurrence.

use infant_model::WealthIndex;
use serde::{Deserialize, Serialize};

use crate::record::InputRecord;
use crate::risk::RiskTier;

pub const ROUTINE_CARE: &str = "Continue routine antenatal and postnatal check-ups.";
pub const IMMUNISATION: &str = "Keep the child's immunisation schedule up to date.";
pub const EXTRA_CHECKUPS: &str = "Schedule additional check-ups with a healthcare provider.";
pub const CONSULT_NOW: &str = "Consult a healthcare provider as soon as possible.";
pub const FACILITY_DELIVERY: &str =
    "Plan to deliver at a health facility with a skilled birth attendant.";
pub const FIRST_YEAR_MONITORING: &str =
    "Monitor the infant closely during the first year of life.";

pub const BIRTH_SPACING: &str =
    "High birth order: discuss birth spacing and family planning with a health worker.";
pub const ANTENATAL_CARE: &str = "Attend at least four antenatal visits during pregnancy.";
pub const HOUSEHOLD_SUPPORT: &str =
    "Small household: arrange support from family or community health workers after delivery.";
pub const BANK_ACCOUNT: &str =
    "No bank account: consider opening a bank or mobile-money account to save for health costs.";
pub const COST_BARRIER: &str =
    "Low household wealth: ask about free or subsidised maternal and child health services.";

/// Which rule families contribute to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationProfile {
    /// Field-triggered rules only
    Minimal,
    /// Tier boilerplate followed by the field rules
    Tiered,
    /// Tiered plus the wealth-based cost-barrier addendum
    #[default]
    Extended,
}

/// Ordered list of distinct recommendation strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecommendationSet(Vec<String>);

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless an equal message is already present.
    pub fn push(&mut self, message: &str) -> bool {
        if self.contains(message) {
            return false;
        }
        self.0.push(message.to_string());
        true
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> FromIterator<&'a str> for RecommendationSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = RecommendationSet::new();
        for m in iter {
            set.push(m);
        }
        set
    }
}

impl From<Vec<String>> for RecommendationSet {
    fn from(messages: Vec<String>) -> Self {
        messages.iter().map(String::as_str).collect()
    }
}

impl From<RecommendationSet> for Vec<String> {
    fn from(set: RecommendationSet) -> Self {
        set.0
    }
}

fn tier_boilerplate(tier: RiskTier) -> &'static [&'static str] {
    match tier {
        RiskTier::Low => &[ROUTINE_CARE, IMMUNISATION],
        RiskTier::Medium => &[EXTRA_CHECKUPS, ANTENATAL_CARE, IMMUNISATION],
        RiskTier::High => &[
            CONSULT_NOW,
            FACILITY_DELIVERY,
            ANTENATAL_CARE,
            FIRST_YEAR_MONITORING,
        ],
    }
}

/// Derive the recommendation list for a record and its risk tier.
///
/// `record.wealth` is the user's own selection, not the mirrored label sent
/// to the model.
pub fn recommend(
    record: &InputRecord,
    tier: RiskTier,
    profile: RecommendationProfile,
) -> RecommendationSet {
    let mut messages: Vec<&str> = Vec::new();

    if profile != RecommendationProfile::Minimal {
        messages.extend_from_slice(tier_boilerplate(tier));
    }

    if record.birth_order > 4 {
        messages.push(BIRTH_SPACING);
    }
    if record.antenatal_visits < 3 {
        messages.push(ANTENATAL_CARE);
    }
    if record.household_size < 3 {
        messages.push(HOUSEHOLD_SUPPORT);
    }
    if !record.has_bank_account {
        messages.push(BANK_ACCOUNT);
    }
    if profile == RecommendationProfile::Extended
        && matches!(record.wealth, WealthIndex::Poorest | WealthIndex::Poorer)
    {
        messages.push(COST_BARRIER);
    }

    let set: RecommendationSet = messages.into_iter().collect();
    log::debug!(
        "{} recommendation(s) for {tier} with {profile:?} profile",
        set.len()
    );
    set
}
