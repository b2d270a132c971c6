use infant_risk::{
    encode, recommend, InputRecord, RecommendationProfile, RiskTier, TierThresholds, WealthIndex,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn any_wealth() -> impl Strategy<Value = WealthIndex> {
    prop::sample::select(WealthIndex::ALL.to_vec())
}

fn any_tier() -> impl Strategy<Value = RiskTier> {
    prop::sample::select(vec![RiskTier::Low, RiskTier::Medium, RiskTier::High])
}

fn any_profile() -> impl Strategy<Value = RecommendationProfile> {
    prop::sample::select(vec![
        RecommendationProfile::Minimal,
        RecommendationProfile::Tiered,
        RecommendationProfile::Extended,
    ])
}

prop_compose! {
    fn any_record()(
        has_bank_account in any::<bool>(),
        wealth in any_wealth(),
        household_size in 1u32..=30,
        birth_order in 1u32..=20,
        antenatal_visits in 0u32..=50,
    ) -> InputRecord {
        InputRecord { has_bank_account, wealth, household_size, birth_order, antenatal_visits }
    }
}

prop_compose! {
    fn any_thresholds()(a in 0.0f64..=1.0, b in 0.0f64..=1.0) -> TierThresholds {
        TierThresholds { low: a.min(b), high: a.max(b) }
    }
}

proptest! {
    #[test]
    fn wealth_mirror_is_an_involution(w in any_wealth()) {
        prop_assert_eq!(w.mirrored().mirrored(), w);
    }

    #[test]
    fn encoding_mirrors_wealth(r in any_record()) {
        let row = encode(&r).unwrap();
        prop_assert_eq!(row.wealth_index(), r.wealth.mirrored());
        prop_assert_eq!(row.wealth_index().mirrored(), r.wealth);
        prop_assert_eq!(row.bank_account(), u8::from(r.has_bank_account));
    }

    #[test]
    fn tiers_partition_the_unit_interval(t in any_thresholds(), p in 0.0f64..=1.0) {
        let expected = if p < t.low {
            RiskTier::Low
        } else if p >= t.high {
            RiskTier::High
        } else {
            RiskTier::Medium
        };
        prop_assert_eq!(t.tier(p), expected);
    }

    #[test]
    fn tiers_are_monotone(t in any_thresholds(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let rank = |tier: RiskTier| match tier {
            RiskTier::Low => 0,
            RiskTier::Medium => 1,
            RiskTier::High => 2,
        };
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert!(rank(t.tier(lo)) <= rank(t.tier(hi)));
    }

    #[test]
    fn recommendations_have_no_duplicates(r in any_record(), t in any_tier(), p in any_profile()) {
        let set = recommend(&r, t, p);
        let distinct: HashSet<&str> = set.iter().collect();
        prop_assert_eq!(distinct.len(), set.len());
    }

    #[test]
    fn minimal_recommendations_ignore_the_tier(r in any_record(), a in any_tier(), b in any_tier()) {
        prop_assert_eq!(
            recommend(&r, a, RecommendationProfile::Minimal),
            recommend(&r, b, RecommendationProfile::Minimal)
        );
    }
}
