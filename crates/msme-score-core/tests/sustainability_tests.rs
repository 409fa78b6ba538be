use chrono::{TimeZone, Utc};
use msme_score_core::profile::BusinessProfile;
use msme_score_core::sustainability::{GreenGrade, SustainabilityInput};
use msme_score_core::{MsmeScoreError, ScoringEngine};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(documents: u32) -> SustainabilityInput {
    SustainabilityInput {
        documents_processed: documents,
        schemes_matched: 0,
        profile: BusinessProfile::default(),
        as_of: Utc.with_ymd_and_hms(2025, 7, 15, 0, 0, 0).unwrap(),
    }
}

// ===========================================================================
// Conversions
// ===========================================================================

#[test]
fn test_single_document_conversions() {
    let report = ScoringEngine::default()
        .assess_sustainability(&input(1))
        .unwrap()
        .result;

    assert_eq!(report.paper.pages_saved, dec!(25));
    // 25 pages x 5 g
    assert_eq!(report.paper.paper_weight_kg, dec!(0.125));
    assert_eq!(report.paper.water_saved_litres, dec!(250));
    // 50 km x 0.21 kg
    assert_eq!(report.carbon.travel_co2_saved_kg, dec!(10.5));
    assert_eq!(report.efficiency.hours_saved, dec!(7.5));
    assert_eq!(report.efficiency.cost_saved_inr, dec!(4_950));
    assert_eq!(report.efficiency.productivity_multiplier, dec!(16));
    assert!(report.carbon.net_co2_saved_kg < report.carbon.travel_co2_saved_kg);
}

#[test]
fn test_full_year_of_documents_grades_a_plus() {
    let report = ScoringEngine::default()
        .assess_sustainability(&input(12))
        .unwrap()
        .result;
    assert!(report.green_score >= dec!(90), "{}", report.green_score);
    assert_eq!(report.grade, GreenGrade::APlus);
    // already a full year: projection factor 1
    assert_eq!(report.yearly_projection.pages_saved, report.paper.pages_saved);
}

#[test]
fn test_zero_documents_is_safe() {
    let out = ScoringEngine::default().assess_sustainability(&input(0)).unwrap();
    assert_eq!(out.result.green_score, Decimal::ZERO);
    assert_eq!(out.result.efficiency.productivity_multiplier, Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_document_overflow_rejected() {
    let result = ScoringEngine::default().assess_sustainability(&input(2_000_000));
    assert!(matches!(result, Err(MsmeScoreError::InvalidInput { .. })));
}

#[test]
fn test_sdg_tags_from_profile() {
    let mut inp = input(1);
    inp.profile = BusinessProfile {
        sector: "Food processing".into(),
        owner_category: "Women entrepreneur".into(),
        ..Default::default()
    };
    let report = ScoringEngine::default().assess_sustainability(&inp).unwrap().result;
    assert_eq!(report.sdg_alignment.len(), 6);
    assert!(report.sdg_alignment.iter().any(|s| s.starts_with("SDG 2:")));
    assert!(report.sdg_alignment.iter().any(|s| s.starts_with("SDG 5:")));
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn prop_green_score_in_range(docs in 0u32..5_000, schemes in 0u32..50) {
        let mut inp = input(docs);
        inp.schemes_matched = schemes;
        let report = ScoringEngine::default().assess_sustainability(&inp).unwrap().result;
        prop_assert!(report.green_score >= Decimal::ZERO && report.green_score <= dec!(100));
        let b = &report.score_breakdown;
        for s in [b.paper, b.carbon, b.efficiency, b.scale_bonus] {
            prop_assert!(s >= Decimal::ZERO && s <= dec!(100));
        }
    }
}
