use chrono::{Duration, TimeZone, Utc};
use msme_score_core::impact::benchmark::sector_percentile;
use msme_score_core::impact::{
    GrcReadiness, ImpactGrade, ImpactInput, ProfitabilitySignal, RiskSignal, SustainabilitySignal,
};
use msme_score_core::policy::{Obligation, Penalty, PolicyAnalysis};
use msme_score_core::profile::BusinessProfile;
use msme_score_core::{EvaluationRequest, MsmeScoreError, ScoringEngine};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn zero_input() -> ImpactInput {
    ImpactInput {
        risk: RiskSignal::default(),
        profitability: ProfitabilitySignal::default(),
        sustainability: SustainabilitySignal::default(),
        profile: BusinessProfile::default(),
        documents_processed: 1,
        as_of: Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap(),
    }
}

fn request(state: &str) -> EvaluationRequest {
    let as_of = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let due = (as_of + Duration::days(10)).format("%Y-%m-%d").to_string();
    EvaluationRequest {
        analysis: PolicyAnalysis::new(
            vec![
                Obligation::new("Consent to operate renewal", "Suspension of operations", &due, "ANNUALLY"),
                Obligation::new("Monthly GST return", "Late fee and penalty", "within 30 days", "MONTHLY"),
            ],
            vec![
                Penalty::new("Operating without consent", "Rs 5 lakh"),
                Penalty::new("Late GST return filing", "Rs 10,000"),
            ],
        ),
        profile: BusinessProfile {
            business_name: Some("Sharma Auto Components".into()),
            sector: "Auto parts manufacturing".into(),
            state: state.into(),
            size: "small".into(),
            ..Default::default()
        },
        schemes: None,
        documents_processed: 2,
        as_of,
        risk_history: Vec::new(),
    }
}

// ===========================================================================
// Degenerate input
// ===========================================================================

#[test]
fn test_all_zero_sub_reports() {
    let out = ScoringEngine::default().calculate_impact(&zero_input()).unwrap();
    let report = out.result;
    assert_eq!(report.impact_score, Decimal::ZERO);
    assert_eq!(report.impact_grade, ImpactGrade::Minimal);
    assert_eq!(report.weighted_score, Decimal::ZERO);
    assert_eq!(report.grc_alignment.overall_grc_readiness, GrcReadiness::Foundation);
    assert_eq!(report.key_metrics.impact_score, Decimal::ZERO);
}

#[test]
fn test_zero_documents_guarded() {
    let mut inp = zero_input();
    inp.documents_processed = 0;
    inp.sustainability.hours_saved = dec!(7.5);
    inp.sustainability.cost_saved_inr = dec!(4_950);
    let report = ScoringEngine::default().calculate_impact(&inp).unwrap().result;
    assert!(report.breakdown.time_saved > Decimal::ZERO);
    assert_eq!(report.projection.yearly_cost_saved_inr, dec!(59_400));
}

#[test]
fn test_neutral_impact_sits_at_median() {
    assert_eq!(sector_percentile(dec!(50)), dec!(50));
}

// ===========================================================================
// Full pipeline
// ===========================================================================

#[test]
fn test_composite_recomputes_from_breakdown() {
    let out = ScoringEngine::default().evaluate(&request("Tamil Nadu")).unwrap();
    let impact = out.result.impact.unwrap();
    let b = &impact.breakdown;

    let recomputed = dec!(0.30) * b.compliance_risk_reduction
        + dec!(0.25) * b.profitability_gain
        + dec!(0.20) * b.sustainability_improvement
        + dec!(0.15) * b.time_saved
        + dec!(0.10) * b.cost_saved;
    assert!((recomputed - impact.weighted_score).abs() < dec!(0.000001));

    // Tamil Nadu strictness 1.15 sits exactly at the composite cap
    assert_eq!(impact.regional_multiplier, dec!(1.15));
    let expected = (recomputed * dec!(1.15)).min(dec!(100));
    assert!((expected - impact.impact_score).abs() < dec!(0.000001));
    assert_eq!(impact.impact_grade, ImpactGrade::from_score(impact.impact_score));
}

#[test]
fn test_pipeline_feeds_sub_reports_into_composite() {
    let out = ScoringEngine::default().evaluate(&request("Punjab")).unwrap();
    let report = out.result;
    let profitability = report.profitability.unwrap();
    let sustainability = report.sustainability.unwrap();
    let impact = report.impact.unwrap();

    // scheme applications count as processed items for sustainability
    assert_eq!(
        sustainability.items_processed,
        2 + profitability.scheme_benefits.len() as u32
    );
    assert_eq!(impact.key_metrics.roi_multiplier, profitability.roi_multiplier);
    assert_eq!(
        impact.key_metrics.penalties_prevented_inr,
        profitability.total_penalty_avoidance_inr
    );
    assert!(impact.narrative.starts_with("Impact Analysis for Sharma Auto Components"));
    assert!(impact.benchmark.percentile >= Decimal::ONE && impact.benchmark.percentile <= dec!(99));
}

#[test]
fn test_evaluation_is_deterministic() {
    let engine = ScoringEngine::default();
    let a = engine.evaluate(&request("Karnataka")).unwrap();
    let b = engine.evaluate(&request("Karnataka")).unwrap();
    assert_eq!(a.result, b.result);
}

#[test]
fn test_evaluation_request_from_json() {
    let json = r#"{
        "analysis": {
            "obligations": [{"obligation": "Fire safety NOC", "severity_if_ignored": "Closure of premises", "frequency": "ANNUALLY"}],
            "penalties": []
        },
        "profile": {"business_type": "Retail shop", "location": "Delhi", "msme_category": "micro"},
        "as_of": "2025-08-01T00:00:00Z"
    }"#;
    let req: EvaluationRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.documents_processed, 1);
    let out = ScoringEngine::default().evaluate(&req).unwrap();
    assert!(out.result.impact.is_some());
    assert_eq!(out.result.risk.region, "delhi");
}

#[test]
fn test_oversized_signal_from_json_is_an_error() {
    let json = r#"{"profitability": {"total_roi_inr": "10000000000000000000000000000"}, "as_of": "2025-08-01T00:00:00Z"}"#;
    let inp: ImpactInput = serde_json::from_str(json).unwrap();
    let result = ScoringEngine::default().calculate_impact(&inp);
    assert!(matches!(result, Err(MsmeScoreError::InvalidInput { .. })));
}

#[test]
fn test_pipeline_isolates_out_of_range_penalty() {
    let mut req = request("Gujarat");
    req.analysis = PolicyAnalysis::new(
        vec![
            Obligation::new("Effluent discharge consent", "Criminal prosecution", "", "ANNUALLY"),
            Obligation::new("Effluent treatment audit", "Criminal prosecution", "", "ANNUALLY"),
        ],
        vec![Penalty::new("Effluent violation", "5000000000000000000000 crore")],
    );
    let out = ScoringEngine::default().evaluate(&req).unwrap();
    assert!(out.result.profitability.is_none());
    assert!(out.result.sustainability.is_some());
    assert!(out.result.impact.is_some());
    assert!(out.warnings.iter().any(|w| w.starts_with("Profitability model failed")));
    // two criminal matches at 4.5e28 each pin the total at the Decimal bound
    assert_eq!(out.result.risk.total_expected_penalty_inr, Decimal::MAX);
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn prop_impact_bounded(
        risk in 0u32..=100,
        roi in 0u32..10_000,
        green in 0u32..=100,
        co2 in 0u32..100_000,
        hours in 0u32..10_000,
        docs in 0u32..500,
    ) {
        let mut inp = zero_input();
        inp.risk.overall_score = Decimal::from(risk);
        inp.profitability.roi_multiplier = Decimal::from(roi);
        inp.sustainability.green_score = Decimal::from(green);
        inp.sustainability.co2_saved_kg = Decimal::from(co2);
        inp.sustainability.hours_saved = Decimal::from(hours);
        inp.sustainability.productivity_multiplier = dec!(16);
        inp.documents_processed = docs;
        inp.profile.state = "Delhi".into();
        let report = ScoringEngine::default().calculate_impact(&inp).unwrap().result;
        let b = &report.breakdown;
        for s in [b.compliance_risk_reduction, b.profitability_gain, b.sustainability_improvement, b.time_saved, b.cost_saved, report.impact_score] {
            prop_assert!(s >= Decimal::ZERO && s <= dec!(100));
        }
        prop_assert!(report.benchmark.percentile >= Decimal::ONE);
        prop_assert!(report.benchmark.percentile <= dec!(99));
    }
}
