#![cfg(feature = "peer_benchmark")]

use chrono::{TimeZone, Utc};
use msme_score_core::peer_benchmark::{
    approximate_percentile, BenchmarkDimension, BenchmarkTier, PeerBenchmarkInput, UserScores,
};
use msme_score_core::profile::BusinessProfile;
use msme_score_core::ScoringEngine;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(scores: UserScores) -> PeerBenchmarkInput {
    PeerBenchmarkInput {
        scores,
        profile: BusinessProfile {
            business_name: Some("Rajan Manufacturing".into()),
            sector: "manufacturing".into(),
            state: "Maharashtra".into(),
            size: "small".into(),
            annual_turnover: Some(dec!(5_000_000)),
            ..Default::default()
        },
        as_of: Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn test_benchmark_report_shape() {
    let scores = UserScores {
        compliance: dec!(65),
        risk: dec!(45),
        scheme_utilisation: dec!(40),
        penalty_exposure: dec!(30),
        sustainability: dec!(55),
    };
    let out = ScoringEngine::default().benchmark_peers(&input(scores)).unwrap();
    let report = out.result;

    assert_eq!(report.business_name, "Rajan Manufacturing");
    assert_eq!(report.dimensions.len(), 5);
    let order: Vec<BenchmarkDimension> = report.dimensions.iter().map(|d| d.dimension).collect();
    assert_eq!(order, BenchmarkDimension::ALL.to_vec());

    // lower risk and penalty exposure than the peer mean rank above median
    assert!(report.dimensions[1].percentile_rank > dec!(50));
    assert!(report.dimensions[3].percentile_rank > dec!(50));
    assert!(report.dimensions[1].gap_to_average > Decimal::ZERO);

    assert_eq!(report.peer_comparison.peer_group, "Small Manufacturing - Maharashtra");
    assert!(report.recommendations.iter().any(|r| r.contains("factory")));
    assert_eq!(report.overall_tier, BenchmarkTier::from_percentile(report.overall_percentile));
}

#[test]
fn test_json_scores_default_to_fifty() {
    let json = r#"{"scores": {"compliance": 90}, "profile": {"sector": "services"}, "as_of": "2025-09-01T00:00:00Z"}"#;
    let inp: PeerBenchmarkInput = serde_json::from_str(json).unwrap();
    assert_eq!(inp.scores.compliance, dec!(90));
    assert_eq!(inp.scores.risk, dec!(50));
}

proptest! {
    #[test]
    fn prop_percentile_bounded_and_monotone(a in 0u32..=100, b in 0u32..=100, mean in 10u32..90, sd in 1u32..30) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let m = Decimal::from(mean);
        let s = Decimal::from(sd);
        let p_lo = approximate_percentile(Decimal::from(lo), m, s);
        let p_hi = approximate_percentile(Decimal::from(hi), m, s);
        prop_assert!(p_lo >= Decimal::ONE && p_hi <= dec!(99));
        prop_assert!(p_lo <= p_hi);
    }
}
