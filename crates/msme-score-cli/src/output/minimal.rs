use serde_json::Value;

use super::{break_even, inr, label, plain, result_of, score, ReportView};

/// One line: the headline score and its band or grade.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(result_of(value)));
}

pub fn headline(result: &Value) -> String {
    match ReportView::from_result(result) {
        ReportView::Evaluation(r) => match &r.impact {
            Some(impact) => format!(
                "{} {} (risk {} {})",
                score(impact.impact_score),
                label(&impact.impact_grade),
                score(r.risk.overall_score),
                label(&r.risk.overall_band)
            ),
            None => format!("{} {}", score(r.risk.overall_score), label(&r.risk.overall_band)),
        },
        ReportView::Risk(r) => format!("{} {}", score(r.overall_score), label(&r.overall_band)),
        ReportView::Profitability(r) => format!(
            "{} break-even {}",
            inr(r.total_roi_inr),
            break_even(r.break_even)
        ),
        ReportView::Sustainability(r) => format!("{} {}", score(r.green_score), label(&r.grade)),
        ReportView::Impact(r) => format!("{} {}", score(r.impact_score), label(&r.impact_grade)),
        ReportView::Benchmark(r) => {
            format!("{} {}", score(r.overall_percentile), label(&r.overall_tier))
        }
        ReportView::Other(v) => match (v.get("quick_risk_score"), v.get("risk_level")) {
            (Some(s), Some(level)) => format!("{} {}", plain(s), plain(level)),
            _ => plain(&v),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use msme_score_core::policy::{Obligation, Penalty, PolicyAnalysis};
    use msme_score_core::risk::ComplianceRiskInput;
    use msme_score_core::ScoringEngine;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_risk_headline_is_score_and_band() {
        let input = ComplianceRiskInput {
            analysis: PolicyAnalysis::new(
                vec![Obligation::new("Pollution consent", "CRIMINAL", "2025-01-12", "DAILY")],
                vec![Penalty::new("Pollution consent breach", "Rs. 10 lakh")],
            ),
            profile: Default::default(),
            as_of: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            risk_history: Vec::new(),
        };
        let out = ScoringEngine::default().assess_compliance_risk(&input).unwrap();
        let expected = format!(
            "{} {}",
            out.result.overall_score.round_dp(1),
            label(&out.result.overall_band)
        );
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(headline(result_of(&value)), expected);
        assert!(expected.ends_with("CRITICAL"));
    }

    #[test]
    fn test_quick_risk_headline() {
        let v = json!({"quick_risk_score": "92", "risk_level": "HIGH", "penalties_considered": 2});
        assert_eq!(headline(&v), "92 HIGH");
    }
}
