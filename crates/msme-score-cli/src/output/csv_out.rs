use std::io;

use serde_json::Value;

use msme_score_core::peer_benchmark::PeerBenchmarkReport;
use msme_score_core::profitability::ProfitabilityReport;
use msme_score_core::risk::ComplianceRiskReport;

use super::{label, plain, result_of, ReportView};

type Rows = Vec<Vec<String>>;

/// Write the report's main record list as CSV to stdout: obligation risks,
/// yearly projections or benchmark dimensions. Single-record reports are
/// written as field,value pairs.
pub fn print_csv(value: &Value) {
    let rows = rows_for(result_of(value));
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    for row in &rows {
        if let Err(e) = wtr.write_record(row) {
            eprintln!("CSV write error: {e}");
            return;
        }
    }
    let _ = wtr.flush();
}

pub fn rows_for(result: &Value) -> Rows {
    match ReportView::from_result(result) {
        ReportView::Evaluation(r) => obligation_rows(&r.risk),
        ReportView::Risk(r) => obligation_rows(&r),
        ReportView::Profitability(r) => projection_rows(&r),
        ReportView::Benchmark(r) => dimension_rows(&r),
        ReportView::Sustainability(_) | ReportView::Impact(_) | ReportView::Other(_) => {
            field_rows(result)
        }
    }
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn obligation_rows(report: &ComplianceRiskReport) -> Rows {
    let mut rows = vec![header(&[
        "obligation",
        "severity_class",
        "weighted_score",
        "risk_band",
        "days_remaining",
        "enforcement_probability",
        "expected_penalty_inr",
        "discounted_penalty_inr",
        "synthetic",
    ])];
    rows.extend(report.obligation_risks.iter().map(|r| {
        vec![
            r.obligation_name.clone(),
            label(&r.severity_class),
            r.weighted_score.to_string(),
            label(&r.risk_band),
            r.days_remaining.map(|d| d.to_string()).unwrap_or_default(),
            r.enforcement_probability.to_string(),
            r.expected_penalty_inr.to_string(),
            r.discounted_penalty_inr.to_string(),
            r.synthetic.to_string(),
        ]
    }));
    rows
}

fn projection_rows(report: &ProfitabilityReport) -> Rows {
    let mut rows = vec![header(&[
        "year",
        "gross_benefit_inr",
        "discounted_benefit_inr",
        "cumulative_npv_inr",
        "roi_multiplier",
    ])];
    rows.extend(report.projections.iter().map(|p| {
        vec![
            p.year.to_string(),
            p.gross_benefit_inr.to_string(),
            p.discounted_benefit_inr.to_string(),
            p.cumulative_npv_inr.to_string(),
            p.roi_multiplier.to_string(),
        ]
    }));
    rows
}

fn dimension_rows(report: &PeerBenchmarkReport) -> Rows {
    let mut rows = vec![header(&[
        "dimension",
        "user_score",
        "sector_average",
        "sector_median",
        "sector_top_10",
        "percentile_rank",
        "tier",
    ])];
    rows.extend(report.dimensions.iter().map(|d| {
        vec![
            label(&d.dimension),
            d.user_score.to_string(),
            d.sector_average.to_string(),
            d.sector_median.to_string(),
            d.sector_top_10.to_string(),
            d.percentile_rank.to_string(),
            label(&d.tier),
        ]
    }));
    rows
}

/// Scalar fields only; nested sections stay in the JSON output.
fn field_rows(result: &Value) -> Rows {
    let mut rows = vec![header(&["field", "value"])];
    if let Value::Object(map) = result {
        rows.extend(
            map.iter()
                .filter(|(_, v)| !v.is_object() && !v.is_array())
                .map(|(k, v)| vec![k.clone(), plain(v)]),
        );
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use msme_score_core::policy::{Obligation, Penalty, PolicyAnalysis};
    use msme_score_core::profile::BusinessProfile;
    use msme_score_core::profitability::ProfitabilityInput;
    use msme_score_core::risk::ComplianceRiskInput;
    use msme_score_core::ScoringEngine;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn analysis() -> PolicyAnalysis {
        PolicyAnalysis::new(
            vec![
                Obligation::new("GST return", "Fine", "2025-01-20", "MONTHLY"),
                Obligation::new("Fire NOC", "Closure", "", "ANNUALLY"),
            ],
            vec![Penalty::new("GST return late", "Rs. 10,000")],
        )
    }

    #[test]
    fn test_risk_rows_one_per_obligation() {
        let input = ComplianceRiskInput {
            analysis: analysis(),
            profile: BusinessProfile::default(),
            as_of: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            risk_history: Vec::new(),
        };
        let out = ScoringEngine::default().assess_compliance_risk(&input).unwrap();
        let rows = rows_for(&serde_json::to_value(&out.result).unwrap());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "obligation");
        assert!(rows.iter().all(|r| r.len() == 9));
        let gst = rows.iter().find(|r| r[0] == "GST return").unwrap();
        assert_eq!(gst[4], "10");
    }

    #[test]
    fn test_profitability_rows_one_per_year() {
        let input = ProfitabilityInput {
            analysis: analysis(),
            profile: BusinessProfile::default(),
            schemes: None,
            documents_processed: 1,
            as_of: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
        };
        let out = ScoringEngine::default().analyze_profitability(&input).unwrap();
        let rows = rows_for(&serde_json::to_value(&out.result).unwrap());
        // header plus the default five projection years
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1][0], "1");
    }

    #[test]
    fn test_ad_hoc_result_as_field_pairs() {
        let rows = rows_for(&json!({"quick_risk_score": "65", "risk_level": "HIGH", "warnings": []}));
        assert_eq!(
            rows,
            vec![
                vec!["field".to_string(), "value".to_string()],
                vec!["quick_risk_score".to_string(), "65".to_string()],
                vec!["risk_level".to_string(), "HIGH".to_string()],
            ]
        );
    }
}
