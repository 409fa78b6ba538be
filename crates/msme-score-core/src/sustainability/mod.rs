//! Environmental and efficiency effect of digital compliance handling.

pub mod footprint;
pub mod green_score;

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::currency::format_inr;
use crate::error::MsmeScoreError;
use crate::profile::BusinessProfile;
use crate::types::{with_metadata, ComputationOutput, Money, Score};
use crate::MsmeScoreResult;

pub use footprint::{CarbonSavings, EfficiencyGains, PaperSavings};
pub use green_score::{GreenGrade, GreenScoreBreakdown, BENCHMARK_YEARLY_DOCUMENTS};

/// Upper bound on documents per request.
pub const MAX_DOCUMENTS: u32 = 1_000_000;

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainabilityInput {
    #[serde(default = "default_documents")]
    pub documents_processed: u32,
    /// Scheme applications handled alongside the documents
    #[serde(default)]
    pub schemes_matched: u32,
    /// Used for SDG tagging only
    #[serde(default)]
    pub profile: BusinessProfile,
    #[serde(default = "Utc::now")]
    pub as_of: DateTime<Utc>,
}

fn default_documents() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlySustainability {
    pub pages_saved: Decimal,
    pub co2_saved_kg: Decimal,
    pub cost_saved_inr: Money,
    pub hours_saved: Decimal,
    pub trees_equivalent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityReport {
    pub green_score: Score,
    pub grade: GreenGrade,
    pub score_breakdown: GreenScoreBreakdown,
    /// Documents plus scheme applications
    pub items_processed: u32,
    pub paper: PaperSavings,
    pub carbon: CarbonSavings,
    pub efficiency: EfficiencyGains,
    /// Per-session figures scaled to a typical year of handling
    pub yearly_projection: YearlySustainability,
    pub sdg_alignment: Vec<String>,
    pub narrative: String,
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// SDG alignment
// ---------------------------------------------------------------------------

const BASE_SDGS: &[&str] = &[
    "SDG 8: Decent Work & Economic Growth (MSME empowerment)",
    "SDG 9: Industry, Innovation & Infrastructure (digital compliance)",
    "SDG 12: Responsible Consumption (paperless operations)",
    "SDG 13: Climate Action (CO2 reduction through digitisation)",
];

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn sdg_alignment(profile: &BusinessProfile) -> Vec<String> {
    let mut sdgs: Vec<String> = BASE_SDGS.iter().map(|s| s.to_string()).collect();

    let sector = profile.sector.to_lowercase();
    if ["food", "agri", "farm"].iter().any(|k| sector.contains(k)) {
        sdgs.push("SDG 2: Zero Hunger (agricultural MSME support)".into());
    }
    if profile.is_women_owned() {
        sdgs.push("SDG 5: Gender Equality (women entrepreneurship)".into());
    }
    let owner = words(&profile.owner_category);
    if owner
        .iter()
        .any(|w| matches!(w.as_str(), "sc" | "st" | "obc" | "minority"))
    {
        sdgs.push("SDG 10: Reduced Inequalities (inclusive growth)".into());
    }
    sdgs
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

fn yearly_projection(
    paper: &PaperSavings,
    carbon: &CarbonSavings,
    efficiency: &EfficiencyGains,
    items: u32,
) -> YearlySustainability {
    let factor = BENCHMARK_YEARLY_DOCUMENTS / Decimal::from(items.max(1));
    YearlySustainability {
        pages_saved: paper.pages_saved * factor,
        co2_saved_kg: carbon.net_co2_saved_kg * factor,
        cost_saved_inr: efficiency.cost_saved_inr * factor,
        hours_saved: efficiency.hours_saved * factor,
        trees_equivalent: carbon.equivalent_trees_planted * factor,
    }
}

fn narrative(
    paper: &PaperSavings,
    carbon: &CarbonSavings,
    efficiency: &EfficiencyGains,
    yearly: &YearlySustainability,
    green_score: Score,
) -> String {
    format!(
        "This analysis saved approximately {} pages of paper ({} kg), avoided {} kg of CO2 \
         from consultant travel, and reduced processing time by {} hours (a {}x improvement). \
         The cost saving compared to traditional compliance consulting is {}. \
         Projected annually, digital handling could save {}, prevent {} kg of CO2 emissions \
         and save {} pages, equivalent to planting {} trees. Green Score: {}/100.",
        paper.pages_saved.round(),
        paper.paper_weight_kg.round_dp(3),
        carbon.net_co2_saved_kg.round_dp(3),
        efficiency.hours_saved.round_dp(1),
        efficiency.productivity_multiplier.round_dp(1).normalize(),
        format_inr(efficiency.cost_saved_inr),
        format_inr(yearly.cost_saved_inr),
        yearly.co2_saved_kg.round_dp(2),
        yearly.pages_saved.round(),
        yearly.trees_equivalent.round_dp(3),
        green_score.round(),
    )
}

pub(crate) fn build_sustainability_report(
    config: &EngineConfig,
    input: &SustainabilityInput,
) -> MsmeScoreResult<SustainabilityReport> {
    let items = input
        .documents_processed
        .checked_add(input.schemes_matched)
        .filter(|n| *n <= MAX_DOCUMENTS)
        .ok_or_else(|| MsmeScoreError::InvalidInput {
            field: "documents_processed".into(),
            reason: format!("At most {MAX_DOCUMENTS} documents and schemes per request"),
        })?;

    let a = &config.sustainability;
    let paper = footprint::paper_savings(items, a);
    let carbon = footprint::carbon_savings(items, a);
    let efficiency = footprint::efficiency_gains(items);

    let breakdown = green_score::green_breakdown(&paper, &carbon, &efficiency, items, a);
    let score = breakdown.weighted();
    let yearly = yearly_projection(&paper, &carbon, &efficiency, items);

    Ok(SustainabilityReport {
        green_score: score,
        grade: GreenGrade::from_score(score),
        score_breakdown: breakdown,
        items_processed: items,
        narrative: narrative(&paper, &carbon, &efficiency, &yearly, score),
        sdg_alignment: sdg_alignment(&input.profile),
        paper,
        carbon,
        efficiency,
        yearly_projection: yearly,
        generated_at: input.as_of,
    })
}

/// Paper, carbon and time savings of handling the given documents
/// digitally, rolled into a green score.
pub(crate) fn assess_sustainability(
    config: &EngineConfig,
    input: &SustainabilityInput,
) -> MsmeScoreResult<ComputationOutput<SustainabilityReport>> {
    let start = Instant::now();
    let report = build_sustainability_report(config, input)?;

    let mut warnings = Vec::new();
    if report.items_processed == 0 {
        warnings.push("No documents processed; all savings are zero".to_string());
    }

    let assumptions = serde_json::json!({
        "sustainability": config.sustainability,
        "benchmark_yearly_documents": BENCHMARK_YEARLY_DOCUMENTS,
        "weights": {"paper": "0.30", "carbon": "0.30", "efficiency": "0.25", "scale": "0.15"},
        "as_of": input.as_of,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Paper / carbon / efficiency conversions with weighted green score",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn input(docs: u32, schemes: u32) -> SustainabilityInput {
        SustainabilityInput {
            documents_processed: docs,
            schemes_matched: schemes,
            profile: BusinessProfile::default(),
            as_of: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_documents_and_schemes_both_count() {
        let report = build_sustainability_report(&EngineConfig::default(), &input(3, 1)).unwrap();
        assert_eq!(report.items_processed, 4);
        assert_eq!(report.paper.pages_saved, dec!(100));
        // 12 / 4
        assert_eq!(report.yearly_projection.pages_saved, dec!(300));
        assert_eq!(report.yearly_projection.cost_saved_inr, dec!(59_400));
    }

    #[test]
    fn test_zero_documents() {
        let report = build_sustainability_report(&EngineConfig::default(), &input(0, 0)).unwrap();
        assert_eq!(report.green_score, Decimal::ZERO);
        assert_eq!(report.grade, GreenGrade::D);
        assert_eq!(report.efficiency.productivity_multiplier, Decimal::ZERO);
        assert_eq!(report.yearly_projection, YearlySustainability::default());
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(build_sustainability_report(&EngineConfig::default(), &input(u32::MAX, 1)).is_err());
        assert!(
            build_sustainability_report(&EngineConfig::default(), &input(MAX_DOCUMENTS, 1)).is_err()
        );
    }

    #[test]
    fn test_sdg_tags() {
        assert_eq!(sdg_alignment(&BusinessProfile::default()).len(), 4);
        let p = BusinessProfile {
            sector: "Agri processing".into(),
            owner_category: "Women, OBC".into(),
            ..Default::default()
        };
        let tags = sdg_alignment(&p);
        assert_eq!(tags.len(), 7);
        assert!(tags[4].starts_with("SDG 2"));
        assert!(tags[5].starts_with("SDG 5"));
        assert!(tags[6].starts_with("SDG 10"));
    }

    #[test]
    fn test_narrative_is_deterministic() {
        let cfg = EngineConfig::default();
        let a = build_sustainability_report(&cfg, &input(2, 0)).unwrap();
        let b = build_sustainability_report(&cfg, &input(2, 0)).unwrap();
        assert_eq!(a, b);
        assert!(a.narrative.contains("50 pages"));
        assert!(a.narrative.contains("16x improvement"));
    }
}
