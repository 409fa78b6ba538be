//! Compliance risk: per-obligation factor scoring and the aggregate report.

pub mod aggregate;
pub mod alerts;
pub mod calendar;
pub mod deadline;
pub mod obligation;

use std::collections::HashSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::{regional_strictness, sector_risk_multiplier};
use crate::config::{BandThresholds, EngineConfig};
use crate::math::saturating_sum;
use crate::policy::PolicyAnalysis;
use crate::profile::{BusinessProfile, Sector};
use crate::types::{with_metadata, ComputationOutput, InputDiagnostics, Money, Score};
use crate::MsmeScoreResult;

pub use aggregate::{quick_risk_score, FactorAverages, RiskVelocity};
pub use alerts::{DeadlineCluster, DensityLevel, MonthlyDensity, NearTermRisk, RiskTrajectory};
pub use calendar::{RecurringObligation, UpcomingDeadline};
pub use obligation::{ObligationRisk, ObligationScorer, PenaltyIndex};

// ---------------------------------------------------------------------------
// Risk band
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Critical,
    High,
    Medium,
    Low,
    Minimal,
}

impl RiskBand {
    /// Lower bounds are inclusive: a score exactly on a threshold takes the
    /// higher band.
    pub fn from_score(score: Score, t: &BandThresholds) -> Self {
        if score >= t.critical {
            RiskBand::Critical
        } else if score >= t.high {
            RiskBand::High
        } else if score >= t.medium {
            RiskBand::Medium
        } else if score >= t.low {
            RiskBand::Low
        } else {
            RiskBand::Minimal
        }
    }

    pub fn remediation_hint(self, name: &str) -> String {
        match self {
            RiskBand::Critical => {
                format!("Immediate action required for '{name}'. Consult a legal advisor.")
            }
            RiskBand::High => format!("Schedule '{name}' compliance within this week."),
            RiskBand::Medium => format!("Plan to address '{name}' within the next 30 days."),
            RiskBand::Low => format!("Add '{name}' to your quarterly review checklist."),
            RiskBand::Minimal => format!("'{name}' is low priority. Monitor periodically."),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRiskInput {
    pub analysis: PolicyAnalysis,
    #[serde(default)]
    pub profile: BusinessProfile,
    /// Evaluation instant; deadlines are measured from its date
    #[serde(default = "Utc::now")]
    pub as_of: DateTime<Utc>,
    /// Earlier overall scores for this business, oldest first
    #[serde(default)]
    pub risk_history: Vec<Score>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRiskReport {
    pub overall_score: Score,
    pub overall_band: RiskBand,
    /// Highest risk first
    pub obligation_risks: Vec<ObligationRisk>,
    pub top_risks: Vec<ObligationRisk>,
    pub score_breakdown: FactorAverages,
    pub recommendations: Vec<String>,
    pub risk_velocity: RiskVelocity,
    pub total_expected_penalty_inr: Money,
    pub total_discounted_penalty_inr: Money,
    /// Extractor-level risk heuristic, independent of obligation scoring
    pub quick_score: Score,
    pub sector: Sector,
    pub region: String,
    /// min(sector x regional, configured cap)
    pub combined_multiplier: Decimal,
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
    pub recurring_obligations: Vec<RecurringObligation>,
    pub deadline_clusters: Vec<DeadlineCluster>,
    /// Statutory filing load per calendar month
    pub compliance_density: Vec<MonthlyDensity>,
    pub near_term_risk: NearTermRisk,
    pub risk_trajectory: RiskTrajectory,
    pub diagnostics: InputDiagnostics,
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

pub(crate) fn combined_multiplier(config: &EngineConfig, profile: &BusinessProfile) -> Decimal {
    let raw = sector_risk_multiplier(profile.sector_class())
        * regional_strictness(profile.region_key());
    raw.min(config.max_combined_multiplier)
}

pub(crate) fn build_risk_report(
    config: &EngineConfig,
    input: &ComplianceRiskInput,
) -> ComplianceRiskReport {
    let analysis = &input.analysis;
    let today = input.as_of.date_naive();
    let multiplier = combined_multiplier(config, &input.profile);
    let mut diagnostics = analysis.diagnostics.clone();

    let penalty_index = PenaltyIndex::build(&analysis.penalties, &mut diagnostics);
    let scorer = ObligationScorer::new(config, multiplier, today);

    let mut risks: Vec<ObligationRisk> = analysis
        .obligations
        .iter()
        .map(|o| scorer.score(o, &penalty_index, &mut diagnostics))
        .collect();

    let known: HashSet<String> = risks
        .iter()
        .map(|r| r.obligation_name.to_lowercase())
        .collect();
    for action in &analysis.compliance_actions {
        if !known.contains(&action.action.trim().to_lowercase()) {
            risks.push(scorer.score_action(action));
        }
    }

    // stable: ties keep input order
    risks.sort_by(|a, b| b.weighted_score.cmp(&a.weighted_score));

    let overall_score = aggregate::overall_score(&risks);
    let sector = input.profile.sector_class();

    let upcoming = calendar::upcoming_deadlines(today);
    let recurring = calendar::recurring_obligations(sector);
    let signals = alerts::deadline_signals(&upcoming, &recurring, &risks);
    let clusters = alerts::deadline_clusters(&signals);
    debug!(signals = signals.len(), clusters = clusters.len(), "deadline outlook");

    ComplianceRiskReport {
        overall_score,
        overall_band: RiskBand::from_score(overall_score, &config.band_thresholds),
        top_risks: aggregate::top_risks(&risks),
        score_breakdown: aggregate::factor_averages(&risks),
        recommendations: aggregate::recommendations(&risks),
        risk_velocity: aggregate::risk_velocity(&risks),
        total_expected_penalty_inr: saturating_sum(risks.iter().map(|r| r.expected_penalty_inr)),
        total_discounted_penalty_inr: saturating_sum(risks.iter().map(|r| r.discounted_penalty_inr)),
        quick_score: quick_risk_score(analysis.risk_level(), &analysis.penalties),
        sector,
        region: input.profile.region_key().to_string(),
        combined_multiplier: multiplier,
        near_term_risk: alerts::near_term_profile(&signals, &clusters),
        risk_trajectory: alerts::risk_trajectory(&input.risk_history),
        compliance_density: alerts::compliance_density(),
        deadline_clusters: clusters,
        upcoming_deadlines: upcoming,
        recurring_obligations: recurring,
        obligation_risks: risks,
        diagnostics,
        generated_at: input.as_of,
    }
}

/// Score every obligation (and unmatched compliance action) in a policy
/// analysis and aggregate them into one report.
pub(crate) fn assess_compliance_risk(
    config: &EngineConfig,
    input: &ComplianceRiskInput,
) -> MsmeScoreResult<ComputationOutput<ComplianceRiskReport>> {
    let start = Instant::now();
    let report = build_risk_report(config, input);
    let warnings = report.diagnostics.warnings();

    let assumptions = serde_json::json!({
        "risk_weights": config.risk_weights,
        "band_thresholds": config.band_thresholds,
        "max_combined_multiplier": config.max_combined_multiplier,
        "rank_weights": ["2.0", "1.5", "1.0"],
        "as_of": input.as_of,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted multi-factor compliance risk (severity, penalty, deadline, frequency)",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}
