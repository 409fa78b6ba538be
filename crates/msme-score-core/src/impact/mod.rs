//! Composite impact: risk reduction, profitability, sustainability, time
//! and cost folded into one 0-100 score with sector and GRC context.

pub mod benchmark;
pub mod composite;
pub mod grc;
pub mod narrative;

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::{regional_strictness, sector_baseline};
use crate::error::MsmeScoreError;
use crate::math::clamp_score;
use crate::profile::BusinessProfile;
use crate::profitability::ProfitabilityReport;
use crate::risk::ComplianceRiskReport;
use crate::sustainability::SustainabilityReport;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Score};
use crate::MsmeScoreResult;

pub use benchmark::SectorComparison;
pub use composite::{ImpactBreakdown, ImpactGrade};
pub use grc::{GrcAlignment, GrcReadiness};

pub const MAX_DOCUMENTS: u32 = 1_000_000;

/// Largest magnitude accepted for any money, mass, hour or page signal.
pub const MAX_SIGNAL_MAGNITUDE: Decimal = dec!(1_000_000_000_000_000_000_000_000);

const RISK_REDUCTION_FACTOR: Decimal = dec!(0.7);
const MAX_RISK_REDUCTION_PCT: Decimal = dec!(70);

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// The figures the composite reads from each sub-report. A missing or
/// failed sub-model is represented by the all-zero default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSignal {
    pub overall_score: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilitySignal {
    pub roi_multiplier: Multiple,
    pub total_roi_inr: Money,
    pub penalty_avoidance_inr: Money,
    pub scheme_benefits_inr: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainabilitySignal {
    pub green_score: Score,
    pub co2_saved_kg: Decimal,
    pub hours_saved: Decimal,
    pub cost_saved_inr: Money,
    pub productivity_multiplier: Multiple,
    pub pages_saved: Decimal,
}

impl From<&ComplianceRiskReport> for RiskSignal {
    fn from(r: &ComplianceRiskReport) -> Self {
        Self {
            overall_score: r.overall_score,
        }
    }
}

impl From<&ProfitabilityReport> for ProfitabilitySignal {
    fn from(r: &ProfitabilityReport) -> Self {
        Self {
            roi_multiplier: r.roi_multiplier,
            total_roi_inr: r.total_roi_inr,
            penalty_avoidance_inr: r.total_penalty_avoidance_inr,
            scheme_benefits_inr: r.total_scheme_benefits_inr,
        }
    }
}

impl From<&SustainabilityReport> for SustainabilitySignal {
    fn from(r: &SustainabilityReport) -> Self {
        Self {
            green_score: r.green_score,
            co2_saved_kg: r.carbon.net_co2_saved_kg,
            hours_saved: r.efficiency.hours_saved,
            cost_saved_inr: r.efficiency.cost_saved_inr,
            productivity_multiplier: r.efficiency.productivity_multiplier,
            pages_saved: r.paper.pages_saved,
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactInput {
    #[serde(default)]
    pub risk: RiskSignal,
    #[serde(default)]
    pub profitability: ProfitabilitySignal,
    #[serde(default)]
    pub sustainability: SustainabilitySignal,
    #[serde(default)]
    pub profile: BusinessProfile,
    #[serde(default = "default_documents")]
    pub documents_processed: u32,
    #[serde(default = "Utc::now")]
    pub as_of: DateTime<Utc>,
}

fn default_documents() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactProjection {
    pub monthly_risk_reduction_pct: Decimal,
    pub monthly_cost_saved_inr: Money,
    pub monthly_time_saved_hours: Decimal,
    pub monthly_penalties_prevented_inr: Money,
    pub monthly_schemes_value_inr: Money,
    pub yearly_risk_reduction_pct: Decimal,
    pub yearly_cost_saved_inr: Money,
    pub yearly_time_saved_hours: Decimal,
    pub yearly_penalties_prevented_inr: Money,
    pub yearly_schemes_value_inr: Money,
    pub yearly_co2_saved_kg: Decimal,
    pub yearly_paper_pages_saved: Decimal,
    pub yearly_total_roi_inr: Money,
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub impact_score: Score,
    pub risk_reduced_pct: Decimal,
    pub hours_saved_monthly: Decimal,
    pub money_saved_yearly_inr: Money,
    pub penalties_prevented_inr: Money,
    pub schemes_unlocked_inr: Money,
    pub co2_saved_yearly_kg: Decimal,
    pub roi_multiplier: Multiple,
    pub sector_percentile: Score,
    pub grc_readiness: GrcReadiness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub impact_score: Score,
    pub impact_grade: ImpactGrade,
    /// Weighted breakdown before the regional adjustment
    pub weighted_score: Score,
    /// Regional multiplier actually applied to the composite (capped)
    pub regional_multiplier: Decimal,
    pub breakdown: ImpactBreakdown,
    pub projection: ImpactProjection,
    pub benchmark: SectorComparison,
    pub grc_alignment: GrcAlignment,
    pub narrative: String,
    pub key_metrics: KeyMetrics,
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

fn projection(input: &ImpactInput) -> ImpactProjection {
    let docs = Decimal::from(input.documents_processed.max(1));
    let monthly = Decimal::ONE / docs;
    let yearly = dec!(12) / docs;
    let risk_pct = (clamp_score(input.risk.overall_score) * RISK_REDUCTION_FACTOR).min(MAX_RISK_REDUCTION_PCT);
    let s = &input.sustainability;
    let p = &input.profitability;

    ImpactProjection {
        monthly_risk_reduction_pct: risk_pct,
        monthly_cost_saved_inr: s.cost_saved_inr * monthly,
        monthly_time_saved_hours: s.hours_saved * monthly,
        monthly_penalties_prevented_inr: p.penalty_avoidance_inr * monthly,
        monthly_schemes_value_inr: p.scheme_benefits_inr * monthly,
        yearly_risk_reduction_pct: risk_pct,
        yearly_cost_saved_inr: s.cost_saved_inr * yearly,
        yearly_time_saved_hours: s.hours_saved * yearly,
        yearly_penalties_prevented_inr: p.penalty_avoidance_inr * yearly,
        yearly_schemes_value_inr: p.scheme_benefits_inr * yearly,
        yearly_co2_saved_kg: s.co2_saved_kg * yearly,
        yearly_paper_pages_saved: s.pages_saved * yearly,
        yearly_total_roi_inr: p.total_roi_inr * yearly,
    }
}

fn validate_input(input: &ImpactInput) -> MsmeScoreResult<()> {
    if input.documents_processed > MAX_DOCUMENTS {
        return Err(MsmeScoreError::InvalidInput {
            field: "documents_processed".into(),
            reason: format!("At most {MAX_DOCUMENTS} documents per request"),
        });
    }

    let p = &input.profitability;
    let s = &input.sustainability;
    let signals = [
        ("risk.overall_score", input.risk.overall_score),
        ("profitability.roi_multiplier", p.roi_multiplier),
        ("profitability.total_roi_inr", p.total_roi_inr),
        ("profitability.penalty_avoidance_inr", p.penalty_avoidance_inr),
        ("profitability.scheme_benefits_inr", p.scheme_benefits_inr),
        ("sustainability.green_score", s.green_score),
        ("sustainability.co2_saved_kg", s.co2_saved_kg),
        ("sustainability.hours_saved", s.hours_saved),
        ("sustainability.cost_saved_inr", s.cost_saved_inr),
        ("sustainability.productivity_multiplier", s.productivity_multiplier),
        ("sustainability.pages_saved", s.pages_saved),
    ];
    match signals
        .iter()
        .find(|(_, value)| value.abs() > MAX_SIGNAL_MAGNITUDE)
    {
        Some((field, _)) => Err(MsmeScoreError::InvalidInput {
            field: (*field).to_string(),
            reason: format!("Magnitude above {MAX_SIGNAL_MAGNITUDE}"),
        }),
        None => Ok(()),
    }
}

pub(crate) fn build_impact_report(input: &ImpactInput) -> MsmeScoreResult<ImpactReport> {
    validate_input(input)?;

    let sector = input.profile.sector_class();
    let baseline = sector_baseline(sector);
    let regional = regional_strictness(input.profile.region_key());
    let docs = input.documents_processed;
    let p = &input.profitability;
    let s = &input.sustainability;

    let breakdown = ImpactBreakdown {
        compliance_risk_reduction: composite::risk_reduction_score(
            clamp_score(input.risk.overall_score),
            regional,
        ),
        profitability_gain: composite::profitability_score(
            p.roi_multiplier,
            p.penalty_avoidance_inr,
            p.scheme_benefits_inr,
            &baseline,
        ),
        sustainability_improvement: composite::sustainability_score(s.green_score, s.co2_saved_kg),
        time_saved: composite::time_saved_score(s.hours_saved, s.productivity_multiplier, docs),
        cost_saved: composite::cost_saved_score(s.cost_saved_inr, docs, &baseline),
    };

    let weighted = breakdown.weighted();
    let impact_score = composite::regional_composite(weighted, regional);
    let grade = ImpactGrade::from_score(impact_score);
    debug!(%weighted, %impact_score, %regional, "impact composite");

    let projection = projection(input);
    let comparison = benchmark::sector_comparison(
        sector,
        &baseline,
        impact_score,
        breakdown.compliance_risk_reduction,
        s.cost_saved_inr,
        p.penalty_avoidance_inr,
    );
    let grc = grc::grc_alignment(
        breakdown.compliance_risk_reduction,
        breakdown.profitability_gain,
        breakdown.sustainability_improvement,
        impact_score,
    );

    let narrative = narrative::impact_narrative(&narrative::NarrativeContext {
        business_name: input.profile.display_name(),
        impact_score,
        grade,
        breakdown: &breakdown,
        projection: &projection,
        benchmark: &comparison,
        grc: &grc,
    });

    let key_metrics = KeyMetrics {
        impact_score,
        risk_reduced_pct: breakdown.compliance_risk_reduction * RISK_REDUCTION_FACTOR,
        hours_saved_monthly: projection.monthly_time_saved_hours,
        money_saved_yearly_inr: projection.yearly_total_roi_inr,
        penalties_prevented_inr: p.penalty_avoidance_inr,
        schemes_unlocked_inr: p.scheme_benefits_inr,
        co2_saved_yearly_kg: projection.yearly_co2_saved_kg,
        roi_multiplier: p.roi_multiplier,
        sector_percentile: comparison.percentile,
        grc_readiness: grc.overall_grc_readiness,
    };

    Ok(ImpactReport {
        impact_score,
        impact_grade: grade,
        weighted_score: weighted,
        regional_multiplier: regional.min(composite::COMPOSITE_REGIONAL_CAP),
        breakdown,
        projection,
        benchmark: comparison,
        grc_alignment: grc,
        narrative,
        key_metrics,
        generated_at: input.as_of,
    })
}

/// Fold the three sub-model signals into one composite impact score.
pub(crate) fn calculate_impact(input: &ImpactInput) -> MsmeScoreResult<ComputationOutput<ImpactReport>> {
    let start = Instant::now();
    let report = build_impact_report(input)?;

    let mut warnings = Vec::new();
    if input.risk == RiskSignal::default() {
        warnings.push("Risk signal is zero; risk reduction contributes nothing".to_string());
    }
    if input.profitability == ProfitabilitySignal::default() {
        warnings.push("Profitability signal is zero".to_string());
    }
    if input.sustainability == SustainabilitySignal::default() {
        warnings.push("Sustainability signal is zero".to_string());
    }

    let assumptions = serde_json::json!({
        "weights": {
            "risk": composite::RISK_WEIGHT,
            "profitability": composite::PROFIT_WEIGHT,
            "sustainability": composite::SUSTAINABILITY_WEIGHT,
            "time": composite::TIME_WEIGHT,
            "cost": composite::COST_WEIGHT,
        },
        "risk_regional_cap": composite::RISK_REGIONAL_CAP,
        "composite_regional_cap": composite::COMPOSITE_REGIONAL_CAP,
        "percentile_model": "50 + 50 tanh((impact - 50) / 20), heuristic estimate",
        "documents_processed": input.documents_processed,
        "as_of": input.as_of,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted five-dimension composite with capped regional adjustment",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}
