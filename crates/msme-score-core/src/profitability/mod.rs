//! Financial return of compliance: penalties avoided, scheme benefits
//! unlocked, handling cost saved, and the discounted multi-year view.

pub mod penalties;
pub mod projection;
pub mod schemes;

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::benchmarks::sector_risk_multiplier;
use crate::classify::Urgency;
use crate::config::EngineConfig;
use crate::currency::format_inr;
use crate::error::MsmeScoreError;
use crate::math::{checked_sum, safe_div, saturating_sum};
use crate::policy::PolicyAnalysis;
use crate::profile::BusinessProfile;
use crate::types::{with_metadata, ComputationOutput, InputDiagnostics, Money, Multiple};
use crate::MsmeScoreResult;

pub use penalties::PenaltyAvoidance;
pub use projection::{BreakEven, CostComparison, YearlyProjection};
pub use schemes::{BenefitType, Confidence, Effort, SchemeBenefit, SchemeId};

/// Upper bound on documents per request; keeps every product in range.
pub const MAX_DOCUMENTS: u32 = 1_000_000;

const QUICK_WIN_NAME_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityInput {
    pub analysis: PolicyAnalysis,
    #[serde(default)]
    pub profile: BusinessProfile,
    /// Externally matched schemes. When absent, eligibility is derived from
    /// the profile against the built-in scheme catalog.
    #[serde(default)]
    pub schemes: Option<Vec<SchemeBenefit>>,
    #[serde(default = "default_documents")]
    pub documents_processed: u32,
    #[serde(default = "Utc::now")]
    pub as_of: DateTime<Utc>,
}

fn default_documents() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    /// Sum of expected losses x sector multiplier
    pub total_penalty_avoidance_inr: Money,
    /// Sum of scheme values x sector multiplier
    pub total_scheme_benefits_inr: Money,
    pub total_cost_savings_inr: Money,
    pub total_roi_inr: Money,
    /// total ROI / platform cost
    pub roi_multiplier: Multiple,
    pub sector_multiplier: Decimal,
    pub penalty_avoidances: Vec<PenaltyAvoidance>,
    pub scheme_benefits: Vec<SchemeBenefit>,
    pub cost_comparison: CostComparison,
    /// Annualised ROI; the base of the NPV projection
    pub yearly_projection_inr: Money,
    pub projections: Vec<YearlyProjection>,
    pub break_even: BreakEven,
    pub break_even_month: Option<u32>,
    pub recommendations: Vec<String>,
    pub diagnostics: InputDiagnostics,
    pub generated_at: DateTime<Utc>,
}

impl ProfitabilityReport {
    pub fn npv_total_inr(&self) -> Money {
        self.projections
            .last()
            .map(|p| p.cumulative_npv_inr)
            .unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

fn validate_input(input: &ProfitabilityInput) -> MsmeScoreResult<()> {
    if input.documents_processed > MAX_DOCUMENTS {
        return Err(MsmeScoreError::InvalidInput {
            field: "documents_processed".into(),
            reason: format!("At most {MAX_DOCUMENTS} documents per request"),
        });
    }
    if let Some(schemes) = &input.schemes {
        if let Some(s) = schemes.iter().find(|s| s.estimated_value_inr < Decimal::ZERO) {
            return Err(MsmeScoreError::InvalidInput {
                field: "schemes".into(),
                reason: format!("Scheme '{}' has a negative estimated value", s.scheme_id),
            });
        }
    }
    Ok(())
}

fn recommendations(
    avoidances: &[PenaltyAvoidance],
    schemes: &[SchemeBenefit],
    total_roi: Money,
) -> Vec<String> {
    let mut recs = Vec::new();

    let critical = avoidances
        .iter()
        .filter(|p| p.urgency == Urgency::Critical)
        .count();
    if critical > 0 {
        recs.push(format!(
            "{critical} critical penalty risk(s) identified. Immediate compliance action needed to avoid losses."
        ));
    }

    let easy: Vec<&SchemeBenefit> = schemes
        .iter()
        .filter(|s| s.application_effort == Effort::Easy)
        .collect();
    if !easy.is_empty() {
        let names: Vec<String> = easy
            .iter()
            .map(|s| s.scheme_name.chars().take(QUICK_WIN_NAME_CHARS).collect())
            .collect();
        let value = saturating_sum(easy.iter().map(|s| s.estimated_value_inr));
        recs.push(format!(
            "Quick wins: {} with estimated benefit {} and minimal application effort.",
            names.join(", "),
            format_inr(value)
        ));
    }

    if schemes
        .iter()
        .any(|s| SchemeId::from_code(&s.scheme_id) == Some(SchemeId::Udyam))
    {
        recs.push(
            "Register for Udyam (free, 10 min). It unlocks all MSME scheme benefits and tax advantages."
                .to_string(),
        );
    }

    if total_roi > Decimal::ZERO {
        recs.push(format!(
            "Total estimated ROI: {}. Compliance and scheme matching provide quantifiable financial returns.",
            format_inr(total_roi)
        ));
    }
    recs
}

pub(crate) fn build_profitability_report(
    config: &EngineConfig,
    input: &ProfitabilityInput,
) -> MsmeScoreResult<ProfitabilityReport> {
    validate_input(input)?;

    let analysis = &input.analysis;
    let mut diagnostics = analysis.diagnostics.clone();
    let sector_multiplier = sector_risk_multiplier(input.profile.sector_class());

    let avoidances =
        penalties::penalty_avoidances(&analysis.penalties, &analysis.obligations, &mut diagnostics);
    let scheme_benefits = match &input.schemes {
        Some(list) => list.clone(),
        None => schemes::derive_scheme_benefits(&input.profile),
    };

    let penalty_total = checked_sum(avoidances.iter().map(|p| p.expected_loss_inr))
        .and_then(|total| total.checked_mul(sector_multiplier))
        .ok_or_else(|| MsmeScoreError::out_of_range("penalties"))?;
    let scheme_total = checked_sum(scheme_benefits.iter().map(|s| s.estimated_value_inr))
        .and_then(|total| total.checked_mul(sector_multiplier))
        .ok_or_else(|| MsmeScoreError::out_of_range("schemes"))?;

    let items = input
        .documents_processed
        .saturating_add(scheme_benefits.len() as u32);
    let cost = projection::cost_comparison(items);
    let total_roi = checked_sum([penalty_total, scheme_total, cost.savings_inr])
        .ok_or_else(|| MsmeScoreError::out_of_range("total_roi_inr"))?;

    let docs = Decimal::from(input.documents_processed.max(1));
    let yearly = total_roi
        .checked_mul(dec!(12))
        .ok_or_else(|| MsmeScoreError::out_of_range("yearly_projection_inr"))?
        / docs;
    let projections = projection::project_npv(yearly, &config.financial)?;
    let break_even = projection::break_even(yearly, &config.financial)?;

    Ok(ProfitabilityReport {
        total_penalty_avoidance_inr: penalty_total,
        total_scheme_benefits_inr: scheme_total,
        total_cost_savings_inr: cost.savings_inr,
        total_roi_inr: total_roi,
        roi_multiplier: safe_div(total_roi, cost.platform_cost_inr),
        sector_multiplier,
        recommendations: recommendations(&avoidances, &scheme_benefits, total_roi),
        penalty_avoidances: avoidances,
        scheme_benefits,
        cost_comparison: cost,
        yearly_projection_inr: yearly,
        projections,
        break_even_month: break_even.month(),
        break_even,
        diagnostics,
        generated_at: input.as_of,
    })
}

/// Estimate the financial return of acting on a policy analysis.
pub(crate) fn analyze_profitability(
    config: &EngineConfig,
    input: &ProfitabilityInput,
) -> MsmeScoreResult<ComputationOutput<ProfitabilityReport>> {
    let start = Instant::now();
    let report = build_profitability_report(config, input)?;

    let mut warnings = report.diagnostics.warnings();
    if report.penalty_avoidances.iter().any(|p| p.estimated) {
        warnings.push("No penalties listed; a default late-filing estimate was used".into());
    }
    if report.break_even == BreakEven::Never {
        warnings.push(format!(
            "Benefits do not cover the subscription within {} months",
            config.financial.break_even_horizon_months
        ));
    }

    let assumptions = serde_json::json!({
        "financial": config.financial,
        "documents_processed": input.documents_processed,
        "schemes_supplied": input.schemes.is_some(),
        "sector_multiplier": report.sector_multiplier,
        "as_of": input.as_of,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Penalty avoidance + scheme benefits + cost savings with discounted multi-year projection",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}
