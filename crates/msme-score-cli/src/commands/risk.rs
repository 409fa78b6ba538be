use clap::Args;
use serde_json::json;

use msme_score_core::policy::PolicyAnalysis;
use msme_score_core::risk::{quick_risk_score, ComplianceRiskInput};
use msme_score_core::ScoringEngine;

use super::{CommandResult, RequestArgs};
use crate::input;

/// Arguments for the full compliance-risk assessment
#[derive(Args)]
pub struct RiskArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

/// Arguments for the coarse risk score
#[derive(Args)]
pub struct QuickRiskArgs {
    /// Path to a policy analysis JSON file
    #[arg(long)]
    pub input: Option<String>,

    /// HIGH / MEDIUM / LOW; defaults to the analysis' own risk level
    #[arg(long)]
    pub risk_level: Option<String>,
}

pub fn run_risk(args: RiskArgs, engine: &ScoringEngine) -> CommandResult {
    let mut risk_input: ComplianceRiskInput =
        input::read_request(args.request.input_path(), "risk")?;
    args.request.apply_as_of(&mut risk_input.as_of);

    let result = engine.assess_compliance_risk(&risk_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_quick_risk(args: QuickRiskArgs) -> CommandResult {
    let analysis: PolicyAnalysis = input::read_request(args.input.as_deref(), "quick-risk")?;
    let risk_level = args
        .risk_level
        .unwrap_or_else(|| analysis.risk_assessment.overall_risk_level.clone());
    let score = quick_risk_score(&risk_level, &analysis.penalties);

    Ok(json!({
        "result": {
            "quick_risk_score": score,
            "risk_level": risk_level,
            "penalties_considered": analysis.penalties.len(),
        },
        "methodology": "Base score by declared risk level plus largest penalty boost",
        "warnings": analysis.diagnostics.warnings(),
    }))
}
