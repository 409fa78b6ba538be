use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::currency::format_inr;
use crate::impact::benchmark::SectorComparison;
use crate::impact::composite::{ImpactBreakdown, ImpactGrade};
use crate::impact::grc::GrcAlignment;
use crate::impact::ImpactProjection;

/// Everything the impact story quotes, in the order it is told.
pub struct NarrativeContext<'a> {
    pub business_name: &'a str,
    pub impact_score: Decimal,
    pub grade: ImpactGrade,
    pub breakdown: &'a ImpactBreakdown,
    pub projection: &'a ImpactProjection,
    pub benchmark: &'a SectorComparison,
    pub grc: &'a GrcAlignment,
}

fn one_dp(value: Decimal) -> Decimal {
    value.round_dp(1).normalize()
}

/// Fixed template: headline, the five dimensions in weight order, sector
/// standing, GRC readiness. Scores are shown to one decimal place.
pub fn impact_narrative(ctx: &NarrativeContext<'_>) -> String {
    let b = ctx.breakdown;
    let p = ctx.projection;
    let top_share = (dec!(100) - ctx.benchmark.percentile).round();

    let mut lines = vec![
        format!("Impact Analysis for {}", ctx.business_name),
        String::new(),
        format!(
            "Impact Score: {}/100 ({})",
            one_dp(ctx.impact_score),
            ctx.grade.label()
        ),
        String::new(),
        format!(
            "{} achieves a {} impact across five dimensions:",
            ctx.business_name,
            ctx.grade.label().to_lowercase()
        ),
    ];

    lines.push(format!(
        "- Compliance Risk Reduction: {}/100. Identified regulatory risks can be cut by up to {}%.",
        one_dp(b.compliance_risk_reduction),
        one_dp(p.yearly_risk_reduction_pct)
    ));
    lines.push(format!(
        "- Profitability Gain: {}/100. {} estimated yearly return from penalty avoidance and scheme benefits.",
        one_dp(b.profitability_gain),
        format_inr(p.yearly_total_roi_inr)
    ));
    lines.push(format!(
        "- Sustainability Impact: {}/100. Projected to save {} kg CO2 and {} pages of paper annually.",
        one_dp(b.sustainability_improvement),
        p.yearly_co2_saved_kg.round_dp(2).normalize(),
        p.yearly_paper_pages_saved.round()
    ));
    lines.push(format!(
        "- Time Efficiency: {}/100. {} hours saved per year.",
        one_dp(b.time_saved),
        one_dp(p.yearly_time_saved_hours)
    ));
    lines.push(format!(
        "- Cost Optimisation: {}/100. {} in yearly compliance cost savings compared to traditional consulting.",
        one_dp(b.cost_saved),
        format_inr(p.yearly_cost_saved_inr)
    ));
    lines.push(String::new());
    lines.push(format!(
        "Sector Performance: {}. Estimated to rank in the top {}% of {} MSMEs for compliance readiness.",
        ctx.benchmark.vs_avg_risk, top_share, ctx.benchmark.sector
    ));
    lines.push(String::new());
    lines.push(format!(
        "GRC Readiness: {} (average {}/100 across governance, risk management, compliance and sustainability).",
        ctx.grc.overall_grc_readiness.label(),
        one_dp(ctx.grc.average())
    ));

    lines.join("\n")
}
