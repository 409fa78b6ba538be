use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use msme_score_core::impact::ImpactReport;
use msme_score_core::peer_benchmark::PeerBenchmarkReport;
use msme_score_core::profitability::ProfitabilityReport;
use msme_score_core::risk::ComplianceRiskReport;
use msme_score_core::sustainability::SustainabilityReport;
use msme_score_core::EvaluationReport;

use super::{break_even, days, inr, label, paint_band, plain, result_of, score, ReportView};

/// Render a command result as headline lines plus one table per record list.
pub fn print_table(value: &Value) {
    match ReportView::from_result(result_of(value)) {
        ReportView::Evaluation(r) => print_evaluation(&r),
        ReportView::Risk(r) => print_risk(&r),
        ReportView::Profitability(r) => print_profitability(&r),
        ReportView::Sustainability(r) => print_sustainability(&r),
        ReportView::Impact(r) => print_impact(&r),
        ReportView::Benchmark(r) => print_benchmark(&r),
        ReportView::Other(v) => print_fields(&v),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow());
            for w in warnings {
                println!("  - {}", plain(w));
            }
        }
    }
    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn summary(rows: &[(&str, String)]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, val) in rows {
        builder.push_record([field.to_string(), val.clone()]);
    }
    builder.build()
}

fn section(title: &str) {
    println!("\n{}", title.bold());
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

fn obligation_table(report: &ComplianceRiskReport) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Obligation", "Score", "Band", "Days", "Expected penalty", "Next step"]);
    for r in &report.obligation_risks {
        builder.push_record([
            r.obligation_name.clone(),
            score(r.weighted_score),
            label(&r.risk_band),
            days(r.days_remaining),
            inr(r.expected_penalty_inr),
            r.remediation_hint.clone(),
        ]);
    }
    builder.build()
}

fn print_risk(report: &ComplianceRiskReport) {
    println!(
        "Compliance risk {} {} ({} obligations, trajectory {})",
        score(report.overall_score).bold(),
        paint_band(report.overall_band),
        report.obligation_risks.len(),
        label(&report.risk_trajectory),
    );
    println!(
        "{}",
        summary(&[
            ("Quick score", score(report.quick_score)),
            ("Velocity", label(&report.risk_velocity)),
            ("Sector / region", format!("{} / {}", label(&report.sector), report.region)),
            ("Multiplier", report.combined_multiplier.to_string()),
            ("Expected penalties", inr(report.total_expected_penalty_inr)),
            ("Discounted penalties", inr(report.total_discounted_penalty_inr)),
            ("Risk next 30 days", score(report.near_term_risk.next_30_days)),
            ("Risk next 90 days", score(report.near_term_risk.next_90_days)),
        ])
    );

    if !report.obligation_risks.is_empty() {
        section("Obligations");
        println!("{}", obligation_table(report));
    }

    if !report.deadline_clusters.is_empty() {
        section("Deadline clusters");
        for c in &report.deadline_clusters {
            println!(
                "  days {}-{}: {} obligations ({})",
                c.start_day,
                c.end_day,
                c.obligation_count,
                c.obligations.join(", ")
            );
        }
    }

    if !report.upcoming_deadlines.is_empty() {
        section("Upcoming filings");
        let mut builder = Builder::default();
        builder.push_record(["Filing", "Category", "Due", "Days"]);
        for d in &report.upcoming_deadlines {
            builder.push_record([
                d.name.clone(),
                label(&d.category),
                d.due_date.map(|due| due.to_string()).unwrap_or_else(|| "this month".into()),
                days(d.days_until),
            ]);
        }
        println!("{}", builder.build());
    }

    print_list("Recommendations", &report.recommendations);
}

// ---------------------------------------------------------------------------
// Profitability
// ---------------------------------------------------------------------------

fn print_profitability(report: &ProfitabilityReport) {
    println!(
        "Total ROI {} ({}x platform cost), break-even {}",
        inr(report.total_roi_inr).bold(),
        score(report.roi_multiplier),
        break_even(report.break_even),
    );
    println!(
        "{}",
        summary(&[
            ("Penalty avoidance", inr(report.total_penalty_avoidance_inr)),
            ("Scheme benefits", inr(report.total_scheme_benefits_inr)),
            ("Cost savings", inr(report.total_cost_savings_inr)),
            ("Yearly projection", inr(report.yearly_projection_inr)),
            ("Sector multiplier", report.sector_multiplier.to_string()),
        ])
    );

    if !report.scheme_benefits.is_empty() {
        section("Schemes");
        let mut builder = Builder::default();
        builder.push_record(["Scheme", "Type", "Value", "Confidence", "Effort"]);
        for s in &report.scheme_benefits {
            builder.push_record([
                s.scheme_id.clone(),
                label(&s.benefit_type),
                inr(s.estimated_value_inr),
                label(&s.confidence),
                label(&s.application_effort),
            ]);
        }
        println!("{}", builder.build());
    }

    if !report.projections.is_empty() {
        section("Projection");
        let mut builder = Builder::default();
        builder.push_record(["Year", "Gross", "Discounted", "Cumulative NPV", "ROI"]);
        for p in &report.projections {
            builder.push_record([
                p.year.to_string(),
                inr(p.gross_benefit_inr),
                inr(p.discounted_benefit_inr),
                inr(p.cumulative_npv_inr),
                format!("{}x", score(p.roi_multiplier)),
            ]);
        }
        println!("{}", builder.build());
    }

    print_list("Recommendations", &report.recommendations);
}

// ---------------------------------------------------------------------------
// Sustainability / impact / benchmark
// ---------------------------------------------------------------------------

fn print_sustainability(report: &SustainabilityReport) {
    println!(
        "Green score {} grade {}",
        score(report.green_score).bold(),
        label(&report.grade).green()
    );
    println!(
        "{}",
        summary(&[
            ("Items processed", report.items_processed.to_string()),
            ("Pages saved", score(report.paper.pages_saved)),
            ("Net CO2 saved (kg)", score(report.carbon.net_co2_saved_kg)),
            ("Hours saved", score(report.efficiency.hours_saved)),
            ("Cost saved", inr(report.efficiency.cost_saved_inr)),
            ("SDGs", report.sdg_alignment.join(", ")),
        ])
    );
    println!("\n{}", report.narrative);
}

fn print_impact(report: &ImpactReport) {
    println!(
        "Impact {} {} (percentile {})",
        score(report.impact_score).bold(),
        label(&report.impact_grade).cyan(),
        score(report.benchmark.percentile),
    );
    let b = &report.breakdown;
    println!(
        "{}",
        summary(&[
            ("Risk reduction", score(b.compliance_risk_reduction)),
            ("Profitability gain", score(b.profitability_gain)),
            ("Sustainability", score(b.sustainability_improvement)),
            ("Time saved", score(b.time_saved)),
            ("Cost saved", score(b.cost_saved)),
            ("Regional multiplier", report.regional_multiplier.to_string()),
            ("GRC readiness", label(&report.grc_alignment.overall_grc_readiness)),
        ])
    );
    println!("\n{}", report.narrative);
}

fn print_benchmark(report: &PeerBenchmarkReport) {
    println!(
        "Percentile {} {} among {} peers",
        score(report.overall_percentile).bold(),
        label(&report.overall_tier),
        label(&report.sector),
    );
    let mut builder = Builder::default();
    builder.push_record(["Dimension", "Score", "Sector avg", "Percentile", "Tier"]);
    for d in &report.dimensions {
        builder.push_record([
            label(&d.dimension),
            score(d.user_score),
            score(d.sector_average),
            score(d.percentile_rank),
            label(&d.tier),
        ]);
    }
    println!("{}", builder.build());
    print_list("Recommendations", &report.recommendations);
}

fn print_evaluation(report: &EvaluationReport) {
    if let Some(impact) = &report.impact {
        print_impact(impact);
        println!();
    }
    print_risk(&report.risk);
    if let Some(p) = &report.profitability {
        println!();
        print_profitability(p);
    }
    if let Some(s) = &report.sustainability {
        println!();
        print_sustainability(s);
    }
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

fn print_fields(value: &Value) {
    match value {
        Value::Object(map) => {
            let rows: Vec<(&str, String)> =
                map.iter().map(|(k, v)| (k.as_str(), plain(v))).collect();
            println!("{}", summary(&rows));
        }
        other => println!("{}", plain(other)),
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    section(title);
    for item in items {
        println!("  - {item}");
    }
}
