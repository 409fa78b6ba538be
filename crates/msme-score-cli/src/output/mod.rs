pub mod csv_out;
pub mod minimal;
pub mod table;

use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use msme_score_core::currency::format_inr;
use msme_score_core::impact::ImpactReport;
use msme_score_core::peer_benchmark::PeerBenchmarkReport;
use msme_score_core::profitability::{BreakEven, ProfitabilityReport};
use msme_score_core::risk::{ComplianceRiskReport, RiskBand};
use msme_score_core::sustainability::SustainabilityReport;
use msme_score_core::EvaluationReport;

use crate::OutputFormat;

/// A command's `result`, recognised by its shape and read back into the
/// report type it was serialized from.
pub enum ReportView {
    Evaluation(Box<EvaluationReport>),
    Risk(Box<ComplianceRiskReport>),
    Profitability(Box<ProfitabilityReport>),
    Sustainability(Box<SustainabilityReport>),
    Impact(Box<ImpactReport>),
    Benchmark(Box<PeerBenchmarkReport>),
    /// Ad hoc results such as the quick risk score
    Other(Value),
}

impl ReportView {
    pub fn from_result(result: &Value) -> Self {
        let has = |key: &str| result.get(key).is_some();
        let view = if has("risk") && has("impact") {
            read(result).map(ReportView::Evaluation)
        } else if has("obligation_risks") {
            read(result).map(ReportView::Risk)
        } else if has("break_even") {
            read(result).map(ReportView::Profitability)
        } else if has("green_score") {
            read(result).map(ReportView::Sustainability)
        } else if has("impact_score") {
            read(result).map(ReportView::Impact)
        } else if has("overall_percentile") {
            read(result).map(ReportView::Benchmark)
        } else {
            None
        };
        view.unwrap_or_else(|| ReportView::Other(result.clone()))
    }
}

fn read<T: serde::de::DeserializeOwned>(value: &Value) -> Option<Box<T>> {
    serde_json::from_value(value.clone()).ok().map(Box::new)
}

/// The report inside an output envelope; a bare value is its own result.
pub fn result_of(value: &Value) -> &Value {
    value.get("result").unwrap_or(value)
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("JSON serialization error: {e}"),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

// ---------------------------------------------------------------------------
// Shared cell formatting
// ---------------------------------------------------------------------------

/// Wire name of a serde enum, e.g. `HIGH` or `A+`.
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

pub fn score(value: Decimal) -> String {
    value.round_dp(1).to_string()
}

pub fn inr(value: Decimal) -> String {
    format_inr(value)
}

pub fn days(value: Option<i64>) -> String {
    match value {
        Some(d) if d < 0 => format!("{} overdue", -d),
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

pub fn break_even(value: BreakEven) -> String {
    match value {
        BreakEven::AtMonth(1) => "immediate (month 1)".to_string(),
        BreakEven::AtMonth(m) => format!("month {m}"),
        BreakEven::Never => "not within horizon".to_string(),
    }
}

pub fn paint_band(band: RiskBand) -> ColoredString {
    let text = label(&band);
    match band {
        RiskBand::Critical => text.red().bold(),
        RiskBand::High => text.red(),
        RiskBand::Medium => text.yellow(),
        RiskBand::Low => text.green(),
        RiskBand::Minimal => text.dimmed(),
    }
}

/// Fallback for values with no dedicated rendering.
pub fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(plain).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_unknown_shape_falls_back() {
        let v = json!({"quick_risk_score": "65", "risk_level": "HIGH"});
        assert!(matches!(ReportView::from_result(&v), ReportView::Other(_)));
    }

    #[test]
    fn test_result_unwrapped_from_envelope() {
        let v = json!({"result": {"a": 1}, "warnings": []});
        assert_eq!(result_of(&v), &json!({"a": 1}));
        assert_eq!(result_of(&json!({"a": 1})), &json!({"a": 1}));
    }

    #[test]
    fn test_cells() {
        assert_eq!(label(&RiskBand::Critical), "CRITICAL");
        assert_eq!(score(dec!(62.46)), "62.5");
        assert_eq!(inr(dec!(150000)), "₹1,50,000");
        assert_eq!(days(Some(-3)), "3 overdue");
        assert_eq!(days(None), "-");
        assert_eq!(break_even(BreakEven::AtMonth(1)), "immediate (month 1)");
        assert_eq!(break_even(BreakEven::AtMonth(7)), "month 7");
        assert_eq!(break_even(BreakEven::Never), "not within horizon");
    }
}
