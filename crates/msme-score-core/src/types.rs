use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in INR. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.10 = 10%). Never as percentages.
pub type Rate = Decimal;

/// Normalised score on the 0-100 scale.
pub type Score = Decimal;

/// Multiples (e.g., 25x ROI)
pub type Multiple = Decimal;

/// Counters for records that were skipped or fell back to defaults.
///
/// Non-fatal input problems never abort a report; they are tallied here so
/// consumers can tell a clean run from a degraded one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDiagnostics {
    pub skipped_obligations: u32,
    pub skipped_penalties: u32,
    pub skipped_actions: u32,
    pub unparseable_amounts: u32,
    pub unparseable_deadlines: u32,
}

impl InputDiagnostics {
    pub fn skipped_total(&self) -> u32 {
        self.skipped_obligations + self.skipped_penalties + self.skipped_actions
    }

    pub fn is_clean(&self) -> bool {
        self.skipped_total() == 0 && self.unparseable_amounts == 0 && self.unparseable_deadlines == 0
    }

    /// Human-readable lines for the output envelope's `warnings`.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (count, what) in [
            (self.skipped_obligations, "malformed obligation record(s) skipped"),
            (self.skipped_penalties, "malformed penalty record(s) skipped"),
            (self.skipped_actions, "malformed compliance action record(s) skipped"),
            (
                self.unparseable_amounts,
                "penalty amount(s) not understood; default penalty score used",
            ),
            (
                self.unparseable_deadlines,
                "deadline(s) not understood; neutral urgency used",
            ),
        ] {
            if count > 0 {
                out.push(format!("{count} {what}"));
            }
        }
        out
    }

    /// Combine counters from two models that read the same document; each
    /// record is counted once, so the larger tally wins.
    pub fn merge(&mut self, other: &InputDiagnostics) {
        self.skipped_obligations = self.skipped_obligations.max(other.skipped_obligations);
        self.skipped_penalties = self.skipped_penalties.max(other.skipped_penalties);
        self.skipped_actions = self.skipped_actions.max(other.skipped_actions);
        self.unparseable_amounts = self.unparseable_amounts.max(other.unparseable_amounts);
        self.unparseable_deadlines = self.unparseable_deadlines.max(other.unparseable_deadlines);
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
