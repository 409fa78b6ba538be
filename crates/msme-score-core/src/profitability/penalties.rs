use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{classify_urgency, penalty_enforcement_probability, Urgency};
use crate::currency::parse_inr;
use crate::policy::{Obligation, Penalty};
use crate::types::{InputDiagnostics, Money, Rate};

/// Late-fee estimate used when a document names no penalties at all.
const FALLBACK_VIOLATION: &str = "GST Return Late Filing (estimate)";
const FALLBACK_PENALTY_INR: Money = dec!(10_000);
const FALLBACK_PROBABILITY: Rate = dec!(0.6);

/// Leading violation words used to find the obligation a penalty belongs to.
const MATCH_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyAvoidance {
    pub violation: String,
    pub penalty_amount_inr: Money,
    pub enforcement_probability: Rate,
    /// amount x probability
    pub expected_loss_inr: Money,
    pub urgency: Urgency,
    /// True for the synthesized late-fee estimate
    pub estimated: bool,
}

/// Urgency of a penalty is borrowed from the severity wording of the first
/// obligation that shares one of the violation's leading words.
fn matched_urgency(violation: &str, obligations: &[Obligation]) -> Urgency {
    let lowered = violation.to_lowercase();
    let keys: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(MATCH_WORDS)
        .collect();
    if keys.is_empty() {
        return Urgency::Medium;
    }
    obligations
        .iter()
        .find(|o| {
            let name = o.obligation.to_lowercase();
            keys.iter().any(|k| name.contains(k))
        })
        .map(|o| classify_urgency(&o.severity_if_ignored))
        .unwrap_or(Urgency::Medium)
}

pub fn penalty_avoidances(
    penalties: &[Penalty],
    obligations: &[Obligation],
    diagnostics: &mut InputDiagnostics,
) -> Vec<PenaltyAvoidance> {
    if penalties.is_empty() {
        return vec![PenaltyAvoidance {
            violation: FALLBACK_VIOLATION.to_string(),
            penalty_amount_inr: FALLBACK_PENALTY_INR,
            enforcement_probability: FALLBACK_PROBABILITY,
            expected_loss_inr: FALLBACK_PENALTY_INR * FALLBACK_PROBABILITY,
            urgency: Urgency::Medium,
            estimated: true,
        }];
    }

    penalties
        .iter()
        .map(|p| {
            let amount = match parse_inr(&p.penalty_amount) {
                Ok(a) => a,
                Err(e) => {
                    warn!(violation = %p.violation, error = %e, "penalty amount not understood");
                    diagnostics.unparseable_amounts += 1;
                    Decimal::ZERO
                }
            };
            let probability = penalty_enforcement_probability(&p.violation, &p.other_consequences);
            let expected = amount * probability;
            debug!(violation = %p.violation, %amount, %probability, "penalty avoidance");
            PenaltyAvoidance {
                violation: p.violation.clone(),
                penalty_amount_inr: amount,
                enforcement_probability: probability,
                expected_loss_inr: expected,
                urgency: matched_urgency(&p.violation, obligations),
                estimated: false,
            }
        })
        .collect()
}
