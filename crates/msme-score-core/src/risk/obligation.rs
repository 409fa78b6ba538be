use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{priority_severity, FrequencyClass, SeverityClass};
use crate::config::EngineConfig;
use crate::currency::parse_inr;
use crate::math::clamp_score;
use crate::policy::{ComplianceAction, Obligation, Penalty};
use crate::risk::deadline::{assess_deadline, urgency_decay, UNKNOWN_DEADLINE_SCORE};
use crate::risk::RiskBand;
use crate::time_value::discount_days;
use crate::types::{InputDiagnostics, Money, Rate, Score};

/// Penalty score when no penalty entry matches, or the amount is unknown.
pub const DEFAULT_PENALTY_SCORE: Score = dec!(30);

/// Frequency proxy for compliance actions with no matching obligation.
const SYNTHETIC_FREQUENCY_SCORE: Score = dec!(20);

/// Lower INR bound (inclusive) and the score for that bracket.
const PENALTY_BRACKETS: &[(Money, Score)] = &[
    (dec!(1_000_000), dec!(100)),
    (dec!(500_000), dec!(85)),
    (dec!(100_000), dec!(70)),
    (dec!(50_000), dec!(55)),
    (dec!(10_000), dec!(40)),
];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Risk profile for a single obligation. All scores are on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationRisk {
    pub obligation_name: String,
    pub severity_class: SeverityClass,
    pub severity_score: Score,
    pub penalty_score: Score,
    pub deadline_score: Score,
    pub frequency_score: Score,
    /// Weighted factor sum after the sector/regional multiplier
    pub weighted_score: Score,
    pub risk_band: RiskBand,
    pub days_remaining: Option<i64>,
    pub urgency_decay: Option<Score>,
    pub enforcement_probability: Rate,
    /// Matched penalty amount, when one was found and parsed
    pub penalty_amount_inr: Option<Money>,
    pub expected_penalty_inr: Money,
    pub discounted_penalty_inr: Money,
    pub remediation_hint: String,
    /// Derived from a compliance action rather than an extracted obligation
    pub synthetic: bool,
}

// ---------------------------------------------------------------------------
// Penalty index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyMatch {
    pub score: Score,
    pub amount: Option<Money>,
}

/// Word -> strongest penalty lookup, built once per document from the
/// violation texts. Only words longer than three characters are indexed.
#[derive(Debug, Clone, Default)]
pub struct PenaltyIndex {
    by_word: HashMap<String, PenaltyMatch>,
}

pub fn penalty_amount_score(amount: Option<Money>) -> Score {
    match amount {
        Some(a) if a > Decimal::ZERO => PENALTY_BRACKETS
            .iter()
            .find(|(floor, _)| a >= *floor)
            .map(|(_, score)| *score)
            .unwrap_or(dec!(25)),
        _ => DEFAULT_PENALTY_SCORE,
    }
}

fn significant_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .map(|w| w.to_lowercase())
}

impl PenaltyIndex {
    pub fn build(penalties: &[Penalty], diagnostics: &mut InputDiagnostics) -> Self {
        let mut by_word: HashMap<String, PenaltyMatch> = HashMap::new();

        for penalty in penalties {
            let amount = match parse_inr(&penalty.penalty_amount) {
                Ok(a) if a > Decimal::ZERO => Some(a),
                Ok(_) => None,
                Err(e) => {
                    diagnostics.unparseable_amounts += 1;
                    warn!(violation = %penalty.violation, error = %e, "penalty amount not understood");
                    None
                }
            };
            let candidate = PenaltyMatch {
                score: penalty_amount_score(amount),
                amount,
            };

            for word in significant_words(&penalty.violation) {
                by_word
                    .entry(word)
                    .and_modify(|existing| {
                        if stronger(&candidate, existing) {
                            *existing = candidate;
                        }
                    })
                    .or_insert(candidate);
            }
        }

        Self { by_word }
    }

    /// Strongest penalty sharing a significant word with `name`.
    pub fn match_name(&self, name: &str) -> Option<PenaltyMatch> {
        significant_words(name)
            .filter_map(|w| self.by_word.get(&w).copied())
            .fold(None, |best: Option<PenaltyMatch>, m| match best {
                Some(b) if !stronger(&m, &b) => Some(b),
                _ => Some(m),
            })
    }
}

/// Higher score wins; equal scores fall back to the larger amount so the
/// result never depends on iteration order.
fn stronger(a: &PenaltyMatch, b: &PenaltyMatch) -> bool {
    if a.score != b.score {
        return a.score > b.score;
    }
    a.amount.unwrap_or(Decimal::ZERO) > b.amount.unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Scores obligations for one business under one configuration.
pub struct ObligationScorer<'a> {
    config: &'a EngineConfig,
    multiplier: Decimal,
    today: NaiveDate,
}

impl<'a> ObligationScorer<'a> {
    /// `multiplier` is the already-capped sector x regional adjustment.
    pub fn new(config: &'a EngineConfig, multiplier: Decimal, today: NaiveDate) -> Self {
        Self {
            config,
            multiplier,
            today,
        }
    }

    fn weighted(&self, severity: Score, penalty: Score, deadline: Score, frequency: Score) -> Score {
        let w = &self.config.risk_weights;
        let raw = w.severity * severity
            + w.penalty * penalty
            + w.deadline * deadline
            + w.frequency * frequency;
        clamp_score(raw * self.multiplier)
    }

    pub fn score(
        &self,
        obligation: &Obligation,
        penalties: &PenaltyIndex,
        diagnostics: &mut InputDiagnostics,
    ) -> ObligationRisk {
        let name = obligation.obligation.trim();

        let severity_class = SeverityClass::classify(&obligation.severity_if_ignored);
        let severity_score = severity_class.score();

        let matched = penalties.match_name(name);
        let penalty_score = matched.map(|m| m.score).unwrap_or(DEFAULT_PENALTY_SCORE);
        let penalty_amount_inr = matched.and_then(|m| m.amount);

        let deadline = assess_deadline(&obligation.deadline, self.today);
        if deadline.days_remaining.is_none() && !obligation.deadline.trim().is_empty() {
            diagnostics.unparseable_deadlines += 1;
        }

        let frequency_score = FrequencyClass::classify(&obligation.frequency).score();

        let weighted_score =
            self.weighted(severity_score, penalty_score, deadline.score, frequency_score);
        let risk_band = RiskBand::from_score(weighted_score, &self.config.band_thresholds);

        let enforcement_probability = severity_class.enforcement_probability();
        let expected_penalty_inr =
            penalty_amount_inr.unwrap_or(Decimal::ZERO) * enforcement_probability;
        let discounted_penalty_inr = match deadline.days_remaining {
            Some(days) => {
                discount_days(expected_penalty_inr, self.config.financial.discount_rate, days)
            }
            None => expected_penalty_inr,
        };

        debug!(
            obligation = name,
            score = %weighted_score,
            band = ?risk_band,
            "scored obligation"
        );

        ObligationRisk {
            obligation_name: name.to_string(),
            severity_class,
            severity_score,
            penalty_score,
            deadline_score: deadline.score,
            frequency_score,
            weighted_score,
            risk_band,
            days_remaining: deadline.days_remaining,
            urgency_decay: urgency_decay(deadline.days_remaining),
            enforcement_probability,
            penalty_amount_inr,
            expected_penalty_inr,
            discounted_penalty_inr,
            remediation_hint: risk_band.remediation_hint(name),
            synthetic: false,
        }
    }

    /// A compliance action with no matching obligation, scored with its
    /// priority as the severity proxy and neutral values elsewhere.
    pub fn score_action(&self, action: &ComplianceAction) -> ObligationRisk {
        let name = action.action.trim();
        let severity_score = priority_severity(&action.priority);
        let weighted_score = self.weighted(
            severity_score,
            DEFAULT_PENALTY_SCORE,
            UNKNOWN_DEADLINE_SCORE,
            SYNTHETIC_FREQUENCY_SCORE,
        );
        let risk_band = RiskBand::from_score(weighted_score, &self.config.band_thresholds);

        ObligationRisk {
            obligation_name: name.to_string(),
            severity_class: SeverityClass::Unspecified,
            severity_score,
            penalty_score: DEFAULT_PENALTY_SCORE,
            deadline_score: UNKNOWN_DEADLINE_SCORE,
            frequency_score: SYNTHETIC_FREQUENCY_SCORE,
            weighted_score,
            risk_band,
            days_remaining: None,
            urgency_decay: None,
            enforcement_probability: SeverityClass::Unspecified.enforcement_probability(),
            penalty_amount_inr: None,
            expected_penalty_inr: Decimal::ZERO,
            discounted_penalty_inr: Decimal::ZERO,
            remediation_hint: risk_band.remediation_hint(name),
            synthetic: true,
        }
    }
}
