//! Five normalised impact dimensions and their weighted composite.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::benchmarks::SectorBaseline;
use crate::math::{clamp, clamp_score, log_scaled, safe_div, sigmoid};
use crate::types::{Money, Score};

pub const RISK_WEIGHT: Decimal = dec!(0.30);
pub const PROFIT_WEIGHT: Decimal = dec!(0.25);
pub const SUSTAINABILITY_WEIGHT: Decimal = dec!(0.20);
pub const TIME_WEIGHT: Decimal = dec!(0.15);
pub const COST_WEIGHT: Decimal = dec!(0.10);

/// Regional boosts are capped separately for risk reduction and for the
/// composite.
pub const RISK_REGIONAL_CAP: Decimal = dec!(1.2);
pub const COMPOSITE_REGIONAL_CAP: Decimal = dec!(1.15);

const RISK_CENTRE: Decimal = dec!(30);
const RISK_SPREAD: Decimal = dec!(15);
const SCHEME_BENEFIT_CEILING_INR: Money = dec!(5_000_000);
/// 8h traditional vs 0.5h digital per document
const MAX_HOURS_SAVED_PER_DOCUMENT: Decimal = dec!(7.5);
const PRODUCTIVITY_BONUS_CAP: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactGrade {
    Transformative,
    High,
    Moderate,
    Low,
    Minimal,
}

impl ImpactGrade {
    pub fn from_score(score: Score) -> Self {
        if score >= dec!(90) {
            ImpactGrade::Transformative
        } else if score >= dec!(75) {
            ImpactGrade::High
        } else if score >= dec!(55) {
            ImpactGrade::Moderate
        } else if score >= dec!(35) {
            ImpactGrade::Low
        } else {
            ImpactGrade::Minimal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpactGrade::Transformative => "TRANSFORMATIVE",
            ImpactGrade::High => "HIGH",
            ImpactGrade::Moderate => "MODERATE",
            ImpactGrade::Low => "LOW",
            ImpactGrade::Minimal => "MINIMAL",
        }
    }
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub compliance_risk_reduction: Score,
    pub profitability_gain: Score,
    pub sustainability_improvement: Score,
    pub time_saved: Score,
    pub cost_saved: Score,
}

impl ImpactBreakdown {
    /// Weighted sum before any regional adjustment.
    pub fn weighted(&self) -> Score {
        RISK_WEIGHT * self.compliance_risk_reduction
            + PROFIT_WEIGHT * self.profitability_gain
            + SUSTAINABILITY_WEIGHT * self.sustainability_improvement
            + TIME_WEIGHT * self.time_saved
            + COST_WEIGHT * self.cost_saved
    }
}

/// Composite after the capped regional boost, clamped to [0, 100].
pub fn regional_composite(weighted: Score, regional: Decimal) -> Score {
    clamp_score(weighted * regional.min(COMPOSITE_REGIONAL_CAP))
}

// ---------------------------------------------------------------------------
// Dimension scores
// ---------------------------------------------------------------------------

/// Logistic in the raw risk score, centred at 30. No identified risk means
/// nothing to mitigate.
pub fn risk_reduction_score(raw_risk: Score, regional: Decimal) -> Score {
    if raw_risk <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let x = (raw_risk - RISK_CENTRE) / RISK_SPREAD;
    clamp_score(sigmoid(x) * dec!(100) * regional.min(RISK_REGIONAL_CAP))
}

pub fn profitability_score(
    roi_multiplier: Decimal,
    penalty_avoidance: Money,
    scheme_benefits: Money,
    baseline: &SectorBaseline,
) -> Score {
    let roi = log_scaled(roi_multiplier, dec!(30));
    let penalty = clamp_score(safe_div(penalty_avoidance, baseline.avg_penalties_year_inr) * dec!(80));
    let scheme = clamp_score(scheme_benefits / SCHEME_BENEFIT_CEILING_INR * dec!(100));
    clamp_score(dec!(0.4) * roi + dec!(0.3) * penalty + dec!(0.3) * scheme)
}

pub fn sustainability_score(green_score: Score, co2_saved_kg: Decimal) -> Score {
    clamp_score(dec!(0.7) * clamp_score(green_score) + dec!(0.3) * log_scaled(co2_saved_kg, dec!(40)))
}

pub fn time_saved_score(hours_saved: Decimal, productivity_multiplier: Decimal, documents: u32) -> Score {
    let per_document = hours_saved / Decimal::from(documents.max(1));
    let base = per_document / MAX_HOURS_SAVED_PER_DOCUMENT * dec!(80);
    let bonus = clamp(
        (productivity_multiplier - Decimal::ONE) * dec!(4),
        Decimal::ZERO,
        PRODUCTIVITY_BONUS_CAP,
    );
    clamp_score(base + bonus)
}

/// Per-document saving against one month of the sector's typical
/// compliance spend.
pub fn cost_saved_score(cost_saved: Money, documents: u32, baseline: &SectorBaseline) -> Score {
    let per_document = cost_saved / Decimal::from(documents.max(1));
    let monthly_benchmark = baseline.avg_compliance_cost_inr / dec!(12);
    clamp_score(safe_div(per_document, monthly_benchmark) * dec!(80))
}
