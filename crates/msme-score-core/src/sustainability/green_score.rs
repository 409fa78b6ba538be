use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::SustainabilityAssumptions;
use crate::math::{clamp_score, log2, safe_div};
use crate::sustainability::footprint::{CarbonSavings, EfficiencyGains, PaperSavings};
use crate::types::Score;

/// Documents an MSME typically handles per year.
pub const BENCHMARK_YEARLY_DOCUMENTS: Decimal = dec!(12);

const PAPER_WEIGHT: Decimal = dec!(0.30);
const CARBON_WEIGHT: Decimal = dec!(0.30);
const EFFICIENCY_WEIGHT: Decimal = dec!(0.25);
const SCALE_WEIGHT: Decimal = dec!(0.15);

/// A 16x productivity multiplier earns the full efficiency score.
const EFFICIENCY_POINTS_PER_MULTIPLE: Decimal = dec!(6.25);
const SCALE_POINTS_PER_DOUBLING: Decimal = dec!(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GreenGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl GreenGrade {
    pub fn from_score(score: Score) -> Self {
        if score >= dec!(90) {
            GreenGrade::APlus
        } else if score >= dec!(75) {
            GreenGrade::A
        } else if score >= dec!(60) {
            GreenGrade::B
        } else if score >= dec!(40) {
            GreenGrade::C
        } else {
            GreenGrade::D
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GreenGrade::APlus => "A+",
            GreenGrade::A => "A",
            GreenGrade::B => "B",
            GreenGrade::C => "C",
            GreenGrade::D => "D",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GreenScoreBreakdown {
    pub paper: Score,
    pub carbon: Score,
    pub efficiency: Score,
    pub scale_bonus: Score,
}

impl GreenScoreBreakdown {
    pub fn weighted(&self) -> Score {
        clamp_score(
            PAPER_WEIGHT * self.paper
                + CARBON_WEIGHT * self.carbon
                + EFFICIENCY_WEIGHT * self.efficiency
                + SCALE_WEIGHT * self.scale_bonus,
        )
    }
}

/// Sub-scores against a year of typical document handling.
pub fn green_breakdown(
    paper: &PaperSavings,
    carbon: &CarbonSavings,
    efficiency: &EfficiencyGains,
    documents: u32,
    a: &SustainabilityAssumptions,
) -> GreenScoreBreakdown {
    let paper_benchmark = a.paper_pages_per_document * BENCHMARK_YEARLY_DOCUMENTS;
    let carbon_benchmark =
        a.avg_consultant_travel_km * BENCHMARK_YEARLY_DOCUMENTS * a.co2_per_km_kg;

    GreenScoreBreakdown {
        paper: clamp_score(safe_div(paper.pages_saved, paper_benchmark) * dec!(100)),
        carbon: clamp_score(safe_div(carbon.net_co2_saved_kg, carbon_benchmark) * dec!(100)),
        efficiency: clamp_score(efficiency.productivity_multiplier * EFFICIENCY_POINTS_PER_MULTIPLE),
        scale_bonus: scale_bonus(documents),
    }
}

/// min(100, log2(count + 1) x 25)
pub fn scale_bonus(documents: u32) -> Score {
    clamp_score(log2(Decimal::from(documents) + Decimal::ONE) * SCALE_POINTS_PER_DOUBLING)
}
