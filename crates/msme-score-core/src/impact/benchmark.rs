//! Heuristic sector comparison. Percentiles are a tanh approximation around
//! a sector-neutral impact of 50, not a fitted distribution.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::benchmarks::SectorBaseline;
use crate::currency::format_inr;
use crate::math::{clamp, safe_div, tanh};
use crate::profile::Sector;
use crate::types::{Money, Score};

const PERCENTILE_SPREAD: Decimal = dec!(20);
const MIN_DIGITAL_ADOPTION: Decimal = dec!(0.01);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorComparison {
    pub sector: Sector,
    /// Estimated percentile among sector peers, in [1, 99]
    pub percentile: Score,
    pub vs_avg_risk: String,
    pub vs_avg_cost: String,
    pub vs_avg_penalties: String,
    pub digital_maturity_boost: String,
}

/// clamp(50 + 50 tanh((impact - 50) / 20), 1, 99)
pub fn sector_percentile(impact_score: Score) -> Score {
    let deviation = (impact_score - dec!(50)) / PERCENTILE_SPREAD;
    clamp(dec!(50) + dec!(50) * tanh(deviation), Decimal::ONE, dec!(99))
}

pub fn sector_comparison(
    sector: Sector,
    baseline: &SectorBaseline,
    impact_score: Score,
    risk_reduction: Score,
    cost_saved: Money,
    penalties_avoided: Money,
) -> SectorComparison {
    let residual_risk = dec!(100) - risk_reduction;
    let risk_diff = (safe_div(baseline.avg_risk_score - residual_risk, baseline.avg_risk_score)
        * dec!(100))
    .round()
    .max(Decimal::ZERO);
    let cost_diff = (safe_div(cost_saved, baseline.avg_compliance_cost_inr) * dec!(100))
        .min(dec!(99))
        .round();
    let digital_boost = (Decimal::ONE / baseline.digital_adoption.max(MIN_DIGITAL_ADOPTION)).round_dp(1);

    SectorComparison {
        sector,
        percentile: sector_percentile(impact_score),
        vs_avg_risk: format!("{risk_diff}% lower compliance risk than {sector} sector average"),
        vs_avg_cost: format!("{cost_diff}% less compliance cost than traditional methods"),
        vs_avg_penalties: format!(
            "{} in penalties prevented (sector avg: {}/yr)",
            format_inr(penalties_avoided),
            format_inr(baseline.avg_penalties_year_inr)
        ),
        digital_maturity_boost: format!(
            "{}x more digitally mature than sector average",
            digital_boost.normalize()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::sector_baseline;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_neutral_impact_is_median() {
        assert_eq!(sector_percentile(dec!(50)), dec!(50));
    }

    #[test]
    fn test_percentile_bounds_and_order() {
        assert_eq!(sector_percentile(Decimal::ZERO), Decimal::ONE);
        assert_eq!(sector_percentile(dec!(100)), dec!(99));
        assert!(sector_percentile(dec!(60)) > dec!(50));
        assert!(sector_percentile(dec!(40)) < dec!(50));
        assert!(sector_percentile(dec!(70)) > sector_percentile(dec!(60)));
    }

    #[test]
    fn test_comparison_strings() {
        let base = sector_baseline(Sector::Manufacturing);
        let c = sector_comparison(
            Sector::Manufacturing,
            &base,
            dec!(50),
            dec!(90),
            dec!(4_950),
            dec!(150_000),
        );
        // (62 - 10) / 62 -> 84%
        assert_eq!(c.vs_avg_risk, "84% lower compliance risk than manufacturing sector average");
        assert_eq!(c.vs_avg_cost, "6% less compliance cost than traditional methods");
        assert_eq!(
            c.vs_avg_penalties,
            "₹1,50,000 in penalties prevented (sector avg: ₹1,50,000/yr)"
        );
        assert_eq!(c.digital_maturity_boost, "2.9x more digitally mature than sector average");
    }

    #[test]
    fn test_risk_gap_floors_at_zero() {
        let base = sector_baseline(Sector::Service);
        let c = sector_comparison(Sector::Service, &base, dec!(10), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(c.vs_avg_risk, "0% lower compliance risk than service sector average");
    }
}
