//! Cost comparison, multi-year NPV projection and break-even timing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::FinancialAssumptions;
use crate::error::MsmeScoreError;
use crate::math::safe_div;
use crate::time_value::{discount, grow};
use crate::types::{Money, Multiple};
use crate::MsmeScoreResult;

const TRADITIONAL_HOURLY_RATE_INR: Money = dec!(2_500);
const TRADITIONAL_HOURS_PER_ITEM: Decimal = dec!(10);
const PLATFORM_COST_PER_ITEM_INR: Money = dec!(50);
const PLATFORM_HOURS_PER_ITEM: Decimal = dec!(0.5);
const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Cost comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub items: u32,
    pub traditional_hours: Decimal,
    pub traditional_cost_inr: Money,
    pub platform_hours: Decimal,
    pub platform_cost_inr: Money,
    pub savings_inr: Money,
    pub savings_percent: Decimal,
    pub hours_saved: Decimal,
}

/// Consultant-driven handling vs platform handling of `items` documents and
/// scheme applications.
pub fn cost_comparison(items: u32) -> CostComparison {
    let n = Decimal::from(items);
    let traditional_hours = TRADITIONAL_HOURS_PER_ITEM * n;
    let traditional_cost = TRADITIONAL_HOURLY_RATE_INR * traditional_hours;
    let platform_hours = PLATFORM_HOURS_PER_ITEM * n;
    let platform_cost = PLATFORM_COST_PER_ITEM_INR * n;
    let savings = traditional_cost - platform_cost;

    CostComparison {
        items,
        traditional_hours,
        traditional_cost_inr: traditional_cost,
        platform_hours,
        platform_cost_inr: platform_cost,
        savings_inr: savings,
        savings_percent: safe_div(savings, traditional_cost) * dec!(100),
        hours_saved: traditional_hours - platform_hours,
    }
}

// ---------------------------------------------------------------------------
// NPV projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub gross_benefit_inr: Money,
    pub discounted_benefit_inr: Money,
    pub cumulative_npv_inr: Money,
    /// cumulative NPV / subscription paid to date
    pub roi_multiplier: Multiple,
}

/// Gross benefit of `year` (1-based): the base grows from year 2 onwards.
pub fn gross_benefit(base_yearly: Money, growth_rate: Decimal, year: u32) -> MsmeScoreResult<Money> {
    grow(base_yearly, growth_rate, year.saturating_sub(1))
}

pub fn project_npv(
    base_yearly: Money,
    assumptions: &FinancialAssumptions,
) -> MsmeScoreResult<Vec<YearlyProjection>> {
    let mut cumulative = Decimal::ZERO;
    let mut rows = Vec::with_capacity(assumptions.projection_years as usize);
    for year in 1..=assumptions.projection_years {
        let gross = gross_benefit(base_yearly, assumptions.growth_rate, year)?;
        let discounted = discount(gross, assumptions.discount_rate, year)?;
        cumulative = cumulative
            .checked_add(discounted)
            .ok_or_else(|| MsmeScoreError::out_of_range("cumulative_npv_inr"))?;
        let paid = assumptions
            .subscription_cost_inr
            .saturating_mul(Decimal::from(year));
        rows.push(YearlyProjection {
            year,
            gross_benefit_inr: gross,
            discounted_benefit_inr: discounted,
            cumulative_npv_inr: cumulative,
            roi_multiplier: safe_div(cumulative, paid),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "month", rename_all = "snake_case")]
pub enum BreakEven {
    AtMonth(u32),
    Never,
}

impl BreakEven {
    pub fn month(self) -> Option<u32> {
        match self {
            BreakEven::AtMonth(m) => Some(m),
            BreakEven::Never => None,
        }
    }
}

/// First month whose cumulative benefit covers the cumulative subscription
/// cost. Month `m` earns one twelfth of the gross benefit of year
/// ⌈m/12⌉. A month-1 benefit at least equal to the monthly cost breaks
/// even immediately; nothing within the horizon is `Never`.
pub fn break_even(
    base_yearly: Money,
    assumptions: &FinancialAssumptions,
) -> MsmeScoreResult<BreakEven> {
    let monthly_cost = assumptions.subscription_cost_inr / MONTHS_PER_YEAR;
    let mut benefit = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    for month in 1..=assumptions.break_even_horizon_months {
        let year = month.div_ceil(12);
        let earned = gross_benefit(base_yearly, assumptions.growth_rate, year)? / MONTHS_PER_YEAR;
        benefit = benefit
            .checked_add(earned)
            .ok_or_else(|| MsmeScoreError::out_of_range("break_even"))?;
        cost = cost.saturating_add(monthly_cost);
        if benefit >= cost {
            return Ok(BreakEven::AtMonth(month));
        }
    }
    Ok(BreakEven::Never)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::MathematicalOps;

    #[test]
    fn test_cost_comparison() {
        let c = cost_comparison(4);
        assert_eq!(c.traditional_hours, dec!(40));
        assert_eq!(c.traditional_cost_inr, dec!(100_000));
        assert_eq!(c.platform_cost_inr, dec!(200));
        assert_eq!(c.savings_inr, dec!(99_800));
        assert_eq!(c.savings_percent, dec!(99.8));
        assert_eq!(c.hours_saved, dec!(38));
    }

    #[test]
    fn test_cost_comparison_empty() {
        assert_eq!(cost_comparison(0), CostComparison::default());
    }

    #[test]
    fn test_npv_matches_closed_form() {
        let a = FinancialAssumptions::default();
        let base = dec!(120_000);
        let rows = project_npv(base, &a).unwrap();
        assert_eq!(rows.len(), 5);

        let expected: Decimal = (1..=5u32)
            .map(|y| {
                let gross = base * dec!(1.15).powu(u64::from(y - 1));
                gross / dec!(1.10).powu(u64::from(y))
            })
            .sum();
        let diff = (rows[4].cumulative_npv_inr - expected).abs();
        assert!(diff < dec!(0.000001), "diff {diff}");
        assert_eq!(rows[0].gross_benefit_inr, base);
        assert_eq!(rows[0].roi_multiplier, rows[0].cumulative_npv_inr / dec!(12000));
    }

    #[test]
    fn test_break_even_immediate() {
        let a = FinancialAssumptions::default();
        assert_eq!(break_even(dec!(12_000), &a).unwrap(), BreakEven::AtMonth(1));
    }

    #[test]
    fn test_break_even_never() {
        let a = FinancialAssumptions::default();
        assert_eq!(break_even(Decimal::ZERO, &a).unwrap(), BreakEven::Never);
        assert_eq!(BreakEven::Never.month(), None);
    }

    #[test]
    fn test_break_even_on_horizon_is_not_never() {
        let flat = FinancialAssumptions {
            growth_rate: Decimal::ZERO,
            ..Default::default()
        };
        assert_eq!(break_even(dec!(11_999), &flat).unwrap(), BreakEven::Never);

        let doubling = FinancialAssumptions {
            growth_rate: dec!(1.0),
            break_even_horizon_months: 13,
            ..Default::default()
        };
        // year 1 leaves a 6000 deficit; month 13 earns exactly its cost
        assert_eq!(break_even(dec!(6_000), &doubling).unwrap(), BreakEven::Never);
        // year 1 leaves a 500 deficit; month 13 earns 23000 / 12
        assert_eq!(break_even(dec!(11_500), &doubling).unwrap(), BreakEven::AtMonth(13));
    }

    #[test]
    fn test_projection_out_of_range_is_an_error() {
        let a = FinancialAssumptions::default();
        let huge = dec!(70_000_000_000_000_000_000_000_000_000);
        // year 2 grows past the Decimal range
        assert!(matches!(
            project_npv(huge, &a),
            Err(MsmeScoreError::InvalidInput { .. })
        ));
        // month 1 alone covers the cost, so growth is never reached
        assert_eq!(break_even(huge, &a).unwrap(), BreakEven::AtMonth(1));
    }

    #[test]
    fn test_break_even_serialization() {
        let json = serde_json::to_value(BreakEven::AtMonth(60)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "at_month", "month": 60}));
        let json = serde_json::to_value(BreakEven::Never).unwrap();
        assert_eq!(json, serde_json::json!({"status": "never"}));
    }
}
