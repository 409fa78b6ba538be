use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MsmeScoreError;
use crate::math::{checked_pow, pow_frac};
use crate::types::{Money, Rate};
use crate::MsmeScoreResult;

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Net Present Value of end-of-period cash flows: the first flow is
/// discounted by one full period.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> MsmeScoreResult<Money> {
    if rate <= dec!(-1) {
        return Err(MsmeScoreError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut result = Decimal::ZERO;

    for cf in cash_flows {
        discount = discount
            .checked_mul(one_plus_r)
            .ok_or_else(|| MsmeScoreError::out_of_range("rate"))?;
        result = cf
            .checked_div(discount)
            .and_then(|pv| result.checked_add(pv))
            .ok_or_else(|| MsmeScoreError::out_of_range("cash_flows"))?;
    }

    Ok(result)
}

/// Present value of a single amount received `periods` whole periods out.
pub fn discount(amount: Money, rate: Rate, periods: u32) -> MsmeScoreResult<Money> {
    let factor = checked_pow(Decimal::ONE + rate, periods)
        .ok_or_else(|| MsmeScoreError::out_of_range("discount_rate"))?;
    if factor.is_zero() {
        return Ok(Decimal::ZERO);
    }
    amount
        .checked_div(factor)
        .ok_or_else(|| MsmeScoreError::out_of_range("amount"))
}

/// Present value of an amount due in `days`, discounted at an annual rate
/// with fractional-year compounding. Non-positive day counts are not
/// discounted; a result beyond the Decimal range saturates.
pub fn discount_days(amount: Money, annual_rate: Rate, days: i64) -> Money {
    if days <= 0 {
        return amount;
    }
    let years = Decimal::from(days) / DAYS_PER_YEAR;
    let factor = pow_frac(Decimal::ONE + annual_rate, years);
    if factor.is_zero() {
        return amount;
    }
    amount.checked_div(factor).unwrap_or(Decimal::MAX)
}

/// Compound `base` forward by `periods` at `rate`.
pub fn grow(base: Money, rate: Rate, periods: u32) -> MsmeScoreResult<Money> {
    checked_pow(Decimal::ONE + rate, periods)
        .and_then(|factor| base.checked_mul(factor))
        .ok_or_else(|| MsmeScoreError::out_of_range("amount"))
}
