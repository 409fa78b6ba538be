//! Guarded Decimal maths used by the scoring models.
//!
//! Every function here is total: logarithms of non-positive arguments
//! return zero and exponent overflow saturates, so no scoring path can
//! panic or produce a non-finite value.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::Score;

pub const SCORE_MIN: Decimal = dec!(0);
pub const SCORE_MAX: Decimal = dec!(100);

const LN_2: Decimal = dec!(0.6931471805599453094172321215);

/// Beyond this magnitude tanh is 1 to full Decimal precision.
const TANH_SATURATION: Decimal = dec!(30);

/// Clamp a score into [0, 100].
pub fn clamp_score(score: Decimal) -> Score {
    clamp(score, SCORE_MIN, SCORE_MAX)
}

pub fn clamp(value: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// e^x. Negative arguments that underflow return 0; positive overflow
/// saturates at `Decimal::MAX`.
pub fn exp(x: Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::ONE;
    }
    if x.is_sign_negative() {
        return match exp_positive(-x) {
            Some(v) if !v.is_zero() => Decimal::ONE / v,
            _ => Decimal::ZERO,
        };
    }
    exp_positive(x).unwrap_or(Decimal::MAX)
}

/// Range-reduced e^x for x > 0: e^x = (e^(x / 2^k))^(2^k) with x / 2^k <= 1,
/// so the series only ever runs where it converges quickly.
fn exp_positive(x: Decimal) -> Option<Decimal> {
    let mut reduced = x;
    let mut squarings = 0u32;
    while reduced > Decimal::ONE {
        reduced /= dec!(2);
        squarings += 1;
    }
    let mut value = reduced.checked_exp()?;
    for _ in 0..squarings {
        value = value.checked_mul(value)?;
    }
    Some(value)
}

/// Natural logarithm; 0 for x <= 0.
pub fn ln(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if x == Decimal::ONE {
        return Decimal::ZERO;
    }
    x.checked_ln().unwrap_or(Decimal::ZERO)
}

/// Base-10 logarithm; 0 for x <= 0.
pub fn log10(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO || x == Decimal::ONE {
        return Decimal::ZERO;
    }
    x.checked_log10().unwrap_or(Decimal::ZERO)
}

/// Base-2 logarithm; 0 for x <= 0.
pub fn log2(x: Decimal) -> Decimal {
    ln(x) / LN_2
}

/// Hyperbolic tangent via (e^2x - 1) / (e^2x + 1).
pub fn tanh(x: Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::ZERO;
    }
    if x >= TANH_SATURATION {
        return Decimal::ONE;
    }
    if x <= -TANH_SATURATION {
        return -Decimal::ONE;
    }
    let e2x = exp(x * dec!(2));
    (e2x - Decimal::ONE) / (e2x + Decimal::ONE)
}

/// Logistic function 1 / (1 + e^-x).
pub fn sigmoid(x: Decimal) -> Decimal {
    Decimal::ONE / (Decimal::ONE + exp(-x))
}

/// base^n for a non-negative integer exponent via iterative multiplication.
/// `None` once the power leaves the Decimal range.
pub fn checked_pow(base: Decimal, n: u32) -> Option<Decimal> {
    (0..n).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(base))
}

/// Sum that yields `None` on overflow.
pub fn checked_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Option<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Sum pinned at the Decimal bounds instead of overflowing.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// base^exponent for a positive base and arbitrary Decimal exponent, via
/// exp(exponent * ln(base)).
pub fn pow_frac(base: Decimal, exponent: Decimal) -> Decimal {
    if exponent.is_zero() || base == Decimal::ONE {
        return Decimal::ONE;
    }
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    exp(exponent * ln(base))
}

/// `k * log10(1 + x)` capped at 100; 0 for non-positive x.
pub fn log_scaled(x: Decimal, k: Decimal) -> Score {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    clamp_score(k * log10(Decimal::ONE + x))
}

/// Division that yields zero instead of failing when the denominator is zero.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_exp_basic_values() {
        assert_eq!(exp(Decimal::ZERO), Decimal::ONE);
        assert!(close(exp(Decimal::ONE), dec!(2.718281828459045), dec!(0.0000001)));
        assert!(close(exp(dec!(-1)), dec!(0.36787944117144233), dec!(0.0000001)));
    }

    #[test]
    fn test_exp_extreme_arguments_do_not_panic() {
        assert_eq!(exp(dec!(-5000)), Decimal::ZERO);
        assert_eq!(exp(dec!(5000)), Decimal::MAX);
    }

    #[test]
    fn test_logs_guard_non_positive() {
        assert_eq!(ln(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ln(dec!(-3)), Decimal::ZERO);
        assert_eq!(log10(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(log2(dec!(-1)), Decimal::ZERO);
    }

    #[test]
    fn test_log2_of_powers_of_two() {
        assert!(close(log2(dec!(8)), dec!(3), dec!(0.0000001)));
        assert!(close(log2(dec!(2)), dec!(1), dec!(0.0000001)));
    }

    #[test]
    fn test_log10_values() {
        assert!(close(log10(dec!(100)), dec!(2), dec!(0.0000001)));
        assert!(close(log10(dec!(1000)), dec!(3), dec!(0.0000001)));
    }

    #[test]
    fn test_tanh_symmetry_and_saturation() {
        assert_eq!(tanh(Decimal::ZERO), Decimal::ZERO);
        assert!(close(tanh(dec!(0.5)), dec!(0.46211715726), dec!(0.0000001)));
        assert!(close(tanh(dec!(-0.5)), dec!(-0.46211715726), dec!(0.0000001)));
        assert_eq!(tanh(dec!(100)), Decimal::ONE);
        assert_eq!(tanh(dec!(-100)), -Decimal::ONE);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert_eq!(sigmoid(Decimal::ZERO), dec!(0.5));
        assert!(close(sigmoid(dec!(2)), dec!(0.88079707797), dec!(0.0000001)));
    }

    #[test]
    fn test_pow_frac_matches_integer_power() {
        let frac = pow_frac(dec!(1.10), dec!(3));
        let int = checked_pow(dec!(1.10), 3).unwrap();
        assert!(close(frac, int, dec!(0.0000001)));
    }

    #[test]
    fn test_checked_pow_overflow() {
        assert_eq!(checked_pow(dec!(2), 10), Some(dec!(1024)));
        assert_eq!(checked_pow(dec!(10), 0), Some(Decimal::ONE));
        assert_eq!(checked_pow(dec!(10), 40), None);
    }

    #[test]
    fn test_sums_at_the_decimal_bound() {
        let huge = dec!(50_000_000_000_000_000_000_000_000_000);
        assert_eq!(checked_sum([huge, huge]), None);
        assert_eq!(checked_sum([dec!(1), dec!(2)]), Some(dec!(3)));
        assert_eq!(saturating_sum([huge, huge]), Decimal::MAX);
    }

    #[test]
    fn test_log_scaled_zero_and_cap() {
        assert_eq!(log_scaled(Decimal::ZERO, dec!(30)), Decimal::ZERO);
        assert_eq!(log_scaled(dec!(1_000_000_000_000), dec!(30)), dec!(100));
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(5), dec!(2)), dec!(2.5));
    }
}
