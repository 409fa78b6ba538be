//! Parsing of free-text Indian currency amounts ("Rs. 5 lakh", "₹1.2 crore",
//! "up to 50,000") into INR.
//!
//! Rules are tried in table order and the first one that matches anywhere
//! in the text wins, so "Rs 50,000 or 1 crore" resolves to the crore
//! figure. The table is compiled once per process.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MsmeScoreError;
use crate::types::Money;
use crate::MsmeScoreResult;

pub const CRORE: Decimal = dec!(10_000_000);
pub const LAKH: Decimal = dec!(100_000);
pub const THOUSAND: Decimal = dec!(1_000);

/// One row of the unit table: a pattern whose first capture group is the
/// numeric part, and the multiplier applied to it.
struct AmountRule {
    pattern: &'static str,
    multiplier: Decimal,
}

const AMOUNT_RULES: &[AmountRule] = &[
    AmountRule {
        pattern: r"(\d+(?:\.\d+)?)\s*(?:crores?|cr)\b",
        multiplier: CRORE,
    },
    AmountRule {
        pattern: r"(\d+(?:\.\d+)?)\s*(?:lakhs?|lacs?|l)\b",
        multiplier: LAKH,
    },
    AmountRule {
        pattern: r"(\d+(?:\.\d+)?)\s*(?:thousands?|k)\b",
        multiplier: THOUSAND,
    },
    AmountRule {
        pattern: r"(?:rs\.?|inr|₹)\s*(\d+(?:\.\d+)?)",
        multiplier: Decimal::ONE,
    },
    AmountRule {
        pattern: r"(\d+(?:\.\d+)?)",
        multiplier: Decimal::ONE,
    },
];

fn compiled_rules() -> &'static [(Regex, Decimal)] {
    static RULES: OnceLock<Vec<(Regex, Decimal)>> = OnceLock::new();
    RULES.get_or_init(|| {
        AMOUNT_RULES
            .iter()
            .filter_map(|rule| Regex::new(rule.pattern).ok().map(|re| (re, rule.multiplier)))
            .collect()
    })
}

/// Parse a free-text amount to INR.
///
/// Thousands separators (Indian or Western grouping) are ignored. Text with
/// no recognisable number yields `UnparseableAmount`.
pub fn parse_inr(text: &str) -> MsmeScoreResult<Money> {
    let normalised = text.to_lowercase().replace(',', "");
    if normalised.trim().is_empty() {
        return Err(MsmeScoreError::UnparseableAmount(text.to_string()));
    }

    for (re, multiplier) in compiled_rules() {
        if let Some(caps) = re.captures(&normalised) {
            let number = caps
                .get(1)
                .and_then(|m| Decimal::from_str(m.as_str()).ok())
                .ok_or_else(|| MsmeScoreError::UnparseableAmount(text.to_string()))?;
            return number
                .checked_mul(*multiplier)
                .ok_or_else(|| MsmeScoreError::UnparseableAmount(text.to_string()));
        }
    }

    Err(MsmeScoreError::UnparseableAmount(text.to_string()))
}

/// Format an INR amount with Indian digit grouping, e.g. ₹12,34,567.
pub fn format_inr(amount: Money) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        if end > 0 {
            groups.push(&head[..end]);
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary text never panics the parser.
        #[test]
        fn parse_never_panics(text in "\\PC{0,64}") {
            let _ = parse_inr(&text);
        }

        /// A bare integer parses to itself regardless of grouping commas.
        #[test]
        fn bare_integer_round_trips(n in 0u64..10_000_000_000u64) {
            let plain = n.to_string();
            prop_assert_eq!(parse_inr(&plain).unwrap(), Decimal::from(n));
            let grouped = format_inr(Decimal::from(n)).replace('₹', "");
            prop_assert_eq!(parse_inr(&grouped).unwrap(), Decimal::from(n));
        }

        /// Lakh amounts are exactly 1e5 times the stated figure.
        #[test]
        fn lakh_multiplier_is_exact(n in 1u32..100_000u32) {
            let text = format!("Rs. {n} lakh");
            prop_assert_eq!(parse_inr(&text).unwrap(), Decimal::from(n) * LAKH);
        }

        /// Parsed amounts are never negative.
        #[test]
        fn parsed_amount_non_negative(text in "[a-z0-9 ,.]{0,40}") {
            if let Ok(amount) = parse_inr(&text) {
                prop_assert!(amount >= Decimal::ZERO);
            }
        }
    }
}
