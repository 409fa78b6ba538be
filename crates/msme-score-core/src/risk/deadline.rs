use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::classify::classify_deadline_phrase;
use crate::error::MsmeScoreError;
use crate::math::exp;
use crate::types::Score;
use crate::MsmeScoreResult;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%B %d, %Y", "%d %B %Y"];

/// Score for a deadline that is present but neither a date nor a known phrase.
pub const UNKNOWN_DEADLINE_SCORE: Score = dec!(40);

const DECAY_RATE: Decimal = dec!(0.033);

/// Upper day bound (inclusive) and the urgency score for that bracket.
const URGENCY_BRACKETS: &[(i64, Score)] = &[
    (7, dec!(95)),
    (14, dec!(85)),
    (30, dec!(70)),
    (60, dec!(50)),
    (90, dec!(35)),
    (180, dec!(20)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineSource {
    Date,
    Phrase,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineAssessment {
    pub score: Score,
    pub days_remaining: Option<i64>,
    pub source: DeadlineSource,
}

/// Parse a deadline written in one of the accepted calendar formats.
pub fn parse_deadline_date(text: &str) -> MsmeScoreResult<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| MsmeScoreError::UnparseableDate(text.to_string()))
}

/// Urgency for a known day count: overdue is 100, then stepped brackets
/// down to 10 beyond six months.
pub fn score_for_days(days: i64) -> Score {
    if days < 0 {
        return dec!(100);
    }
    URGENCY_BRACKETS
        .iter()
        .find(|(limit, _)| days <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(dec!(10))
}

/// Calendar date first, then phrase heuristics, then the neutral default.
pub fn assess_deadline(text: &str, today: NaiveDate) -> DeadlineAssessment {
    if text.trim().is_empty() {
        return DeadlineAssessment {
            score: UNKNOWN_DEADLINE_SCORE,
            days_remaining: None,
            source: DeadlineSource::Unknown,
        };
    }

    if let Ok(date) = parse_deadline_date(text) {
        let days = (date - today).num_days();
        return DeadlineAssessment {
            score: score_for_days(days),
            days_remaining: Some(days),
            source: DeadlineSource::Date,
        };
    }

    match classify_deadline_phrase(text) {
        Some(hint) => DeadlineAssessment {
            score: hint.score,
            days_remaining: Some(hint.days),
            source: DeadlineSource::Phrase,
        },
        None => DeadlineAssessment {
            score: UNKNOWN_DEADLINE_SCORE,
            days_remaining: None,
            source: DeadlineSource::Unknown,
        },
    }
}

/// 100 * e^(-0.033 * days); 100 once overdue, `None` when days are unknown.
pub fn urgency_decay(days: Option<i64>) -> Option<Score> {
    days.map(|d| {
        if d < 0 {
            dec!(100)
        } else {
            dec!(100) * exp(-DECAY_RATE * Decimal::from(d))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        for text in ["2025-03-31", "31/03/2025", "31-03-2025", "March 31, 2025", "31 March 2025"] {
            assert_eq!(parse_deadline_date(text).unwrap(), expected, "{text}");
        }
        assert!(matches!(
            parse_deadline_date("end of quarter"),
            Err(MsmeScoreError::UnparseableDate(_))
        ));
    }

    #[test]
    fn test_brackets() {
        assert_eq!(score_for_days(-1), dec!(100));
        assert_eq!(score_for_days(0), dec!(95));
        assert_eq!(score_for_days(7), dec!(95));
        assert_eq!(score_for_days(8), dec!(85));
        assert_eq!(score_for_days(30), dec!(70));
        assert_eq!(score_for_days(60), dec!(50));
        assert_eq!(score_for_days(90), dec!(35));
        assert_eq!(score_for_days(180), dec!(20));
        assert_eq!(score_for_days(181), dec!(10));
    }

    #[test]
    fn test_assess_date_relative_to_today() {
        let a = assess_deadline("2025-01-12", today());
        assert_eq!(a.days_remaining, Some(2));
        assert_eq!(a.score, dec!(95));
        assert_eq!(a.source, DeadlineSource::Date);

        let overdue = assess_deadline("01/01/2025", today());
        assert_eq!(overdue.days_remaining, Some(-9));
        assert_eq!(overdue.score, dec!(100));
    }

    #[test]
    fn test_assess_phrase_and_unknown() {
        let a = assess_deadline("within 30 days", today());
        assert_eq!((a.score, a.days_remaining), (dec!(65), Some(30)));
        assert_eq!(a.source, DeadlineSource::Phrase);

        let u = assess_deadline("as notified by the board", today());
        assert_eq!((u.score, u.days_remaining), (dec!(40), None));

        let empty = assess_deadline("", today());
        assert_eq!((empty.score, empty.days_remaining), (dec!(40), None));
    }

    #[test]
    fn test_urgency_decay() {
        assert_eq!(urgency_decay(None), None);
        assert_eq!(urgency_decay(Some(-3)), Some(dec!(100)));
        assert_eq!(urgency_decay(Some(0)), Some(dec!(100)));
        let d30 = urgency_decay(Some(30)).unwrap();
        // e^-0.99 = 0.3716
        assert!((d30 - dec!(37.158)).abs() < dec!(0.01));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Earlier non-negative deadlines are never less urgent than later ones.
        #[test]
        fn deadline_score_monotone(a in 0i64..2000, b in 0i64..2000) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score_for_days(near) >= score_for_days(far));
        }

        /// Every overdue deadline scores 100.
        #[test]
        fn overdue_is_max(days in -5000i64..0) {
            prop_assert_eq!(score_for_days(days), dec!(100));
        }

        /// Decay stays within [0, 100].
        #[test]
        fn decay_bounded(days in -400i64..5000) {
            let d = urgency_decay(Some(days)).unwrap();
            prop_assert!(d >= Decimal::ZERO && d <= dec!(100));
        }
    }
}
