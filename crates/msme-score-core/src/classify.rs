//! Ordered keyword classifiers for free-text policy fields.
//!
//! Each classifier is a rule table scanned top to bottom; the first rule
//! with any keyword contained in the lowercased text wins. Rule order is
//! part of the contract: "heavy fine" must hit `HeavyFine` before `Fine`.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Rate, Score};

/// One row of a classifier table.
pub struct KeywordRule<T: 'static> {
    pub keywords: &'static [&'static str],
    pub class: T,
}

/// First rule whose keyword list has a substring of `text` (case-insensitive).
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|rule| rule.class)
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityClass {
    Criminal,
    Suspension,
    HeavyFine,
    Fine,
    Warning,
    Unspecified,
}

pub const SEVERITY_RULES: &[KeywordRule<SeverityClass>] = &[
    KeywordRule {
        keywords: &["criminal", "imprison", "jail"],
        class: SeverityClass::Criminal,
    },
    KeywordRule {
        keywords: &["suspen", "revok", "cancel"],
        class: SeverityClass::Suspension,
    },
    KeywordRule {
        keywords: &["heavy", "lakh", "crore", "signific"],
        class: SeverityClass::HeavyFine,
    },
    KeywordRule {
        keywords: &["fine", "penal"],
        class: SeverityClass::Fine,
    },
    KeywordRule {
        keywords: &["warn", "notice"],
        class: SeverityClass::Warning,
    },
];

impl SeverityClass {
    pub fn classify(text: &str) -> Self {
        first_match(SEVERITY_RULES, text).unwrap_or(SeverityClass::Unspecified)
    }

    pub fn score(self) -> Score {
        match self {
            SeverityClass::Criminal => dec!(100),
            SeverityClass::Suspension => dec!(90),
            SeverityClass::HeavyFine => dec!(75),
            SeverityClass::Fine => dec!(55),
            SeverityClass::Warning => dec!(35),
            SeverityClass::Unspecified => dec!(25),
        }
    }

    /// Heuristic chance that the consequence is actually enforced.
    pub fn enforcement_probability(self) -> Rate {
        match self {
            SeverityClass::Criminal => dec!(0.90),
            SeverityClass::Suspension => dec!(0.80),
            SeverityClass::HeavyFine => dec!(0.70),
            SeverityClass::Fine => dec!(0.60),
            SeverityClass::Warning => dec!(0.50),
            SeverityClass::Unspecified => dec!(0.40),
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyClass {
    Continuous,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
    OneTime,
}

pub const FREQUENCY_RULES: &[KeywordRule<FrequencyClass>] = &[
    KeywordRule {
        keywords: &["daily", "continuous"],
        class: FrequencyClass::Continuous,
    },
    KeywordRule {
        keywords: &["week"],
        class: FrequencyClass::Weekly,
    },
    KeywordRule {
        keywords: &["month"],
        class: FrequencyClass::Monthly,
    },
    KeywordRule {
        keywords: &["quarter"],
        class: FrequencyClass::Quarterly,
    },
    KeywordRule {
        keywords: &["annual", "year"],
        class: FrequencyClass::Annual,
    },
];

impl FrequencyClass {
    pub fn classify(text: &str) -> Self {
        first_match(FREQUENCY_RULES, text).unwrap_or(FrequencyClass::OneTime)
    }

    pub fn score(self) -> Score {
        match self {
            FrequencyClass::Continuous => dec!(100),
            FrequencyClass::Weekly => dec!(85),
            FrequencyClass::Monthly => dec!(70),
            FrequencyClass::Quarterly => dec!(50),
            FrequencyClass::Annual => dec!(30),
            FrequencyClass::OneTime => dec!(10),
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline phrases (used when the deadline is not a calendar date)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineHint {
    pub score: Score,
    pub days: i64,
}

pub const DEADLINE_RULES: &[KeywordRule<DeadlineHint>] = &[
    KeywordRule {
        keywords: &["immediate", "urgent", "overdue", "asap"],
        class: DeadlineHint { score: dec!(95), days: 0 },
    },
    KeywordRule {
        keywords: &["within 7", "1 week"],
        class: DeadlineHint { score: dec!(85), days: 7 },
    },
    KeywordRule {
        keywords: &["within 30", "1 month"],
        class: DeadlineHint { score: dec!(65), days: 30 },
    },
    KeywordRule {
        keywords: &["within 90", "3 month", "quarter"],
        class: DeadlineHint { score: dec!(40), days: 90 },
    },
    KeywordRule {
        keywords: &["annual", "yearly", "before march"],
        class: DeadlineHint { score: dec!(25), days: 180 },
    },
];

pub fn classify_deadline_phrase(text: &str) -> Option<DeadlineHint> {
    first_match(DEADLINE_RULES, text)
}

// ---------------------------------------------------------------------------
// Penalty enforcement likelihood (from violation + consequence wording)
// ---------------------------------------------------------------------------

/// Whole-word patterns, scanned in order. Stems such as "scrutin" keep an
/// open right edge; short modal verbs like "may" must stand alone.
pub const ENFORCEMENT_PATTERNS: &[(&str, Rate)] = &[
    (r"\b(?:mandatory|compulsory|must|required by law)\b", dec!(0.85)),
    (r"\b(?:audit|inspection|scrutin)", dec!(0.70)),
    (r"\b(?:may|possible|discretion)\b", dec!(0.40)),
];

pub const DEFAULT_ENFORCEMENT_PROBABILITY: Rate = dec!(0.55);

fn enforcement_rules() -> &'static [(Regex, Rate)] {
    static RULES: OnceLock<Vec<(Regex, Rate)>> = OnceLock::new();
    RULES.get_or_init(|| {
        ENFORCEMENT_PATTERNS
            .iter()
            .filter_map(|(pattern, rate)| Regex::new(pattern).ok().map(|re| (re, *rate)))
            .collect()
    })
}

pub fn penalty_enforcement_probability(violation: &str, consequences: &str) -> Rate {
    let text = format!("{violation} {consequences}").to_lowercase();
    enforcement_rules()
        .iter()
        .find(|(re, _)| re.is_match(&text))
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_ENFORCEMENT_PROBABILITY)
}

// ---------------------------------------------------------------------------
// Penalty urgency (from the matched obligation's severity wording)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Critical,
    High,
    Medium,
}

pub const URGENCY_RULES: &[KeywordRule<Urgency>] = &[
    KeywordRule {
        keywords: &["imprison", "criminal", "heavy"],
        class: Urgency::Critical,
    },
    KeywordRule {
        keywords: &["suspen", "revok"],
        class: Urgency::High,
    },
];

pub fn classify_urgency(severity_text: &str) -> Urgency {
    first_match(URGENCY_RULES, severity_text).unwrap_or(Urgency::Medium)
}

// ---------------------------------------------------------------------------
// Action priority
// ---------------------------------------------------------------------------

/// Severity proxy for a compliance action with no matching obligation.
pub fn priority_severity(priority: &str) -> Score {
    match priority.trim().to_uppercase().as_str() {
        "HIGH" => dec!(75),
        "LOW" => dec!(20),
        _ => dec!(45),
    }
}
