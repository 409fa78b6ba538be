use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::benchmarks::REGIONAL_STRICTNESS;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Read-only business context. Every field is optional on the wire; the
/// aliases accept the field names used by upstream onboarding payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(alias = "business_type")]
    pub sector: String,
    #[serde(alias = "location")]
    pub state: String,
    /// "micro" / "small" / "medium"
    #[serde(alias = "msme_category", alias = "enterprise_type")]
    pub size: String,
    #[serde(alias = "turnover", skip_serializing_if = "Option::is_none")]
    pub annual_turnover: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment: Option<Money>,
    pub owner_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_cost: Option<Money>,
    /// "urban" / "rural"
    pub location_type: String,
    pub is_new_unit: bool,
    pub has_udyam: bool,
}

// ---------------------------------------------------------------------------
// Sector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Manufacturing,
    Service,
    Trading,
    Handicraft,
    Other,
}

impl Sector {
    /// Resolve a free-text sector. Craft keywords are tested before trading
    /// so "traditional handloom" is not read as a trading business.
    pub fn resolve(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let has_any = |kws: &[&str]| kws.iter().any(|kw| lowered.contains(kw));
        let has_word = |word: &str| {
            lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        };

        if has_any(&["manufactur", "factory", "production"]) {
            Sector::Manufacturing
        } else if has_any(&["service", "consult", "software"]) || has_word("it") {
            Sector::Service
        } else if has_any(&["craft", "handloom", "artisan"]) {
            Sector::Handicraft
        } else if has_any(&["trad", "retail", "wholesale", "shop"]) {
            Sector::Trading
        } else {
            Sector::Other
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Sector::Manufacturing => "manufacturing",
            Sector::Service => "service",
            Sector::Trading => "trading",
            Sector::Handicraft => "handicraft",
            Sector::Other => "default",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Micro,
    Small,
    Medium,
}

const MICRO_TURNOVER_CEILING: Money = dec!(5_000_000);
const SMALL_TURNOVER_CEILING: Money = dec!(50_000_000);

impl SizeCategory {
    /// Declared category first, then turnover bands (< ₹50L micro,
    /// < ₹5Cr small). An unknown turnover counts as micro.
    pub fn resolve(declared: &str, turnover: Option<Money>) -> Self {
        let lowered = declared.to_lowercase();
        if lowered.contains("micro") {
            return SizeCategory::Micro;
        }
        if lowered.contains("medium") {
            return SizeCategory::Medium;
        }
        if lowered.contains("small") {
            return SizeCategory::Small;
        }
        let turnover = turnover.unwrap_or(Decimal::ZERO);
        if turnover < MICRO_TURNOVER_CEILING {
            SizeCategory::Micro
        } else if turnover < SMALL_TURNOVER_CEILING {
            SizeCategory::Small
        } else {
            SizeCategory::Medium
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Micro => "Micro",
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

/// Normalise a state name to a strictness-table key ("Tamil Nadu" ->
/// "tamil_nadu"). Exact key first, then containment either way; blank or
/// unknown states resolve to "default".
pub fn resolve_region(state: &str) -> &'static str {
    let normalised = state.trim().to_lowercase().replace(' ', "_");
    if normalised.is_empty() {
        return "default";
    }
    if let Some((key, _)) = REGIONAL_STRICTNESS.iter().find(|(k, _)| *k == normalised) {
        return *key;
    }
    REGIONAL_STRICTNESS
        .iter()
        .filter(|(k, _)| *k != "default")
        .find(|(k, _)| normalised.contains(k) || k.contains(normalised.as_str()))
        .map(|(k, _)| *k)
        .unwrap_or("default")
}

impl BusinessProfile {
    pub fn sector_class(&self) -> Sector {
        Sector::resolve(&self.sector)
    }

    pub fn region_key(&self) -> &'static str {
        resolve_region(&self.state)
    }

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::resolve(&self.size, self.annual_turnover)
    }

    pub fn display_name(&self) -> &str {
        match &self.business_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => "your business",
        }
    }

    /// SC / ST / women / minority owners qualify for the special rates.
    pub fn is_special_category(&self) -> bool {
        owner_matches(&self.owner_category, &["sc", "st", "women", "woman", "minority"])
    }

    pub fn is_sc_st(&self) -> bool {
        owner_matches(&self.owner_category, &["sc", "st"])
    }

    pub fn is_women_owned(&self) -> bool {
        owner_matches(&self.owner_category, &["women", "woman", "female"])
    }

    pub fn is_rural(&self) -> bool {
        self.location_type.to_lowercase().contains("rural")
    }
}

/// Category tokens are matched as whole words so "st" does not fire on
/// "standard".
fn owner_matches(category: &str, tokens: &[&str]) -> bool {
    let lowered = category.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| tokens.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sector_resolution() {
        assert_eq!(Sector::resolve("Manufacturing"), Sector::Manufacturing);
        assert_eq!(Sector::resolve("food production unit"), Sector::Manufacturing);
        assert_eq!(Sector::resolve("IT consulting"), Sector::Service);
        assert_eq!(Sector::resolve("IT"), Sector::Service);
        assert_eq!(Sector::resolve("Retail shop"), Sector::Trading);
        assert_eq!(Sector::resolve("traditional handloom"), Sector::Handicraft);
        assert_eq!(Sector::resolve("knitting"), Sector::Other);
        assert_eq!(Sector::resolve(""), Sector::Other);
    }

    #[test]
    fn test_region_resolution() {
        assert_eq!(resolve_region("Maharashtra"), "maharashtra");
        assert_eq!(resolve_region("Tamil Nadu"), "tamil_nadu");
        assert_eq!(resolve_region("New Delhi"), "delhi");
        assert_eq!(resolve_region(""), "default");
        assert_eq!(resolve_region("Atlantis"), "default");
    }

    #[test]
    fn test_size_resolution() {
        assert_eq!(SizeCategory::resolve("Micro", None), SizeCategory::Micro);
        assert_eq!(SizeCategory::resolve("MEDIUM", None), SizeCategory::Medium);
        assert_eq!(
            SizeCategory::resolve("", Some(dec!(2_000_000))),
            SizeCategory::Micro
        );
        assert_eq!(
            SizeCategory::resolve("", Some(dec!(10_000_000))),
            SizeCategory::Small
        );
        assert_eq!(
            SizeCategory::resolve("", Some(dec!(90_000_000))),
            SizeCategory::Medium
        );
        assert_eq!(SizeCategory::resolve("", None), SizeCategory::Micro);
    }

    #[test]
    fn test_profile_aliases() {
        let json = r#"{
            "business_type": "textile manufacturing",
            "location": "Gujarat",
            "enterprise_type": "small",
            "turnover": "4500000",
            "owner_category": "Women"
        }"#;
        let p: BusinessProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.sector_class(), Sector::Manufacturing);
        assert_eq!(p.region_key(), "gujarat");
        assert_eq!(p.size_category(), SizeCategory::Small);
        assert!(p.is_women_owned());
        assert!(p.is_special_category());
        assert_eq!(p.display_name(), "your business");
    }

    #[test]
    fn test_owner_category_whole_words() {
        let p = BusinessProfile {
            owner_category: "standard".into(),
            ..Default::default()
        };
        assert!(!p.is_special_category());
        let p = BusinessProfile {
            owner_category: "SC/ST".into(),
            ..Default::default()
        };
        assert!(p.is_special_category());
    }
}
