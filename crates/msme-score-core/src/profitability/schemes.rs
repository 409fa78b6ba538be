//! Government support schemes: the static catalog, profile-based
//! eligibility and the per-scheme benefit formulas.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::currency::format_inr;
use crate::profile::{BusinessProfile, Sector};
use crate::types::{Money, Rate};

const DEFAULT_LOAN_INR: Money = dec!(500_000);
const DEFAULT_PROJECT_COST_INR: Money = dec!(1_000_000);
const DEFAULT_STANDUP_LOAN_INR: Money = dec!(1_000_000);
const DEFAULT_TURNOVER_INR: Money = dec!(500_000);
const CGTMSE_GUARANTEE: Rate = dec!(0.75);
const UDYAM_TAX_BENEFIT: Rate = dec!(0.15);
const SFURTI_CLUSTER_FUNDING_INR: Money = dec!(2_500_000);
const SFURTI_ARTISANS_PER_CLUSTER: Decimal = dec!(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitType {
    Guarantee,
    Subsidy,
    CreditAccess,
    TaxBenefit,
    Grant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    Easy,
    Moderate,
    Complex,
}

/// Estimated value of one scheme for one business. Supplied by the caller
/// or derived from the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeBenefit {
    pub scheme_id: String,
    pub scheme_name: String,
    pub benefit_type: BenefitType,
    pub estimated_value_inr: Money,
    pub confidence: Confidence,
    pub application_effort: Effort,
    #[serde(default)]
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeId {
    Cgtmse,
    Pmegp,
    Mudra,
    StandUpIndia,
    Udyam,
    Sfurti,
}

pub struct SchemeInfo {
    pub id: SchemeId,
    pub code: &'static str,
    pub name: &'static str,
    pub ministry: &'static str,
    pub website: &'static str,
}

pub const SCHEME_CATALOG: &[SchemeInfo] = &[
    SchemeInfo {
        id: SchemeId::Cgtmse,
        code: "CGTMSE",
        name: "Credit Guarantee Fund Trust for Micro and Small Enterprises",
        ministry: "Ministry of MSME",
        website: "https://www.cgtmse.in",
    },
    SchemeInfo {
        id: SchemeId::Pmegp,
        code: "PMEGP",
        name: "Prime Minister's Employment Generation Programme",
        ministry: "Ministry of MSME (KVIC)",
        website: "https://www.kviconline.gov.in/pmegpeportal",
    },
    SchemeInfo {
        id: SchemeId::Mudra,
        code: "MUDRA",
        name: "Pradhan Mantri MUDRA Yojana",
        ministry: "Ministry of Finance",
        website: "https://www.mudra.org.in",
    },
    SchemeInfo {
        id: SchemeId::StandUpIndia,
        code: "STANDUPINDIA",
        name: "Stand Up India",
        ministry: "Ministry of Finance (SIDBI)",
        website: "https://www.standupmitra.in",
    },
    SchemeInfo {
        id: SchemeId::Udyam,
        code: "UDYAM",
        name: "Udyam Registration",
        ministry: "Ministry of MSME",
        website: "https://udyamregistration.gov.in",
    },
    SchemeInfo {
        id: SchemeId::Sfurti,
        code: "SFURTI",
        name: "Scheme of Fund for Regeneration of Traditional Industries",
        ministry: "Ministry of MSME (KVIC)",
        website: "https://www.sfurti.in",
    },
];

impl SchemeId {
    pub fn info(self) -> &'static SchemeInfo {
        // the catalog lists every variant in declaration order
        &SCHEME_CATALOG[self as usize]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        SCHEME_CATALOG
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(code.trim()))
            .map(|s| s.id)
    }
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

fn declared_micro_or_small(profile: &BusinessProfile) -> bool {
    let size = profile.size.to_lowercase();
    size.contains("micro") || size.contains("small")
}

/// Schemes the business plausibly qualifies for, in catalog order.
pub fn applicable_schemes(profile: &BusinessProfile) -> Vec<SchemeId> {
    let mut ids = Vec::new();
    let sector = profile.sector_class();

    if declared_micro_or_small(profile)
        && matches!(sector, Sector::Manufacturing | Sector::Service)
    {
        ids.push(SchemeId::Cgtmse);
    }
    if profile.is_new_unit {
        ids.push(SchemeId::Pmegp);
    }
    if declared_micro_or_small(profile) {
        ids.push(SchemeId::Mudra);
    }
    if profile.is_new_unit && (profile.is_sc_st() || profile.is_women_owned()) {
        ids.push(SchemeId::StandUpIndia);
    }
    if !profile.has_udyam {
        ids.push(SchemeId::Udyam);
    }
    if sector == Sector::Handicraft {
        ids.push(SchemeId::Sfurti);
    }
    ids
}

// ---------------------------------------------------------------------------
// Benefit formulas
// ---------------------------------------------------------------------------

/// PMEGP subsidy rate: rural special 35%, rural general 25%, urban special
/// 25%, urban general 15%.
pub fn pmegp_rate(profile: &BusinessProfile) -> Rate {
    match (profile.is_rural(), profile.is_special_category()) {
        (true, true) => dec!(0.35),
        (true, false) | (false, true) => dec!(0.25),
        (false, false) => dec!(0.15),
    }
}

/// MUDRA tier by turnover: Shishu, Kishore above ₹5L, Tarun above ₹50L.
pub fn mudra_tier(turnover: Money) -> (&'static str, Money) {
    if turnover > dec!(5_000_000) {
        ("Tarun", dec!(1_000_000))
    } else if turnover > dec!(500_000) {
        ("Kishore", dec!(500_000))
    } else {
        ("Shishu", dec!(50_000))
    }
}

pub fn estimate_benefit(id: SchemeId, profile: &BusinessProfile) -> SchemeBenefit {
    let info = id.info();
    let (benefit_type, value, confidence, effort, notes) = match id {
        SchemeId::Cgtmse => {
            let loan = profile.loan_amount.unwrap_or(DEFAULT_LOAN_INR);
            let guarantee = loan * CGTMSE_GUARANTEE;
            (
                BenefitType::Guarantee,
                guarantee,
                Confidence::Medium,
                Effort::Moderate,
                format!(
                    "Collateral-free credit guarantee of {} on a loan of {}",
                    format_inr(guarantee),
                    format_inr(loan)
                ),
            )
        }
        SchemeId::Pmegp => {
            let rate = pmegp_rate(profile);
            let project_cost = profile.project_cost.unwrap_or(DEFAULT_PROJECT_COST_INR);
            let subsidy = project_cost * rate;
            (
                BenefitType::Subsidy,
                subsidy,
                Confidence::Medium,
                Effort::Moderate,
                format!(
                    "{}% subsidy = {} on project cost {}",
                    (rate * dec!(100)).normalize(),
                    format_inr(subsidy),
                    format_inr(project_cost)
                ),
            )
        }
        SchemeId::Mudra => {
            let (tier, amount) = mudra_tier(profile.annual_turnover.unwrap_or(Decimal::ZERO));
            (
                BenefitType::CreditAccess,
                amount,
                Confidence::High,
                Effort::Easy,
                format!("{tier} category: collateral-free loan up to {}", format_inr(amount)),
            )
        }
        SchemeId::StandUpIndia => {
            let loan = profile.loan_amount.unwrap_or(DEFAULT_STANDUP_LOAN_INR);
            (
                BenefitType::CreditAccess,
                loan,
                Confidence::Medium,
                Effort::Moderate,
                format!("Bank loan of {} with 18-month moratorium", format_inr(loan)),
            )
        }
        SchemeId::Udyam => {
            let turnover = profile.annual_turnover.unwrap_or(DEFAULT_TURNOVER_INR);
            let benefit = turnover * UDYAM_TAX_BENEFIT;
            (
                BenefitType::TaxBenefit,
                benefit,
                Confidence::High,
                Effort::Easy,
                format!(
                    "Free registration. Estimated tax benefit: {}/year. Gateway to all MSME schemes.",
                    format_inr(benefit)
                ),
            )
        }
        SchemeId::Sfurti => {
            let per_artisan = SFURTI_CLUSTER_FUNDING_INR / SFURTI_ARTISANS_PER_CLUSTER;
            (
                BenefitType::Grant,
                per_artisan,
                Confidence::Low,
                Effort::Complex,
                format!("Cluster-based grant: ~{} per artisan (est.)", format_inr(per_artisan)),
            )
        }
    };

    SchemeBenefit {
        scheme_id: info.code.to_string(),
        scheme_name: info.name.to_string(),
        benefit_type,
        estimated_value_inr: value,
        confidence,
        application_effort: effort,
        notes: format!(
            "{}. Administered by {} ({}).",
            notes.trim_end_matches('.'),
            info.ministry,
            info.website
        ),
    }
}

pub fn derive_scheme_benefits(profile: &BusinessProfile) -> Vec<SchemeBenefit> {
    applicable_schemes(profile)
        .into_iter()
        .map(|id| estimate_benefit(id, profile))
        .collect()
}
