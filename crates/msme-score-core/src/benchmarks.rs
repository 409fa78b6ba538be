//! Compiled-in calibration tables: sector and regional multipliers, sector
//! baselines, the statutory compliance calendar and peer statistics.
//!
//! All values are heuristic calibrations, not fitted distributions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::profile::{Sector, SizeCategory};
use crate::types::{Money, Score};

// ---------------------------------------------------------------------------
// Multipliers
// ---------------------------------------------------------------------------

/// Sector adjustment applied to obligation risk.
pub fn sector_risk_multiplier(sector: Sector) -> Decimal {
    match sector {
        Sector::Manufacturing => dec!(1.15),
        Sector::Trading => dec!(1.05),
        Sector::Service => dec!(1.00),
        Sector::Handicraft => dec!(0.90),
        Sector::Other => dec!(1.00),
    }
}

/// Enforcement strictness by state. Stricter regions see more value from
/// compliance work.
pub const REGIONAL_STRICTNESS: &[(&str, Decimal)] = &[
    ("maharashtra", dec!(1.25)),
    ("karnataka", dec!(1.20)),
    ("tamil_nadu", dec!(1.15)),
    ("telangana", dec!(1.15)),
    ("delhi", dec!(1.30)),
    ("gujarat", dec!(1.10)),
    ("uttar_pradesh", dec!(0.90)),
    ("west_bengal", dec!(0.95)),
    ("rajasthan", dec!(0.90)),
    ("andhra_pradesh", dec!(1.05)),
    ("kerala", dec!(1.10)),
    ("punjab", dec!(1.00)),
    ("default", dec!(1.00)),
];

pub fn regional_strictness(region_key: &str) -> Decimal {
    REGIONAL_STRICTNESS
        .iter()
        .find(|(k, _)| *k == region_key)
        .map(|(_, m)| *m)
        .unwrap_or(Decimal::ONE)
}

// ---------------------------------------------------------------------------
// Sector baselines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorBaseline {
    pub avg_risk_score: Score,
    pub avg_compliance_cost_inr: Money,
    pub avg_penalties_year_inr: Money,
    /// Share of firms using digital compliance tools (0-1)
    pub digital_adoption: Decimal,
    pub avg_schemes_utilized: Decimal,
}

pub fn sector_baseline(sector: Sector) -> SectorBaseline {
    match sector {
        Sector::Manufacturing => SectorBaseline {
            avg_risk_score: dec!(62),
            avg_compliance_cost_inr: dec!(85000),
            avg_penalties_year_inr: dec!(150000),
            digital_adoption: dec!(0.35),
            avg_schemes_utilized: dec!(1.2),
        },
        Sector::Service => SectorBaseline {
            avg_risk_score: dec!(48),
            avg_compliance_cost_inr: dec!(55000),
            avg_penalties_year_inr: dec!(80000),
            digital_adoption: dec!(0.55),
            avg_schemes_utilized: dec!(1.5),
        },
        Sector::Trading => SectorBaseline {
            avg_risk_score: dec!(55),
            avg_compliance_cost_inr: dec!(65000),
            avg_penalties_year_inr: dec!(120000),
            digital_adoption: dec!(0.40),
            avg_schemes_utilized: dec!(0.8),
        },
        Sector::Handicraft => SectorBaseline {
            avg_risk_score: dec!(40),
            avg_compliance_cost_inr: dec!(35000),
            avg_penalties_year_inr: dec!(50000),
            digital_adoption: dec!(0.20),
            avg_schemes_utilized: dec!(0.5),
        },
        Sector::Other => SectorBaseline {
            avg_risk_score: dec!(52),
            avg_compliance_cost_inr: dec!(60000),
            avg_penalties_year_inr: dec!(100000),
            digital_adoption: dec!(0.38),
            avg_schemes_utilized: dec!(1.0),
        },
    }
}

// ---------------------------------------------------------------------------
// Compliance calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingCategory {
    Tax,
    Gst,
    Accounting,
    License,
    Labour,
}

/// A statutory date that recurs every year. `day` is `None` for obligations
/// that run through the whole month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEntry {
    pub month: u32,
    pub day: Option<u32>,
    pub name: &'static str,
    pub category: FilingCategory,
}

pub const COMPLIANCE_CALENDAR: &[CalendarEntry] = &[
    CalendarEntry { month: 1, day: Some(15), name: "Advance Tax (Q3)", category: FilingCategory::Tax },
    CalendarEntry { month: 1, day: Some(31), name: "TDS/TCS Return (Q3)", category: FilingCategory::Tax },
    CalendarEntry { month: 3, day: Some(15), name: "Advance Tax (Q4)", category: FilingCategory::Tax },
    CalendarEntry { month: 3, day: Some(31), name: "FY Closing Filings", category: FilingCategory::Accounting },
    CalendarEntry { month: 3, day: Some(31), name: "GSTR-9 Annual Return", category: FilingCategory::Gst },
    CalendarEntry { month: 4, day: Some(30), name: "New FY Registrations Renewal", category: FilingCategory::License },
    CalendarEntry { month: 6, day: Some(15), name: "Advance Tax (Q1)", category: FilingCategory::Tax },
    CalendarEntry { month: 7, day: Some(20), name: "GSTR-3B (Jun)", category: FilingCategory::Gst },
    CalendarEntry { month: 7, day: Some(31), name: "Income Tax Return Filing", category: FilingCategory::Tax },
    CalendarEntry { month: 9, day: Some(15), name: "Advance Tax (Q2)", category: FilingCategory::Tax },
    CalendarEntry { month: 10, day: Some(31), name: "GSTR-1 Annual Reconciliation Prep", category: FilingCategory::Gst },
    CalendarEntry { month: 10, day: None, name: "Festival Season Labour Compliance", category: FilingCategory::Labour },
    CalendarEntry { month: 12, day: Some(31), name: "Calendar Year Closure (shops/establishments)", category: FilingCategory::License },
];

/// A renewal or inspection that recurs for every business in a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorObligation {
    pub name: &'static str,
    pub frequency: &'static str,
    /// How far ahead preparation should start
    pub advance_days: u32,
}

pub fn sector_obligations(sector: Sector) -> &'static [SectorObligation] {
    match sector {
        Sector::Manufacturing => &[
            SectorObligation { name: "Factory License Renewal", frequency: "annual", advance_days: 60 },
            SectorObligation { name: "Pollution Control Board Consent", frequency: "annual", advance_days: 90 },
            SectorObligation { name: "Fire Safety Certificate", frequency: "annual", advance_days: 45 },
            SectorObligation { name: "Boiler Inspection", frequency: "biannual", advance_days: 30 },
        ],
        Sector::Service => &[
            SectorObligation { name: "Professional Tax Return", frequency: "annual", advance_days: 30 },
            SectorObligation { name: "Trade License Renewal", frequency: "annual", advance_days: 45 },
        ],
        Sector::Trading => &[
            SectorObligation { name: "Shops & Establishment License", frequency: "annual", advance_days: 30 },
            SectorObligation { name: "FSSAI License Renewal", frequency: "annual", advance_days: 60 },
            SectorObligation { name: "Weights & Measures Certification", frequency: "biannual", advance_days: 30 },
        ],
        Sector::Handicraft => &[
            SectorObligation { name: "Artisan Card Renewal", frequency: "biennial", advance_days: 60 },
            SectorObligation { name: "GI Tag Compliance", frequency: "annual", advance_days: 45 },
        ],
        Sector::Other => &[],
    }
}

// ---------------------------------------------------------------------------
// Peer statistics
// ---------------------------------------------------------------------------

/// Distribution summary for one benchmark dimension within a sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionStats {
    pub mean: Score,
    pub median: Score,
    pub p10: Score,
    pub p90: Score,
    pub stdev: Score,
}

const fn stats(mean: Decimal, median: Decimal, p10: Decimal, p90: Decimal, stdev: Decimal) -> DimensionStats {
    DimensionStats { mean, median, p10, p90, stdev }
}

/// Per-sector stats in dimension order: compliance, risk, scheme
/// utilisation, penalty exposure, sustainability.
pub fn peer_stats(sector: Sector) -> [DimensionStats; 5] {
    match sector {
        Sector::Manufacturing => [
            stats(dec!(52), dec!(50), dec!(25), dec!(82), dec!(18)),
            stats(dec!(58), dec!(55), dec!(30), dec!(85), dec!(17)),
            stats(dec!(28), dec!(22), dec!(5), dec!(65), dec!(20)),
            stats(dec!(45), dec!(42), dec!(15), dec!(80), dec!(19)),
            stats(dec!(38), dec!(35), dec!(10), dec!(72), dec!(20)),
        ],
        Sector::Service => [
            stats(dec!(58), dec!(57), dec!(30), dec!(85), dec!(16)),
            stats(dec!(48), dec!(45), dec!(20), dec!(78), dec!(18)),
            stats(dec!(32), dec!(28), dec!(8), dec!(70), dec!(19)),
            stats(dec!(38), dec!(35), dec!(10), dec!(72), dec!(18)),
            stats(dec!(42), dec!(40), dec!(15), dec!(75), dec!(18)),
        ],
        Sector::Trading => [
            stats(dec!(48), dec!(45), dec!(20), dec!(78), dec!(17)),
            stats(dec!(50), dec!(48), dec!(22), dec!(80), dec!(18)),
            stats(dec!(25), dec!(20), dec!(3), dec!(60), dec!(18)),
            stats(dec!(42), dec!(40), dec!(12), dec!(75), dec!(19)),
            stats(dec!(30), dec!(28), dec!(8), dec!(65), dec!(18)),
        ],
        Sector::Handicraft => [
            stats(dec!(40), dec!(38), dec!(15), dec!(70), dec!(17)),
            stats(dec!(42), dec!(40), dec!(18), dec!(72), dec!(17)),
            stats(dec!(35), dec!(30), dec!(8), dec!(72), dec!(20)),
            stats(dec!(35), dec!(32), dec!(8), dec!(68), dec!(18)),
            stats(dec!(50), dec!(48), dec!(20), dec!(82), dec!(19)),
        ],
        Sector::Other => [
            stats(dec!(50), dec!(48), dec!(22), dec!(80), dec!(17)),
            stats(dec!(50), dec!(48), dec!(22), dec!(80), dec!(17)),
            stats(dec!(30), dec!(25), dec!(5), dec!(65), dec!(19)),
            stats(dec!(40), dec!(38), dec!(12), dec!(75), dec!(18)),
            stats(dec!(40), dec!(38), dec!(12), dec!(72), dec!(18)),
        ],
    }
}

/// Shift applied to peer means and medians for the firm's size band.
pub fn size_adjustment(size: SizeCategory) -> Decimal {
    match size {
        SizeCategory::Micro => dec!(-5),
        SizeCategory::Small => Decimal::ZERO,
        SizeCategory::Medium => dec!(5),
    }
}

/// Registered firms per size band, nationally.
pub fn national_peer_count(size: SizeCategory) -> u32 {
    match size {
        SizeCategory::Micro => 45_000,
        SizeCategory::Small => 12_000,
        SizeCategory::Medium => 3_000,
    }
}

/// Share of national peers located in a state.
pub fn state_peer_share(region_key: &str) -> Decimal {
    match region_key {
        "maharashtra" => dec!(0.15),
        "tamil_nadu" => dec!(0.12),
        "uttar_pradesh" => dec!(0.12),
        "karnataka" => dec!(0.10),
        "gujarat" => dec!(0.10),
        "delhi" => dec!(0.08),
        _ => dec!(0.05),
    }
}
