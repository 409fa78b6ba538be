use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MsmeScoreError;
use crate::types::{Money, Rate, Score};
use crate::MsmeScoreResult;

const WEIGHT_TOLERANCE: Decimal = dec!(0.000001);

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Engine-wide calibration. Every field has a shipped default; partial JSON
/// or YAML overrides fill the rest from `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub risk_weights: RiskWeights,
    pub band_thresholds: BandThresholds,
    pub financial: FinancialAssumptions,
    pub sustainability: SustainabilityAssumptions,
    /// Cap on sector x regional multiplier applied to obligation risk.
    pub max_combined_multiplier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub severity: Decimal,
    pub penalty: Decimal,
    pub deadline: Decimal,
    pub frequency: Decimal,
}

/// Inclusive lower bounds of each risk band; anything below `low` is MINIMAL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    pub critical: Score,
    pub high: Score,
    pub medium: Score,
    pub low: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialAssumptions {
    pub discount_rate: Rate,
    pub growth_rate: Rate,
    /// Yearly platform subscription, INR
    pub subscription_cost_inr: Money,
    pub projection_years: u32,
    pub break_even_horizon_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainabilityAssumptions {
    pub paper_pages_per_document: Decimal,
    pub co2_per_km_kg: Decimal,
    pub avg_consultant_travel_km: Decimal,
    pub kwh_per_digital_transaction: Decimal,
    pub co2_per_kwh_kg: Decimal,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_weights: RiskWeights::default(),
            band_thresholds: BandThresholds::default(),
            financial: FinancialAssumptions::default(),
            sustainability: SustainabilityAssumptions::default(),
            max_combined_multiplier: dec!(1.4),
        }
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            severity: dec!(0.35),
            penalty: dec!(0.25),
            deadline: dec!(0.25),
            frequency: dec!(0.15),
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            critical: dec!(80),
            high: dec!(60),
            medium: dec!(40),
            low: dec!(20),
        }
    }
}

impl Default for FinancialAssumptions {
    fn default() -> Self {
        Self {
            discount_rate: dec!(0.10),
            growth_rate: dec!(0.15),
            subscription_cost_inr: dec!(12000),
            projection_years: 5,
            break_even_horizon_months: 60,
        }
    }
}

impl Default for SustainabilityAssumptions {
    fn default() -> Self {
        Self {
            paper_pages_per_document: dec!(25),
            co2_per_km_kg: dec!(0.21),
            avg_consultant_travel_km: dec!(50),
            kwh_per_digital_transaction: dec!(0.005),
            co2_per_kwh_kg: dec!(0.82),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl RiskWeights {
    pub fn sum(&self) -> Decimal {
        self.severity + self.penalty + self.deadline + self.frequency
    }
}

impl EngineConfig {
    /// Check every invariant the scoring models rely on. Called once when an
    /// engine is built; the models never re-validate per call.
    pub fn validate(&self) -> MsmeScoreResult<()> {
        let w = &self.risk_weights;
        for (name, value) in [
            ("severity", w.severity),
            ("penalty", w.penalty),
            ("deadline", w.deadline),
            ("frequency", w.frequency),
        ] {
            if value < Decimal::ZERO {
                return Err(MsmeScoreError::Configuration(format!(
                    "risk weight '{name}' must be non-negative (got {value})"
                )));
            }
        }
        let sum = w.sum();
        if (sum - Decimal::ONE).abs() > WEIGHT_TOLERANCE {
            return Err(MsmeScoreError::Configuration(format!(
                "risk weights must sum to 1.0 (got {sum})"
            )));
        }

        let t = &self.band_thresholds;
        if !(t.critical > t.high && t.high > t.medium && t.medium > t.low) {
            return Err(MsmeScoreError::Configuration(format!(
                "band thresholds must be strictly decreasing (got {}/{}/{}/{})",
                t.critical, t.high, t.medium, t.low
            )));
        }
        if t.low <= Decimal::ZERO || t.critical > dec!(100) {
            return Err(MsmeScoreError::Configuration(
                "band thresholds must lie in (0, 100]".into(),
            ));
        }

        let f = &self.financial;
        if f.discount_rate <= dec!(-1) {
            return Err(MsmeScoreError::Configuration(
                "discount_rate must be greater than -100%".into(),
            ));
        }
        if f.growth_rate <= dec!(-1) {
            return Err(MsmeScoreError::Configuration(
                "growth_rate must be greater than -100%".into(),
            ));
        }
        if f.subscription_cost_inr <= Decimal::ZERO {
            return Err(MsmeScoreError::Configuration(
                "subscription_cost_inr must be positive".into(),
            ));
        }
        if f.projection_years == 0 || f.projection_years > 50 {
            return Err(MsmeScoreError::Configuration(format!(
                "projection_years must be between 1 and 50 (got {})",
                f.projection_years
            )));
        }
        if f.break_even_horizon_months == 0 {
            return Err(MsmeScoreError::Configuration(
                "break_even_horizon_months must be at least 1".into(),
            ));
        }

        let s = &self.sustainability;
        for (name, value) in [
            ("paper_pages_per_document", s.paper_pages_per_document),
            ("co2_per_km_kg", s.co2_per_km_kg),
            ("avg_consultant_travel_km", s.avg_consultant_travel_km),
            ("kwh_per_digital_transaction", s.kwh_per_digital_transaction),
            ("co2_per_kwh_kg", s.co2_per_kwh_kg),
        ] {
            if value < Decimal::ZERO {
                return Err(MsmeScoreError::Configuration(format!(
                    "sustainability constant '{name}' must be non-negative (got {value})"
                )));
            }
        }

        if self.max_combined_multiplier <= Decimal::ZERO {
            return Err(MsmeScoreError::Configuration(
                "max_combined_multiplier must be positive".into(),
            ));
        }

        Ok(())
    }
}
