//! Unit conversions from documents handled digitally to physical resources
//! and emissions avoided.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::SustainabilityAssumptions;
use crate::math::safe_div;
use crate::types::Money;

/// 80 gsm A4
pub const PAPER_KG_PER_PAGE: Decimal = dec!(0.005);
pub const TREES_PER_TONNE_PAPER: Decimal = dec!(17);
pub const WATER_LITRES_PER_PAGE: Decimal = dec!(10);
pub const INK_ML_PER_PAGE: Decimal = dec!(0.05);
/// CO2 absorbed by one tree in a year
pub const CO2_KG_PER_TREE_YEAR: Decimal = dec!(22);

pub const TRADITIONAL_HOURS_PER_DOCUMENT: Decimal = dec!(8);
pub const DIGITAL_HOURS_PER_DOCUMENT: Decimal = dec!(0.5);
pub const TRADITIONAL_COST_PER_DOCUMENT_INR: Money = dec!(5_000);
pub const DIGITAL_COST_PER_DOCUMENT_INR: Money = dec!(50);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperSavings {
    pub pages_saved: Decimal,
    pub paper_weight_kg: Decimal,
    pub trees_saved: Decimal,
    pub water_saved_litres: Decimal,
    pub ink_saved_ml: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonSavings {
    pub travel_km_avoided: Decimal,
    pub travel_co2_saved_kg: Decimal,
    pub digital_energy_kwh: Decimal,
    pub energy_co2_kg: Decimal,
    /// Travel avoided minus digital energy, floored at zero
    pub net_co2_saved_kg: Decimal,
    pub equivalent_trees_planted: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyGains {
    pub traditional_hours: Decimal,
    pub digital_hours: Decimal,
    pub hours_saved: Decimal,
    pub traditional_cost_inr: Money,
    pub digital_cost_inr: Money,
    pub cost_saved_inr: Money,
    /// traditional / digital hours; zero when nothing was processed
    pub productivity_multiplier: Decimal,
}

pub fn paper_savings(documents: u32, a: &SustainabilityAssumptions) -> PaperSavings {
    let pages = a.paper_pages_per_document * Decimal::from(documents);
    let kg = pages * PAPER_KG_PER_PAGE;
    PaperSavings {
        pages_saved: pages,
        paper_weight_kg: kg,
        trees_saved: kg / dec!(1000) * TREES_PER_TONNE_PAPER,
        water_saved_litres: pages * WATER_LITRES_PER_PAGE,
        ink_saved_ml: pages * INK_ML_PER_PAGE,
    }
}

pub fn carbon_savings(documents: u32, a: &SustainabilityAssumptions) -> CarbonSavings {
    let n = Decimal::from(documents);
    let km = a.avg_consultant_travel_km * n;
    let travel = km * a.co2_per_km_kg;
    let kwh = a.kwh_per_digital_transaction * n;
    let energy = kwh * a.co2_per_kwh_kg;
    let net = (travel - energy).max(Decimal::ZERO);
    CarbonSavings {
        travel_km_avoided: km,
        travel_co2_saved_kg: travel,
        digital_energy_kwh: kwh,
        energy_co2_kg: energy,
        net_co2_saved_kg: net,
        equivalent_trees_planted: net / CO2_KG_PER_TREE_YEAR,
    }
}

pub fn efficiency_gains(documents: u32) -> EfficiencyGains {
    let n = Decimal::from(documents);
    let traditional_hours = TRADITIONAL_HOURS_PER_DOCUMENT * n;
    let digital_hours = DIGITAL_HOURS_PER_DOCUMENT * n;
    let traditional_cost = TRADITIONAL_COST_PER_DOCUMENT_INR * n;
    let digital_cost = DIGITAL_COST_PER_DOCUMENT_INR * n;
    EfficiencyGains {
        traditional_hours,
        digital_hours,
        hours_saved: traditional_hours - digital_hours,
        traditional_cost_inr: traditional_cost,
        digital_cost_inr: digital_cost,
        cost_saved_inr: traditional_cost - digital_cost,
        productivity_multiplier: safe_div(traditional_hours, digital_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paper_for_four_documents() {
        let p = paper_savings(4, &SustainabilityAssumptions::default());
        assert_eq!(p.pages_saved, dec!(100));
        assert_eq!(p.paper_weight_kg, dec!(0.5));
        assert_eq!(p.trees_saved, dec!(0.0085));
        assert_eq!(p.water_saved_litres, dec!(1000));
        assert_eq!(p.ink_saved_ml, dec!(5));
    }

    #[test]
    fn test_carbon_net_of_digital_energy() {
        let c = carbon_savings(2, &SustainabilityAssumptions::default());
        assert_eq!(c.travel_km_avoided, dec!(100));
        assert_eq!(c.travel_co2_saved_kg, dec!(21));
        assert_eq!(c.energy_co2_kg, dec!(0.0082));
        assert_eq!(c.net_co2_saved_kg, dec!(20.9918));
        assert_eq!(c.equivalent_trees_planted, dec!(20.9918) / dec!(22));
    }

    #[test]
    fn test_carbon_never_negative() {
        let a = SustainabilityAssumptions {
            avg_consultant_travel_km: Decimal::ZERO,
            ..Default::default()
        };
        assert_eq!(carbon_savings(10, &a).net_co2_saved_kg, Decimal::ZERO);
    }

    #[test]
    fn test_efficiency() {
        let e = efficiency_gains(3);
        assert_eq!(e.hours_saved, dec!(22.5));
        assert_eq!(e.cost_saved_inr, dec!(14_850));
        assert_eq!(e.productivity_multiplier, dec!(16));
        assert_eq!(efficiency_gains(0).productivity_multiplier, Decimal::ZERO);
    }
}
