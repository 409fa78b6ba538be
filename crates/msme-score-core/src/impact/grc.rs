use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::math::clamp_score;
use crate::types::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrcReadiness {
    #[serde(rename = "Enterprise-Ready")]
    EnterpriseReady,
    #[serde(rename = "Growth-Stage")]
    GrowthStage,
    Foundation,
}

impl GrcReadiness {
    pub fn from_average(avg: Score) -> Self {
        if avg >= dec!(75) {
            GrcReadiness::EnterpriseReady
        } else if avg >= dec!(55) {
            GrcReadiness::GrowthStage
        } else {
            GrcReadiness::Foundation
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrcReadiness::EnterpriseReady => "Enterprise-Ready",
            GrcReadiness::GrowthStage => "Growth-Stage",
            GrcReadiness::Foundation => "Foundation",
        }
    }
}

/// Governance / risk / compliance / sustainability view of the impact
/// dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrcAlignment {
    pub governance_score: Score,
    pub risk_management_score: Score,
    pub compliance_score: Score,
    pub sustainability_score: Score,
    pub overall_grc_readiness: GrcReadiness,
}

impl GrcAlignment {
    pub fn average(&self) -> Score {
        (self.governance_score
            + self.risk_management_score
            + self.compliance_score
            + self.sustainability_score)
            / dec!(4)
    }
}

pub fn grc_alignment(
    risk_reduction: Score,
    profitability: Score,
    sustainability: Score,
    impact_score: Score,
) -> GrcAlignment {
    let governance = clamp_score(dec!(0.6) * impact_score + dec!(0.4) * profitability);
    let risk_management = clamp_score(risk_reduction * dec!(1.1));
    let compliance = clamp_score(dec!(0.5) * risk_reduction + dec!(0.5) * impact_score);
    let sustainability = clamp_score(sustainability);

    let avg = (governance + risk_management + compliance + sustainability) / dec!(4);
    GrcAlignment {
        governance_score: governance,
        risk_management_score: risk_management,
        compliance_score: compliance,
        sustainability_score: sustainability,
        overall_grc_readiness: GrcReadiness::from_average(avg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alignment_formulas() {
        let g = grc_alignment(dec!(80), dec!(50), dec!(60), dec!(70));
        assert_eq!(g.governance_score, dec!(62));
        assert_eq!(g.risk_management_score, dec!(88));
        assert_eq!(g.compliance_score, dec!(75));
        assert_eq!(g.sustainability_score, dec!(60));
        // (62 + 88 + 75 + 60) / 4 = 71.25
        assert_eq!(g.average(), dec!(71.25));
        assert_eq!(g.overall_grc_readiness, GrcReadiness::GrowthStage);
    }

    #[test]
    fn test_risk_management_capped() {
        let g = grc_alignment(dec!(95), dec!(100), dec!(100), dec!(100));
        assert_eq!(g.risk_management_score, dec!(100));
        assert_eq!(g.overall_grc_readiness, GrcReadiness::EnterpriseReady);
    }

    #[test]
    fn test_all_zero_is_foundation() {
        let g = grc_alignment(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(g.average(), Decimal::ZERO);
        assert_eq!(g.overall_grc_readiness, GrcReadiness::Foundation);
        assert_eq!(serde_json::to_value(GrcReadiness::EnterpriseReady).unwrap(), "Enterprise-Ready");
    }
}
