use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::currency::parse_inr;
use crate::math::safe_div;
use crate::policy::Penalty;
use crate::risk::obligation::ObligationRisk;
use crate::types::Score;

const TOP_RISK_COUNT: usize = 3;
const SOON_DAYS: i64 = 30;
const HIGH_SEVERITY: Score = dec!(75);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorAverages {
    pub severity: Score,
    pub penalty: Score,
    pub deadline: Score,
    pub frequency: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskVelocity {
    Accelerating,
    Stable,
    Decelerating,
}

/// Rank-weighted mean of risks already sorted highest first: rank 1 counts
/// double, rank 2 one and a half times, the rest once.
pub fn overall_score(sorted: &[ObligationRisk]) -> Score {
    let mut total = Decimal::ZERO;
    let mut weight_sum = Decimal::ZERO;
    for (rank, risk) in sorted.iter().enumerate() {
        let w = match rank {
            0 => dec!(2.0),
            1 => dec!(1.5),
            _ => Decimal::ONE,
        };
        total += w * risk.weighted_score;
        weight_sum += w;
    }
    safe_div(total, weight_sum)
}

pub fn factor_averages(risks: &[ObligationRisk]) -> FactorAverages {
    if risks.is_empty() {
        return FactorAverages::default();
    }
    let n = Decimal::from(risks.len() as u64);
    let mean = |f: fn(&ObligationRisk) -> Score| risks.iter().map(f).sum::<Decimal>() / n;
    FactorAverages {
        severity: mean(|r| r.severity_score),
        penalty: mean(|r| r.penalty_score),
        deadline: mean(|r| r.deadline_score),
        frequency: mean(|r| r.frequency_score),
    }
}

fn is_overdue(r: &ObligationRisk) -> bool {
    matches!(r.days_remaining, Some(d) if d < 0)
}

fn is_due_soon(r: &ObligationRisk) -> bool {
    matches!(r.days_remaining, Some(d) if (0..=SOON_DAYS).contains(&d))
}

/// Trend of deadline pressure: overdue items count double against the
/// obligations whose timing is known.
pub fn risk_velocity(risks: &[ObligationRisk]) -> RiskVelocity {
    let known = risks.iter().filter(|r| r.days_remaining.is_some()).count();
    if known == 0 {
        return RiskVelocity::Stable;
    }
    let overdue = risks.iter().filter(|r| is_overdue(r)).count();
    let soon = risks.iter().filter(|r| is_due_soon(r)).count();
    let ratio = Decimal::from((2 * overdue + soon) as u64) / Decimal::from(known as u64);

    if ratio > dec!(1.5) {
        RiskVelocity::Accelerating
    } else if ratio < dec!(0.5) {
        RiskVelocity::Decelerating
    } else {
        RiskVelocity::Stable
    }
}

fn short_name(name: &str) -> String {
    name.chars().take(40).collect()
}

/// Recommendations in fixed priority order: overdue, due soon, high
/// severity, then the standing calendar advice.
pub fn recommendations(risks: &[ObligationRisk]) -> Vec<String> {
    let mut recs = Vec::new();

    let overdue = risks.iter().filter(|r| is_overdue(r)).count();
    if overdue > 0 {
        recs.push(format!(
            "{overdue} obligation(s) are OVERDUE. Address these before all others."
        ));
    }

    let soon = risks.iter().filter(|r| is_due_soon(r)).count();
    if soon > 0 {
        recs.push(format!(
            "{soon} obligation(s) due within 30 days. Plan your compliance calendar now."
        ));
    }

    let high: Vec<String> = risks
        .iter()
        .filter(|r| r.severity_score >= HIGH_SEVERITY)
        .take(TOP_RISK_COUNT)
        .map(|r| short_name(&r.obligation_name))
        .collect();
    if !high.is_empty() {
        recs.push(format!(
            "High-severity obligations: {}. Non-compliance could lead to serious consequences.",
            high.join(", ")
        ));
    }

    recs.push(
        "Set up a compliance calendar with automated reminders for recurring obligations."
            .to_string(),
    );
    recs
}

pub fn top_risks(sorted: &[ObligationRisk]) -> Vec<ObligationRisk> {
    sorted.iter().take(TOP_RISK_COUNT).cloned().collect()
}

/// Lightweight score from the extractor's overall risk level, boosted by
/// the largest penalty on record.
pub fn quick_risk_score(risk_level: &str, penalties: &[Penalty]) -> Score {
    let base = match risk_level.trim().to_uppercase().as_str() {
        "HIGH" => dec!(80),
        "LOW" => dec!(25),
        _ => dec!(50),
    };
    let boost = penalties
        .iter()
        .filter_map(|p| parse_inr(&p.penalty_amount).ok())
        .map(|amount| {
            if amount > dec!(500_000) {
                dec!(20)
            } else if amount > dec!(100_000) {
                dec!(12)
            } else if amount > dec!(10_000) {
                dec!(5)
            } else {
                Decimal::ZERO
            }
        })
        .max()
        .unwrap_or(Decimal::ZERO);
    (base + boost).min(dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SeverityClass;
    use crate::risk::RiskBand;
    use pretty_assertions::assert_eq;

    fn risk(name: &str, score: Decimal, days: Option<i64>) -> ObligationRisk {
        ObligationRisk {
            obligation_name: name.into(),
            severity_class: SeverityClass::Fine,
            severity_score: dec!(55),
            penalty_score: dec!(30),
            deadline_score: dec!(40),
            frequency_score: dec!(10),
            weighted_score: score,
            risk_band: RiskBand::Medium,
            days_remaining: days,
            urgency_decay: None,
            enforcement_probability: dec!(0.6),
            penalty_amount_inr: None,
            expected_penalty_inr: Decimal::ZERO,
            discounted_penalty_inr: Decimal::ZERO,
            remediation_hint: String::new(),
            synthetic: false,
        }
    }

    #[test]
    fn test_rank_weighted_mean() {
        let risks = vec![
            risk("a", dec!(90), None),
            risk("b", dec!(60), None),
            risk("c", dec!(30), None),
        ];
        // (2*90 + 1.5*60 + 30) / 4.5
        assert_eq!(overall_score(&risks), dec!(300) / dec!(4.5));
        assert_eq!(overall_score(&risks[..1]), dec!(90));
        assert_eq!(overall_score(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_single_catastrophe_dominates() {
        let mut risks = vec![risk("fatal", dec!(100), None)];
        for i in 0..4 {
            risks.push(risk(&format!("minor {i}"), dec!(10), None));
        }
        let plain_mean = dec!(140) / dec!(5);
        assert!(overall_score(&risks) > plain_mean);
    }

    #[test]
    fn test_velocity() {
        assert_eq!(risk_velocity(&[risk("x", dec!(1), None)]), RiskVelocity::Stable);
        assert_eq!(
            risk_velocity(&[risk("x", dec!(1), Some(-2)), risk("y", dec!(1), Some(-5))]),
            RiskVelocity::Accelerating
        );
        // (2*1 + 1) / 2 sits exactly on the 1.5 boundary
        assert_eq!(
            risk_velocity(&[risk("x", dec!(1), Some(-2)), risk("y", dec!(1), Some(5))]),
            RiskVelocity::Stable
        );
        assert_eq!(
            risk_velocity(&[risk("x", dec!(1), Some(200)), risk("y", dec!(1), Some(400))]),
            RiskVelocity::Decelerating
        );
        assert_eq!(
            risk_velocity(&[risk("x", dec!(1), Some(10)), risk("y", dec!(1), Some(400))]),
            RiskVelocity::Stable
        );
    }

    #[test]
    fn test_recommendation_order() {
        let mut high = risk("Pollution control consent", dec!(90), Some(3));
        high.severity_score = dec!(100);
        let risks = vec![high, risk("Late return", dec!(50), Some(-4))];
        let recs = recommendations(&risks);
        assert_eq!(recs.len(), 4);
        assert!(recs[0].starts_with("1 obligation(s) are OVERDUE"));
        assert!(recs[1].starts_with("1 obligation(s) due within 30 days"));
        assert!(recs[2].contains("Pollution control consent"));
        assert!(recs[3].starts_with("Set up a compliance calendar"));
    }

    #[test]
    fn test_generic_recommendation_always_last() {
        let recs = recommendations(&[]);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_quick_score() {
        assert_eq!(quick_risk_score("HIGH", &[]), dec!(80));
        assert_eq!(quick_risk_score("unknown", &[]), dec!(50));
        let penalties = vec![
            Penalty::new("a", "Rs. 20,000"),
            Penalty::new("b", "6 lakh"),
            Penalty::new("c", "nil"),
        ];
        assert_eq!(quick_risk_score("HIGH", &penalties), dec!(100));
        assert_eq!(quick_risk_score("LOW", &penalties[..1]), dec!(30));
    }
}
