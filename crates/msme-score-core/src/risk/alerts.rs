//! Forward-looking signals derived from the deadline set: clusters of
//! filings, the yearly compliance density map, near-term risk and the
//! trajectory of past overall scores.

use std::collections::BTreeMap;

use chrono::Month;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::benchmarks::COMPLIANCE_CALENDAR;
use crate::risk::calendar::{RecurringObligation, UpcomingDeadline};
use crate::risk::obligation::ObligationRisk;
use crate::types::{Rate, Score};

/// Width of one cluster bucket in days.
pub const CLUSTER_WINDOW_DAYS: i64 = 14;
/// Deadlines in one bucket needed to flag a cluster.
pub const CLUSTER_THRESHOLD: usize = 3;
/// Near-term risk when nothing falls inside the horizon.
pub const BASELINE_NEAR_TERM_RISK: Score = dec!(10);
/// Only the most recent scores feed the trajectory.
pub const TRAJECTORY_WINDOW: usize = 10;

const CLUSTER_CONFIDENCE: Rate = dec!(0.80);
const SECTOR_HORIZON_DAYS: u32 = 90;
const RISK_PER_DEADLINE: Score = dec!(20);
const MIN_URGENCY: Rate = dec!(0.1);
const TRAJECTORY_THRESHOLD: Score = dec!(5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One dated item on the forward calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineSignal {
    pub name: String,
    pub lead_days: i64,
    pub confidence: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineCluster {
    /// Inclusive start, in days from the evaluation date
    pub start_day: i64,
    pub end_day: i64,
    pub obligation_count: usize,
    pub obligations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DensityLevel {
    High,
    Medium,
    Low,
}

impl DensityLevel {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => DensityLevel::Low,
            1 | 2 => DensityLevel::Medium,
            _ => DensityLevel::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDensity {
    pub month: u32,
    pub month_name: String,
    pub obligation_count: usize,
    pub density: DensityLevel,
    pub key_deadlines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearTermRisk {
    pub next_30_days: Score,
    pub next_90_days: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTrajectory {
    Increasing,
    Stable,
    Decreasing,
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Calendar confidence grows with lead time, capped at 0.95.
fn calendar_confidence(lead_days: i64) -> Rate {
    (dec!(0.70) + dec!(0.005) * Decimal::from(lead_days)).min(dec!(0.95))
}

fn sector_confidence(frequency: &str) -> Rate {
    if frequency.eq_ignore_ascii_case("annual") {
        dec!(0.65)
    } else {
        dec!(0.55)
    }
}

/// Every dated item still ahead of the evaluation date: calendar filings,
/// sector renewals inside the 90-day horizon and the caller's obligations
/// (weighted by their enforcement probability).
pub fn deadline_signals(
    upcoming: &[UpcomingDeadline],
    recurring: &[RecurringObligation],
    risks: &[ObligationRisk],
) -> Vec<DeadlineSignal> {
    let calendar = upcoming.iter().filter_map(|d| {
        let lead = d.days_until.filter(|&days| days > 0)?;
        Some(DeadlineSignal {
            name: d.name.clone(),
            lead_days: lead,
            confidence: calendar_confidence(lead),
        })
    });
    let sector = recurring
        .iter()
        .filter(|o| o.advance_days <= SECTOR_HORIZON_DAYS)
        .map(|o| DeadlineSignal {
            name: o.name.clone(),
            lead_days: i64::from(o.advance_days),
            confidence: sector_confidence(&o.frequency),
        });
    let own = risks.iter().filter_map(|r| {
        let lead = r.days_remaining.filter(|&days| days > 0)?;
        Some(DeadlineSignal {
            name: r.obligation_name.clone(),
            lead_days: lead,
            confidence: r.enforcement_probability,
        })
    });

    let mut signals: Vec<DeadlineSignal> = calendar.chain(sector).chain(own).collect();
    signals.sort_by_key(|s| s.lead_days);
    signals
}

// ---------------------------------------------------------------------------
// Clusters
// ---------------------------------------------------------------------------

/// Two-week buckets holding at least `CLUSTER_THRESHOLD` deadlines, nearest
/// bucket first.
pub fn deadline_clusters(signals: &[DeadlineSignal]) -> Vec<DeadlineCluster> {
    let mut buckets: BTreeMap<i64, Vec<&DeadlineSignal>> = BTreeMap::new();
    for signal in signals.iter().filter(|s| s.lead_days > 0) {
        buckets
            .entry(signal.lead_days / CLUSTER_WINDOW_DAYS)
            .or_default()
            .push(signal);
    }

    buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= CLUSTER_THRESHOLD)
        .map(|(bucket, members)| {
            let start_day = bucket * CLUSTER_WINDOW_DAYS;
            DeadlineCluster {
                start_day,
                end_day: start_day + CLUSTER_WINDOW_DAYS,
                obligation_count: members.len(),
                obligations: members.iter().map(|s| s.name.clone()).collect(),
            }
        })
        .collect()
}

/// A cluster counts as one more near-term item, dated at its bucket start.
fn cluster_signals(clusters: &[DeadlineCluster]) -> impl Iterator<Item = DeadlineSignal> + '_ {
    clusters.iter().map(|c| DeadlineSignal {
        name: format!("Deadline cluster: {} obligations", c.obligation_count),
        lead_days: c.start_day,
        confidence: CLUSTER_CONFIDENCE,
    })
}

// ---------------------------------------------------------------------------
// Density map
// ---------------------------------------------------------------------------

/// Statutory filings per calendar month, January first.
pub fn compliance_density() -> Vec<MonthlyDensity> {
    (1u32..=12)
        .map(|month| {
            let key_deadlines: Vec<String> = COMPLIANCE_CALENDAR
                .iter()
                .filter(|e| e.month == month)
                .map(|e| e.name.to_string())
                .collect();
            let month_name = u8::try_from(month)
                .ok()
                .and_then(|m| Month::try_from(m).ok())
                .map(|m| m.name().to_string())
                .unwrap_or_default();
            MonthlyDensity {
                month,
                month_name,
                obligation_count: key_deadlines.len(),
                density: DensityLevel::from_count(key_deadlines.len()),
                key_deadlines,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Near-term risk
// ---------------------------------------------------------------------------

/// Each item due within `horizon_days` adds confidence x urgency x 20, where
/// urgency falls linearly from 1 today to a floor of 0.1 at the horizon.
/// Capped at 100; an empty horizon sits at the baseline.
pub fn near_term_risk(signals: &[DeadlineSignal], horizon_days: i64) -> Score {
    if horizon_days <= 0 {
        return BASELINE_NEAR_TERM_RISK;
    }
    let horizon = Decimal::from(horizon_days);
    let relevant: Vec<&DeadlineSignal> = signals
        .iter()
        .filter(|s| (0..=horizon_days).contains(&s.lead_days))
        .collect();
    if relevant.is_empty() {
        return BASELINE_NEAR_TERM_RISK;
    }

    let weighted = relevant.iter().fold(Decimal::ZERO, |acc, s| {
        let urgency = (Decimal::ONE - Decimal::from(s.lead_days) / horizon).max(MIN_URGENCY);
        acc + s.confidence * urgency * RISK_PER_DEADLINE
    });
    weighted.min(dec!(100)).round_dp(1)
}

pub fn near_term_profile(signals: &[DeadlineSignal], clusters: &[DeadlineCluster]) -> NearTermRisk {
    let all: Vec<DeadlineSignal> = signals
        .iter()
        .cloned()
        .chain(cluster_signals(clusters))
        .collect();
    NearTermRisk {
        next_30_days: near_term_risk(&all, 30),
        next_90_days: near_term_risk(&all, 90),
    }
}

// ---------------------------------------------------------------------------
// Trajectory
// ---------------------------------------------------------------------------

fn mean(values: &[Score]) -> Score {
    values.iter().copied().sum::<Decimal>() / Decimal::from(values.len())
}

/// Compares the mean of the later half of the last ten scores (oldest
/// first) against the earlier half; a move beyond 5 points is a trend.
pub fn risk_trajectory(history: &[Score]) -> RiskTrajectory {
    let recent = &history[history.len().saturating_sub(TRAJECTORY_WINDOW)..];
    if recent.len() < 2 {
        return RiskTrajectory::Stable;
    }
    let (first, second) = recent.split_at(recent.len() / 2);
    let diff = mean(second) - mean(first);
    if diff > TRAJECTORY_THRESHOLD {
        RiskTrajectory::Increasing
    } else if diff < -TRAJECTORY_THRESHOLD {
        RiskTrajectory::Decreasing
    } else {
        RiskTrajectory::Stable
    }
}
