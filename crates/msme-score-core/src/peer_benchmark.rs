//! Five-dimension comparison against calibrated sector peer tables.
//!
//! Percentiles use the logistic approximation of the normal CDF,
//! 100 / (1 + e^(-1.7z)). The peer tables are synthetic calibrations and
//! every percentile, peer count and rank here is a heuristic estimate.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::{
    national_peer_count, peer_stats, size_adjustment, state_peer_share, DimensionStats,
};
use crate::math::{clamp, exp};
use crate::profile::{BusinessProfile, Sector};
use crate::types::{with_metadata, ComputationOutput, Score};
use crate::MsmeScoreResult;

const LOGISTIC_SLOPE: Decimal = dec!(1.7);
const MAX_LISTED: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenchmarkDimension {
    Compliance,
    Risk,
    SchemeUtilisation,
    PenaltyExposure,
    Sustainability,
}

impl BenchmarkDimension {
    /// Order matches the rows of `peer_stats`.
    pub const ALL: [BenchmarkDimension; 5] = [
        BenchmarkDimension::Compliance,
        BenchmarkDimension::Risk,
        BenchmarkDimension::SchemeUtilisation,
        BenchmarkDimension::PenaltyExposure,
        BenchmarkDimension::Sustainability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BenchmarkDimension::Compliance => "COMPLIANCE",
            BenchmarkDimension::Risk => "RISK",
            BenchmarkDimension::SchemeUtilisation => "SCHEME_UTILISATION",
            BenchmarkDimension::PenaltyExposure => "PENALTY_EXPOSURE",
            BenchmarkDimension::Sustainability => "SUSTAINABILITY",
        }
    }

    pub fn lower_is_better(self) -> bool {
        matches!(
            self,
            BenchmarkDimension::Risk | BenchmarkDimension::PenaltyExposure
        )
    }

    fn improvement_hint(self) -> &'static str {
        match self {
            BenchmarkDimension::Compliance => {
                "Focus on timely filings and document management. Automated reminders help close the gap."
            }
            BenchmarkDimension::Risk => {
                "Reduce risk exposure by addressing critical obligations first. Target overdue items to improve quickly."
            }
            BenchmarkDimension::SchemeUtilisation => {
                "Benefits are being left on the table. Review matched schemes and apply for at least 2 applicable ones."
            }
            BenchmarkDimension::PenaltyExposure => {
                "Penalty risk is higher than average. Prioritise obligations with the highest penalty amounts."
            }
            BenchmarkDimension::Sustainability => {
                "Adopt digital-first processes and track paper and energy usage. Small operational changes lift the sustainability score significantly."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenchmarkTier {
    #[serde(rename = "TOP_10")]
    Top10,
    AboveAverage,
    Average,
    BelowAverage,
    #[serde(rename = "BOTTOM_20")]
    Bottom20,
}

impl BenchmarkTier {
    pub fn from_percentile(percentile: Score) -> Self {
        if percentile >= dec!(90) {
            BenchmarkTier::Top10
        } else if percentile >= dec!(60) {
            BenchmarkTier::AboveAverage
        } else if percentile >= dec!(40) {
            BenchmarkTier::Average
        } else if percentile >= dec!(20) {
            BenchmarkTier::BelowAverage
        } else {
            BenchmarkTier::Bottom20
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BenchmarkTier::Top10 => "TOP_10",
            BenchmarkTier::AboveAverage => "ABOVE_AVERAGE",
            BenchmarkTier::Average => "AVERAGE",
            BenchmarkTier::BelowAverage => "BELOW_AVERAGE",
            BenchmarkTier::Bottom20 => "BOTTOM_20",
        }
    }

    fn is_ahead(self) -> bool {
        matches!(self, BenchmarkTier::Top10 | BenchmarkTier::AboveAverage)
    }
}

/// The firm's own 0-100 scores. Missing dimensions default to 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserScores {
    pub compliance: Score,
    pub risk: Score,
    pub scheme_utilisation: Score,
    pub penalty_exposure: Score,
    pub sustainability: Score,
}

impl Default for UserScores {
    fn default() -> Self {
        Self {
            compliance: dec!(50),
            risk: dec!(50),
            scheme_utilisation: dec!(50),
            penalty_exposure: dec!(50),
            sustainability: dec!(50),
        }
    }
}

impl UserScores {
    fn get(&self, dimension: BenchmarkDimension) -> Score {
        match dimension {
            BenchmarkDimension::Compliance => self.compliance,
            BenchmarkDimension::Risk => self.risk,
            BenchmarkDimension::SchemeUtilisation => self.scheme_utilisation,
            BenchmarkDimension::PenaltyExposure => self.penalty_exposure,
            BenchmarkDimension::Sustainability => self.sustainability,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerBenchmarkInput {
    #[serde(default)]
    pub scores: UserScores,
    #[serde(default)]
    pub profile: BusinessProfile,
    #[serde(default = "Utc::now")]
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBenchmark {
    pub dimension: BenchmarkDimension,
    pub user_score: Score,
    /// Size-adjusted sector mean
    pub sector_average: Score,
    pub sector_median: Score,
    pub sector_top_10: Score,
    pub percentile_rank: Score,
    pub tier: BenchmarkTier,
    /// Positive means better than average, for either direction of scoring
    pub gap_to_average: Decimal,
    pub improvement_opportunity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerComparison {
    pub peer_group: String,
    /// Estimated from registry shares, not a count of real peers
    pub peer_count: u32,
    pub user_overall_score: Score,
    pub peer_average_score: Score,
    pub user_rank: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerBenchmarkReport {
    pub business_name: String,
    pub sector: Sector,
    pub state: String,
    pub size_category: String,
    pub dimensions: Vec<DimensionBenchmark>,
    pub peer_comparison: PeerComparison,
    pub overall_percentile: Score,
    pub overall_tier: BenchmarkTier,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Logistic approximation of the normal CDF, in [1, 99]. A degenerate
/// distribution puts everyone at the median.
pub fn approximate_percentile(value: Score, mean: Score, stdev: Score) -> Score {
    if stdev <= Decimal::ZERO {
        return dec!(50);
    }
    let z = (value - mean) / stdev;
    let pct = dec!(100) / (Decimal::ONE + exp(-LOGISTIC_SLOPE * z));
    clamp(pct, Decimal::ONE, dec!(99))
}

fn benchmark_dimension(
    dimension: BenchmarkDimension,
    user: Score,
    stats: &DimensionStats,
    size_adj: Decimal,
) -> DimensionBenchmark {
    let avg = stats.mean + size_adj;
    let median = stats.median + size_adj;

    let raw = approximate_percentile(user, avg, stats.stdev);
    let (percentile, gap) = if dimension.lower_is_better() {
        (dec!(100) - raw, avg - user)
    } else {
        (raw, user - avg)
    };
    let tier = BenchmarkTier::from_percentile(percentile);
    let improvement = if tier.is_ahead() {
        "Maintain current performance. You're ahead of most peers.".to_string()
    } else {
        dimension.improvement_hint().to_string()
    };

    DimensionBenchmark {
        dimension,
        user_score: user.round_dp(1),
        sector_average: avg.round_dp(1),
        sector_median: median.round_dp(1),
        sector_top_10: stats.p90.round_dp(1),
        percentile_rank: percentile.round_dp(1),
        tier,
        gap_to_average: gap.round_dp(1),
        improvement_opportunity: improvement,
    }
}

fn title_case(text: &str) -> String {
    text.split(|c: char| c == ' ' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn mean_percentile(dims: &[DimensionBenchmark]) -> Score {
    if dims.is_empty() {
        return dec!(50);
    }
    dims.iter().map(|d| d.percentile_rank).sum::<Decimal>() / Decimal::from(dims.len())
}

fn peer_comparison(
    dims: &[DimensionBenchmark],
    profile: &BusinessProfile,
    state: &str,
) -> PeerComparison {
    let size = profile.size_category();
    let sector = profile.sector_class();
    let peer_group = format!(
        "{} {} - {}",
        size.label(),
        title_case(sector.key()),
        title_case(state)
    );

    let national = Decimal::from(national_peer_count(size));
    let peer_count = (national * state_peer_share(profile.region_key()))
        .floor()
        .to_u32()
        .unwrap_or(0);

    let overall = mean_percentile(dims);
    let rank = (Decimal::from(peer_count) * (dec!(100) - overall) / dec!(100))
        .floor()
        .to_u32()
        .unwrap_or(0);

    let mut sorted: Vec<&DimensionBenchmark> = dims.iter().collect();
    sorted.sort_by(|a, b| b.percentile_rank.cmp(&a.percentile_rank));

    let strengths: Vec<String> = sorted
        .iter()
        .filter(|d| d.percentile_rank >= dec!(60))
        .take(MAX_LISTED)
        .map(|d| {
            format!(
                "{}: {}th percentile ({})",
                d.dimension.label(),
                d.percentile_rank.round(),
                d.tier.label()
            )
        })
        .collect();
    let weaknesses: Vec<String> = sorted
        .iter()
        .filter(|d| d.percentile_rank < dec!(40))
        .take(MAX_LISTED)
        .map(|d| {
            format!(
                "{}: {}th percentile. {}",
                d.dimension.label(),
                d.percentile_rank.round(),
                d.improvement_opportunity
            )
        })
        .collect();

    PeerComparison {
        peer_group,
        peer_count,
        user_overall_score: overall.round_dp(1),
        peer_average_score: dec!(50),
        user_rank: rank.max(1),
        strengths: if strengths.is_empty() {
            vec!["No standout strengths yet.".to_string()]
        } else {
            strengths
        },
        weaknesses: if weaknesses.is_empty() {
            vec!["No critical weaknesses identified.".to_string()]
        } else {
            weaknesses
        },
    }
}

fn sector_tip(sector: Sector) -> Option<&'static str> {
    match sector {
        Sector::Manufacturing => Some(
            "Manufacturing MSMEs benefit significantly from environmental compliance and factory \
             safety certifications, which also lift sustainability and compliance scores.",
        ),
        Sector::Trading => Some(
            "Trading businesses often miss GST-related scheme benefits. Keep the Udyam \
             registration current for maximum advantage.",
        ),
        Sector::Handicraft => Some(
            "Handicraft businesses have strong government support. Explore SFURTI and GI tag \
             benefits to improve both income and benchmarks.",
        ),
        Sector::Service | Sector::Other => None,
    }
}

fn recommendations(dims: &[DimensionBenchmark], sector: Sector) -> Vec<String> {
    let mut recs = Vec::new();

    // first maximum and first minimum, in dimension order
    let strongest = dims
        .iter()
        .fold(None::<&DimensionBenchmark>, |best, d| match best {
            Some(b) if b.percentile_rank >= d.percentile_rank => Some(b),
            _ => Some(d),
        });
    let weakest = dims
        .iter()
        .fold(None::<&DimensionBenchmark>, |worst, d| match worst {
            Some(w) if w.percentile_rank <= d.percentile_rank => Some(w),
            _ => Some(d),
        });

    if let Some(s) = strongest {
        recs.push(format!(
            "Strongest area: {} ({}th percentile). Keep up the good work.",
            s.dimension.label(),
            s.percentile_rank.round()
        ));
    }
    if let Some(w) = weakest.filter(|w| w.percentile_rank < dec!(40)) {
        recs.push(format!(
            "Priority improvement: {} ({}th percentile). {}",
            w.dimension.label(),
            w.percentile_rank.round(),
            w.improvement_opportunity
        ));
    }
    if dims
        .iter()
        .any(|d| d.dimension == BenchmarkDimension::SchemeUtilisation && d.percentile_rank < dec!(50))
    {
        recs.push(
            "Many MSMEs in this sector draw more from government schemes. Check scheme matching \
             for easy-to-apply opportunities."
                .to_string(),
        );
    }
    if let Some(tip) = sector_tip(sector) {
        recs.push(tip.to_string());
    }
    recs
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

pub(crate) fn build_peer_benchmark(input: &PeerBenchmarkInput) -> PeerBenchmarkReport {
    let profile = &input.profile;
    let sector = profile.sector_class();
    let size = profile.size_category();
    let size_adj = size_adjustment(size);
    let stats = peer_stats(sector);

    let dimensions: Vec<DimensionBenchmark> = BenchmarkDimension::ALL
        .iter()
        .zip(stats.iter())
        .map(|(dim, s)| benchmark_dimension(*dim, input.scores.get(*dim), s, size_adj))
        .collect();

    let state = match profile.state.trim() {
        "" => "Unknown",
        s => s,
    };
    let peer_comparison = peer_comparison(&dimensions, profile, state);
    let overall = mean_percentile(&dimensions);
    debug!(%sector, %overall, "peer benchmark");

    PeerBenchmarkReport {
        business_name: profile.display_name().to_string(),
        sector,
        state: state.to_string(),
        size_category: size.label().to_string(),
        recommendations: recommendations(&dimensions, sector),
        dimensions,
        peer_comparison,
        overall_percentile: overall.round_dp(1),
        overall_tier: BenchmarkTier::from_percentile(overall),
        generated_at: input.as_of,
    }
}

/// Rank a firm's five dimension scores against size-adjusted sector peers.
pub(crate) fn benchmark_peers(
    input: &PeerBenchmarkInput,
) -> MsmeScoreResult<ComputationOutput<PeerBenchmarkReport>> {
    let start = Instant::now();
    let report = build_peer_benchmark(input);

    let warnings = vec![
        "Peer statistics are calibrated synthetic estimates, not observed distributions".to_string(),
    ];
    let assumptions = serde_json::json!({
        "percentile_model": "100 / (1 + exp(-1.7 z)), clamped to [1, 99]",
        "size_adjustment": size_adjustment(input.profile.size_category()),
        "as_of": input.as_of,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Logistic percentile against size-adjusted sector peer tables",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn input(scores: UserScores, sector: &str, size: &str, state: &str) -> PeerBenchmarkInput {
        PeerBenchmarkInput {
            scores,
            profile: BusinessProfile {
                business_name: Some("Rajan Manufacturing".into()),
                sector: sector.into(),
                size: size.into(),
                state: state.into(),
                ..Default::default()
            },
            as_of: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_percentile_at_mean_is_median() {
        assert_eq!(approximate_percentile(dec!(50), dec!(50), dec!(17)), dec!(50));
        assert_eq!(approximate_percentile(dec!(70), dec!(50), Decimal::ZERO), dec!(50));
    }

    #[test]
    fn test_percentile_clamped() {
        assert_eq!(approximate_percentile(dec!(100), dec!(10), dec!(5)), dec!(99));
        assert_eq!(approximate_percentile(Decimal::ZERO, dec!(90), dec!(5)), Decimal::ONE);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(BenchmarkTier::from_percentile(dec!(90)), BenchmarkTier::Top10);
        assert_eq!(BenchmarkTier::from_percentile(dec!(60)), BenchmarkTier::AboveAverage);
        assert_eq!(BenchmarkTier::from_percentile(dec!(40)), BenchmarkTier::Average);
        assert_eq!(BenchmarkTier::from_percentile(dec!(20)), BenchmarkTier::BelowAverage);
        assert_eq!(BenchmarkTier::from_percentile(dec!(19.9)), BenchmarkTier::Bottom20);
        assert_eq!(serde_json::to_value(BenchmarkTier::Top10).unwrap(), "TOP_10");
        assert_eq!(
            serde_json::to_value(BenchmarkTier::AboveAverage).unwrap(),
            "ABOVE_AVERAGE"
        );
    }

    #[test]
    fn test_lower_is_better_inverted() {
        // small manufacturing: risk mean 58, penalty mean 45
        let scores = UserScores {
            risk: dec!(20),
            penalty_exposure: dec!(80),
            ..Default::default()
        };
        let report = build_peer_benchmark(&input(scores, "manufacturing", "small", "Maharashtra"));
        let risk = &report.dimensions[1];
        assert_eq!(risk.dimension, BenchmarkDimension::Risk);
        assert!(risk.percentile_rank > dec!(90), "{}", risk.percentile_rank);
        assert_eq!(risk.gap_to_average, dec!(38));
        let penalty = &report.dimensions[3];
        assert!(penalty.percentile_rank < dec!(10));
        assert_eq!(penalty.gap_to_average, dec!(-35));
        assert_eq!(penalty.tier, BenchmarkTier::Bottom20);
    }

    #[test]
    fn test_size_adjustment_applied() {
        let report = build_peer_benchmark(&input(UserScores::default(), "manufacturing", "micro", ""));
        assert_eq!(report.dimensions[0].sector_average, dec!(47));
        assert_eq!(report.dimensions[0].sector_median, dec!(45));
        assert_eq!(report.dimensions[0].sector_top_10, dec!(82));
        assert_eq!(report.size_category, "Micro");
        assert_eq!(report.state, "Unknown");
    }

    #[test]
    fn test_peer_group_and_rank() {
        let report = build_peer_benchmark(&input(UserScores::default(), "manufacturing", "small", "Maharashtra"));
        let peers = &report.peer_comparison;
        assert_eq!(peers.peer_group, "Small Manufacturing - Maharashtra");
        // 12000 x 0.15
        assert_eq!(peers.peer_count, 1_800);
        assert!(peers.user_rank >= 1 && peers.user_rank <= peers.peer_count);
        assert_eq!(peers.peer_average_score, dec!(50));
    }

    #[test]
    fn test_strength_and_weakness_fallbacks() {
        // Service, small, every score at the size-adjusted mean for the
        // higher-is-better dimensions keeps percentiles in the middle band.
        let scores = UserScores {
            compliance: dec!(58),
            risk: dec!(48),
            scheme_utilisation: dec!(32),
            penalty_exposure: dec!(38),
            sustainability: dec!(42),
        };
        let report = build_peer_benchmark(&input(scores, "software services", "small", "Kerala"));
        assert!(report.dimensions.iter().all(|d| d.percentile_rank == dec!(50)));
        assert_eq!(report.peer_comparison.strengths, vec!["No standout strengths yet."]);
        assert_eq!(
            report.peer_comparison.weaknesses,
            vec!["No critical weaknesses identified."]
        );
        assert_eq!(report.overall_tier, BenchmarkTier::Average);
        // strongest only (no weak dimension, schemes at 50, no service tip)
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].starts_with("Strongest area: COMPLIANCE"));
    }

    #[test]
    fn test_handicraft_recommendations() {
        let scores = UserScores {
            scheme_utilisation: Decimal::ZERO,
            ..Default::default()
        };
        let report = build_peer_benchmark(&input(scores, "handloom weaving", "micro", "Gujarat"));
        let recs = &report.recommendations;
        assert!(recs.iter().any(|r| r.starts_with("Priority improvement: SCHEME_UTILISATION")));
        assert!(recs.iter().any(|r| r.contains("government schemes")));
        assert!(recs.last().unwrap().contains("SFURTI"));
    }

    #[test]
    fn test_envelope_labels_estimate() {
        let out = benchmark_peers(&input(UserScores::default(), "trading", "small", "Delhi")).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.sector, Sector::Trading);
    }
}
