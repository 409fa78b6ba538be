use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;

use msme_score_core::peer_benchmark::{PeerBenchmarkInput, UserScores};
use msme_score_core::profile::BusinessProfile;
use msme_score_core::ScoringEngine;

use super::{CommandResult, RequestArgs};
use crate::input;

/// Arguments for peer benchmarking. Flags override the input file; missing
/// scores default to 50.
#[derive(Args)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Compliance score (0-100)
    #[arg(long)]
    pub compliance: Option<Decimal>,

    /// Risk score (0-100, lower is better)
    #[arg(long)]
    pub risk: Option<Decimal>,

    /// Scheme utilisation score (0-100)
    #[arg(long)]
    pub scheme_utilisation: Option<Decimal>,

    /// Penalty exposure score (0-100, lower is better)
    #[arg(long)]
    pub penalty_exposure: Option<Decimal>,

    /// Sustainability score (0-100)
    #[arg(long)]
    pub sustainability: Option<Decimal>,

    #[arg(long)]
    pub sector: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    /// micro / small / medium
    #[arg(long)]
    pub size: Option<String>,
}

pub fn run_benchmark(args: BenchmarkArgs, engine: &ScoringEngine) -> CommandResult {
    let mut bench_input: PeerBenchmarkInput =
        match input::read_optional_request(args.request.input_path())? {
            Some(parsed) => parsed,
            None => PeerBenchmarkInput {
                scores: UserScores::default(),
                profile: BusinessProfile::default(),
                as_of: Utc::now(),
            },
        };

    args.request.apply_as_of(&mut bench_input.as_of);
    let scores = &mut bench_input.scores;
    for (flag, slot) in [
        (args.compliance, &mut scores.compliance),
        (args.risk, &mut scores.risk),
        (args.scheme_utilisation, &mut scores.scheme_utilisation),
        (args.penalty_exposure, &mut scores.penalty_exposure),
        (args.sustainability, &mut scores.sustainability),
    ] {
        if let Some(value) = flag {
            *slot = value;
        }
    }

    let profile = &mut bench_input.profile;
    if let Some(sector) = args.sector {
        profile.sector = sector;
    }
    if let Some(state) = args.state {
        profile.state = state;
    }
    if let Some(size) = args.size {
        profile.size = size;
    }

    let result = engine.benchmark_peers(&bench_input)?;
    Ok(serde_json::to_value(result)?)
}
