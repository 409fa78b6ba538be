use clap::Args;

use msme_score_core::impact::ImpactInput;
use msme_score_core::ScoringEngine;

use super::{CommandResult, RequestArgs};
use crate::input;

/// Arguments for the composite impact score over precomputed signals
#[derive(Args)]
pub struct ImpactArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

pub fn run_impact(args: ImpactArgs, engine: &ScoringEngine) -> CommandResult {
    let mut impact_input: ImpactInput = input::read_request(args.request.input_path(), "impact")?;
    args.request.apply_as_of(&mut impact_input.as_of);

    let result = engine.calculate_impact(&impact_input)?;
    Ok(serde_json::to_value(result)?)
}
