use clap::Args;

use msme_score_core::profitability::ProfitabilityInput;
use msme_score_core::ScoringEngine;

use super::{CommandResult, RequestArgs};
use crate::input;

/// Arguments for the profitability model
#[derive(Args)]
pub struct ProfitabilityArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Override the number of documents processed
    #[arg(long)]
    pub documents: Option<u32>,
}

pub fn run_profitability(args: ProfitabilityArgs, engine: &ScoringEngine) -> CommandResult {
    let mut profit_input: ProfitabilityInput =
        input::read_request(args.request.input_path(), "profitability")?;
    args.request.apply_as_of(&mut profit_input.as_of);
    if let Some(documents) = args.documents {
        profit_input.documents_processed = documents;
    }

    let result = engine.analyze_profitability(&profit_input)?;
    Ok(serde_json::to_value(result)?)
}
