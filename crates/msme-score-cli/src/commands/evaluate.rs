use clap::Args;

use msme_score_core::{EvaluationRequest, ScoringEngine};

use super::{CommandResult, RequestArgs};
use crate::input;

/// Arguments for the full risk, profitability, sustainability and impact pipeline
#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Override the number of documents processed
    #[arg(long)]
    pub documents: Option<u32>,
}

pub fn run_evaluate(args: EvaluateArgs, engine: &ScoringEngine) -> CommandResult {
    let mut request: EvaluationRequest =
        input::read_request(args.request.input_path(), "evaluate")?;
    args.request.apply_as_of(&mut request.as_of);
    if let Some(documents) = args.documents {
        request.documents_processed = documents;
    }

    let result = engine.evaluate(&request)?;
    Ok(serde_json::to_value(result)?)
}
