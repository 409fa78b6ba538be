use chrono::Utc;
use clap::Args;

use msme_score_core::profile::BusinessProfile;
use msme_score_core::sustainability::SustainabilityInput;
use msme_score_core::ScoringEngine;

use super::{CommandResult, RequestArgs};
use crate::input;

/// Arguments for the sustainability model
#[derive(Args)]
pub struct SustainabilityArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Documents processed (overrides the input file)
    #[arg(long)]
    pub documents: Option<u32>,

    /// Scheme applications handled alongside the documents
    #[arg(long)]
    pub schemes: Option<u32>,

    /// Business sector, used for SDG tagging
    #[arg(long)]
    pub sector: Option<String>,

    /// Owner category, e.g. "women" or "sc/st"
    #[arg(long)]
    pub owner_category: Option<String>,
}

pub fn run_sustainability(args: SustainabilityArgs, engine: &ScoringEngine) -> CommandResult {
    let mut sus_input: SustainabilityInput =
        match input::read_optional_request(args.request.input_path())? {
            Some(parsed) => parsed,
            None => SustainabilityInput {
                documents_processed: args
                    .documents
                    .ok_or("--documents is required (or provide --input)")?,
                schemes_matched: 0,
                profile: BusinessProfile::default(),
                as_of: Utc::now(),
            },
        };

    args.request.apply_as_of(&mut sus_input.as_of);
    if let Some(documents) = args.documents {
        sus_input.documents_processed = documents;
    }
    if let Some(schemes) = args.schemes {
        sus_input.schemes_matched = schemes;
    }
    if let Some(sector) = args.sector {
        sus_input.profile.sector = sector;
    }
    if let Some(owner) = args.owner_category {
        sus_input.profile.owner_category = owner;
    }

    let result = engine.assess_sustainability(&sus_input)?;
    Ok(serde_json::to_value(result)?)
}
