pub mod benchmark;
pub mod evaluate;
pub mod impact;
pub mod profitability;
pub mod risk;
pub mod sustainability;

use chrono::{DateTime, Utc};
use clap::Args;
use serde_json::Value;

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Flags shared by every scoring command
#[derive(Args)]
pub struct RequestArgs {
    /// JSON or YAML request file (otherwise JSON piped on stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation instant in RFC 3339; overrides `as_of` in the input
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,
}

impl RequestArgs {
    pub fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn apply_as_of(&self, as_of: &mut DateTime<Utc>) {
        if let Some(instant) = self.as_of {
            *as_of = instant;
        }
    }
}
