pub mod benchmarks;
pub mod classify;
pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod math;
pub mod policy;
pub mod profile;
pub mod time_value;
pub mod types;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "profitability")]
pub mod profitability;

#[cfg(feature = "sustainability")]
pub mod sustainability;

#[cfg(feature = "impact")]
pub mod impact;

#[cfg(feature = "peer_benchmark")]
pub mod peer_benchmark;

pub use config::EngineConfig;
pub use engine::ScoringEngine;
pub use error::MsmeScoreError;
pub use types::*;

#[cfg(feature = "impact")]
pub use engine::{EvaluationReport, EvaluationRequest};

/// Standard result type for all scoring operations
pub type MsmeScoreResult<T> = Result<T, MsmeScoreError>;
