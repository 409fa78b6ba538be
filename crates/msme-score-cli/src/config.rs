use msme_score_core::{EngineConfig, ScoringEngine};
use tracing::debug;

use crate::input;

/// Build the engine from an optional JSON or YAML override file.
pub fn load_engine(path: Option<&str>) -> Result<ScoringEngine, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(ScoringEngine::default());
    };

    let config: EngineConfig = input::read_file(path)?;
    debug!(path, "loaded engine config");
    Ok(ScoringEngine::new(config)?)
}
