//! Validated entry point to every scoring model.

use crate::config::EngineConfig;
use crate::types::ComputationOutput;
use crate::MsmeScoreResult;

#[cfg(feature = "risk")]
use crate::risk::{ComplianceRiskInput, ComplianceRiskReport};

#[cfg(feature = "profitability")]
use crate::profitability::{ProfitabilityInput, ProfitabilityReport};

#[cfg(feature = "sustainability")]
use crate::sustainability::{SustainabilityInput, SustainabilityReport};

#[cfg(feature = "impact")]
use crate::impact::{ImpactInput, ImpactReport};

#[cfg(feature = "peer_benchmark")]
use crate::peer_benchmark::{PeerBenchmarkInput, PeerBenchmarkReport};

/// Holds a configuration that has passed validation. Models never
/// re-check it per call.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: EngineConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl ScoringEngine {
    pub fn new(config: EngineConfig) -> MsmeScoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[cfg(feature = "risk")]
    pub fn assess_compliance_risk(
        &self,
        input: &ComplianceRiskInput,
    ) -> MsmeScoreResult<ComputationOutput<ComplianceRiskReport>> {
        crate::risk::assess_compliance_risk(&self.config, input)
    }

    #[cfg(feature = "profitability")]
    pub fn analyze_profitability(
        &self,
        input: &ProfitabilityInput,
    ) -> MsmeScoreResult<ComputationOutput<ProfitabilityReport>> {
        crate::profitability::analyze_profitability(&self.config, input)
    }

    #[cfg(feature = "sustainability")]
    pub fn assess_sustainability(
        &self,
        input: &SustainabilityInput,
    ) -> MsmeScoreResult<ComputationOutput<SustainabilityReport>> {
        crate::sustainability::assess_sustainability(&self.config, input)
    }

    #[cfg(feature = "impact")]
    pub fn calculate_impact(
        &self,
        input: &ImpactInput,
    ) -> MsmeScoreResult<ComputationOutput<ImpactReport>> {
        crate::impact::calculate_impact(input)
    }

    #[cfg(feature = "peer_benchmark")]
    pub fn benchmark_peers(
        &self,
        input: &PeerBenchmarkInput,
    ) -> MsmeScoreResult<ComputationOutput<PeerBenchmarkReport>> {
        crate::peer_benchmark::benchmark_peers(input)
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[cfg(feature = "impact")]
pub use pipeline::{EvaluationReport, EvaluationRequest};

#[cfg(feature = "impact")]
mod pipeline {
    use std::time::Instant;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use tracing::warn;

    use super::ScoringEngine;
    use crate::impact::{
        build_impact_report, ImpactInput, ImpactReport, ProfitabilitySignal, RiskSignal,
        SustainabilitySignal,
    };
    use crate::policy::PolicyAnalysis;
    use crate::profile::BusinessProfile;
    use crate::profitability::{build_profitability_report, ProfitabilityInput, ProfitabilityReport};
    use crate::profitability::SchemeBenefit;
    use crate::risk::{build_risk_report, ComplianceRiskInput, ComplianceRiskReport};
    use crate::sustainability::{
        build_sustainability_report, SustainabilityInput, SustainabilityReport,
    };
    use crate::types::{with_metadata, ComputationOutput, Score};
    use crate::MsmeScoreResult;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct EvaluationRequest {
        pub analysis: PolicyAnalysis,
        #[serde(default)]
        pub profile: BusinessProfile,
        #[serde(default)]
        pub schemes: Option<Vec<SchemeBenefit>>,
        #[serde(default = "default_documents")]
        pub documents_processed: u32,
        #[serde(default = "Utc::now")]
        pub as_of: DateTime<Utc>,
        /// Earlier overall risk scores, oldest first
        #[serde(default)]
        pub risk_history: Vec<Score>,
    }

    fn default_documents() -> u32 {
        1
    }

    /// Every sub-report of one evaluation. A sub-model that failed is
    /// `None` and contributes a zeroed signal to the composite.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EvaluationReport {
        pub risk: ComplianceRiskReport,
        pub profitability: Option<ProfitabilityReport>,
        pub sustainability: Option<SustainabilityReport>,
        pub impact: Option<ImpactReport>,
    }

    impl ScoringEngine {
        /// Risk, then profitability and sustainability, then the composite.
        /// A failing sub-model is isolated: its signal is zeroed, a warning
        /// is recorded and the remaining models still run.
        pub fn evaluate(
            &self,
            request: &EvaluationRequest,
        ) -> MsmeScoreResult<ComputationOutput<EvaluationReport>> {
            let start = Instant::now();
            let config = self.config();
            let mut warnings = Vec::new();

            let risk = build_risk_report(
                config,
                &ComplianceRiskInput {
                    analysis: request.analysis.clone(),
                    profile: request.profile.clone(),
                    as_of: request.as_of,
                    risk_history: request.risk_history.clone(),
                },
            );

            let profitability = match build_profitability_report(
                config,
                &ProfitabilityInput {
                    analysis: request.analysis.clone(),
                    profile: request.profile.clone(),
                    schemes: request.schemes.clone(),
                    documents_processed: request.documents_processed,
                    as_of: request.as_of,
                },
            ) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, "profitability model failed");
                    warnings.push(format!("Profitability model failed: {e}"));
                    None
                }
            };

            let schemes_matched = match (&profitability, &request.schemes) {
                (Some(p), _) => p.scheme_benefits.len() as u32,
                (None, Some(list)) => list.len() as u32,
                (None, None) => 0,
            };
            let sustainability = match build_sustainability_report(
                config,
                &SustainabilityInput {
                    documents_processed: request.documents_processed,
                    schemes_matched,
                    profile: request.profile.clone(),
                    as_of: request.as_of,
                },
            ) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, "sustainability model failed");
                    warnings.push(format!("Sustainability model failed: {e}"));
                    None
                }
            };

            let impact_input = ImpactInput {
                risk: RiskSignal::from(&risk),
                profitability: profitability
                    .as_ref()
                    .map(ProfitabilitySignal::from)
                    .unwrap_or_default(),
                sustainability: sustainability
                    .as_ref()
                    .map(SustainabilitySignal::from)
                    .unwrap_or_default(),
                profile: request.profile.clone(),
                documents_processed: request.documents_processed,
                as_of: request.as_of,
            };
            let impact = match build_impact_report(&impact_input) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, "impact model failed");
                    warnings.push(format!("Impact model failed: {e}"));
                    None
                }
            };

            let mut diagnostics = risk.diagnostics.clone();
            if let Some(p) = &profitability {
                diagnostics.merge(&p.diagnostics);
            }
            warnings.extend(diagnostics.warnings());

            let assumptions = serde_json::json!({
                "config": config,
                "documents_processed": request.documents_processed,
                "schemes_supplied": request.schemes.is_some(),
                "as_of": request.as_of,
            });

            let elapsed = start.elapsed().as_micros() as u64;
            Ok(with_metadata(
                "Risk -> {profitability, sustainability} -> composite impact, with per-model isolation",
                &assumptions,
                warnings,
                elapsed,
                EvaluationReport {
                    risk,
                    profitability,
                    sustainability,
                    impact,
                },
            ))
        }
    }
}
