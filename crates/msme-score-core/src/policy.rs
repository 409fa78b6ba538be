//! Structured policy-analysis records consumed by the scoring models.
//!
//! Records arrive as JSON produced by an upstream extraction step and are
//! frequently incomplete. Deserialization is therefore per record: a record
//! that fails to parse is dropped and counted in `diagnostics`, and the rest
//! of the document is still scored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::types::InputDiagnostics;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub obligation: String,
    #[serde(default = "default_severity")]
    pub severity_if_ignored: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
}

fn default_severity() -> String {
    "WARNING".to_string()
}

fn default_frequency() -> String {
    "ONE_TIME".to_string()
}

impl Obligation {
    pub fn new(name: &str, severity: &str, deadline: &str, frequency: &str) -> Self {
        Self {
            obligation: name.to_string(),
            severity_if_ignored: severity.to_string(),
            deadline: deadline.to_string(),
            frequency: frequency.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub violation: String,
    #[serde(default)]
    pub penalty_amount: String,
    #[serde(default)]
    pub other_consequences: String,
}

impl Penalty {
    pub fn new(violation: &str, amount: &str) -> Self {
        Self {
            violation: violation.to_string(),
            penalty_amount: amount.to_string(),
            other_consequences: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAction {
    pub action: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "MEDIUM".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(default)]
    pub overall_risk_level: String,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPolicyAnalysis")]
pub struct PolicyAnalysis {
    pub obligations: Vec<Obligation>,
    pub penalties: Vec<Penalty>,
    pub compliance_actions: Vec<ComplianceAction>,
    pub risk_assessment: RiskAssessment,
    /// Records dropped while parsing
    pub diagnostics: InputDiagnostics,
}

#[derive(Deserialize)]
struct RawPolicyAnalysis {
    #[serde(default)]
    obligations: Vec<Value>,
    #[serde(default)]
    penalties: Vec<Value>,
    #[serde(default)]
    compliance_actions: Vec<Value>,
    #[serde(default)]
    risk_assessment: Option<Value>,
}

impl From<RawPolicyAnalysis> for PolicyAnalysis {
    fn from(raw: RawPolicyAnalysis) -> Self {
        let mut diagnostics = InputDiagnostics::default();

        let (obligations, skipped) = parse_records::<Obligation>("obligation", raw.obligations);
        diagnostics.skipped_obligations = skipped;
        let (penalties, skipped) = parse_records::<Penalty>("penalty", raw.penalties);
        diagnostics.skipped_penalties = skipped;
        let (compliance_actions, skipped) =
            parse_records::<ComplianceAction>("compliance_action", raw.compliance_actions);
        diagnostics.skipped_actions = skipped;

        let risk_assessment = raw
            .risk_assessment
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        Self {
            obligations,
            penalties,
            compliance_actions,
            risk_assessment,
            diagnostics,
        }
    }
}

fn parse_records<T: DeserializeOwned>(kind: &str, values: Vec<Value>) -> (Vec<T>, u32) {
    let mut parsed = Vec::with_capacity(values.len());
    let mut skipped = 0u32;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => parsed.push(record),
            Err(e) => {
                skipped += 1;
                warn!(record = kind, index, error = %e, "skipping malformed record");
            }
        }
    }
    (parsed, skipped)
}

impl PolicyAnalysis {
    pub fn new(obligations: Vec<Obligation>, penalties: Vec<Penalty>) -> Self {
        Self {
            obligations,
            penalties,
            ..Default::default()
        }
    }

    pub fn with_actions(mut self, actions: Vec<ComplianceAction>) -> Self {
        self.compliance_actions = actions;
        self
    }

    pub fn risk_level(&self) -> &str {
        &self.risk_assessment.overall_risk_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_for_missing_fields() {
        let json = r#"{ "obligations": [ { "obligation": "File GSTR-3B" } ] }"#;
        let doc: PolicyAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(doc.obligations.len(), 1);
        let o = &doc.obligations[0];
        assert_eq!(o.severity_if_ignored, "WARNING");
        assert_eq!(o.deadline, "");
        assert_eq!(o.frequency, "ONE_TIME");
        assert!(doc.diagnostics.is_clean());
    }

    #[test]
    fn test_malformed_records_are_skipped_and_counted() {
        let json = r#"{
            "obligations": [
                { "obligation": "Renew factory licence", "deadline": "2030-01-01" },
                { "severity_if_ignored": "CRIMINAL" },
                { "obligation": 42 },
                "not even an object"
            ],
            "penalties": [
                { "violation": "Late filing", "penalty_amount": "Rs. 10,000" },
                { "penalty_amount": "5 lakh" }
            ],
            "compliance_actions": [ { "action": "Register on Udyam" }, {} ],
            "risk_assessment": { "overall_risk_level": "HIGH" }
        }"#;
        let doc: PolicyAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(doc.obligations.len(), 1);
        assert_eq!(doc.penalties.len(), 1);
        assert_eq!(doc.compliance_actions.len(), 1);
        assert_eq!(doc.compliance_actions[0].priority, "MEDIUM");
        assert_eq!(doc.risk_level(), "HIGH");
        assert_eq!(
            doc.diagnostics,
            InputDiagnostics {
                skipped_obligations: 3,
                skipped_penalties: 1,
                skipped_actions: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty_document() {
        let doc: PolicyAnalysis = serde_json::from_str("{}").unwrap();
        assert!(doc.obligations.is_empty());
        assert!(doc.penalties.is_empty());
        assert_eq!(doc.risk_level(), "");
    }

    #[test]
    fn test_non_object_document_is_an_error() {
        assert!(serde_json::from_str::<PolicyAnalysis>("[1, 2]").is_err());
    }
}
