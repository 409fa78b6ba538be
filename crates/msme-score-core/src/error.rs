use thiserror::Error;

#[derive(Debug, Error)]
pub enum MsmeScoreError {
    #[error("Malformed input: {record}: {reason}")]
    MalformedInput { record: String, reason: String },

    #[error("Unparseable amount: '{0}'")]
    UnparseableAmount(String),

    #[error("Unparseable date: '{0}'")]
    UnparseableDate(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MsmeScoreError {
    /// Arithmetic on `field` left the Decimal range.
    pub(crate) fn out_of_range(field: &str) -> Self {
        MsmeScoreError::InvalidInput {
            field: field.into(),
            reason: "Value exceeds the supported numeric range".into(),
        }
    }
}

impl From<serde_json::Error> for MsmeScoreError {
    fn from(e: serde_json::Error) -> Self {
        MsmeScoreError::Serialization(e.to_string())
    }
}
