//! Error types shared by the cleaning and aggregation pipelines

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong inside the library
#[derive(Error, Debug)]
pub enum SieveError {
    /// Top-level input has the wrong shape for the pipeline it was fed to
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// No numeric values survived filtering
    #[error("{0}")]
    EmptyInput(String),

    /// An accepted field went missing between analysis and projection
    #[error("accepted field '{field}' is missing from record {record}")]
    ConfigurationConsistency { field: String, record: usize },

    /// Document nesting exceeds the configured limit
    #[error("document is nested deeper than the limit of {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification carried in error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedInput,
    EmptyInput,
    ConfigurationConsistency,
    Io,
}

impl SieveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SieveError::MalformedInput(_)
            | SieveError::NestingTooDeep { .. }
            | SieveError::Json(_) => ErrorKind::MalformedInput,
            SieveError::EmptyInput(_) => ErrorKind::EmptyInput,
            SieveError::ConfigurationConsistency { .. } => ErrorKind::ConfigurationConsistency,
            SieveError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SieveError::MalformedInput(msg.into())
    }

    pub(crate) fn empty(msg: impl Into<String>) -> Self {
        SieveError::EmptyInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SieveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SieveError::malformed("x").kind(), ErrorKind::MalformedInput);
        assert_eq!(
            SieveError::NestingTooDeep { limit: 3 }.kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(SieveError::empty("none").kind(), ErrorKind::EmptyInput);
        assert_eq!(
            SieveError::ConfigurationConsistency { field: "a".into(), record: 2 }.kind(),
            ErrorKind::ConfigurationConsistency
        );
    }

    #[test]
    fn test_messages() {
        let err = SieveError::ConfigurationConsistency { field: "id".into(), record: 4 };
        assert_eq!(err.to_string(), "accepted field 'id' is missing from record 4");
        assert_eq!(SieveError::empty("No valid numeric data").to_string(), "No valid numeric data");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ConfigurationConsistency).unwrap();
        assert_eq!(json, "\"configuration_consistency\"");
    }
}
