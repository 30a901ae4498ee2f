//! Error types for journal-store

use thiserror::Error;

/// Main error type for the journal data-access layer
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Malformed entry document at {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type using JournalError
pub type Result<T> = std::result::Result<T, JournalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timestamp_display() {
        let err = JournalError::InvalidTimestamp("yesterday-ish".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp: yesterday-ish");
    }

    #[test]
    fn test_malformed_document_display() {
        let err = JournalError::MalformedDocument {
            path: "users/u1/journalEntries/e1".to_string(),
            reason: "missing field 'title'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("users/u1/journalEntries/e1"));
        assert!(msg.contains("missing field 'title'"));
    }
}
