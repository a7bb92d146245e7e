//! Custom error types for the allowance tracker
//!
//! Validation failures (`InvalidAmount`, `InvalidDate`, `InvalidCategory`)
//! reject a mutation and leave the ledger untouched. Malformed persisted data
//! is recovered by the storage layer and only appears here so it can be logged.

use thiserror::Error;

/// The main error type for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Non-positive or non-numeric amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Missing or unparsable expense date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Category outside the known set while strict categories are enabled
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Stored ledger could not be parsed
    #[error("Malformed persisted data: {0}")]
    MalformedPersistedData(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// No unused expense id is left above the largest one stored
    #[error("Expense ids exhausted after {0}")]
    IdsExhausted(u64),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl TrackerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error rejected user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidDate(_) | Self::InvalidCategory(_)
        )
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
