//! Error types for the ledger engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while loading, recording, or reporting.
///
/// Classification and statement building never fail; these cover the I/O and
/// input-validation edges around them.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open, read, or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed configuration or rule file
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Tax schedule with a rate outside [0, 1] or a negative threshold
    #[error("Invalid tax schedule: {0}")]
    InvalidTaxSchedule(String),

    /// Invalid ledger record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Amount that is not a valid non-negative decimal
    #[error("Invalid amount '{0}': expected a non-negative decimal")]
    InvalidAmount(String),

    /// Category not allowed in the current entry mode
    #[error("Category '{category}' is not a valid {mode} category")]
    InvalidCategory { category: String, mode: String },
}
