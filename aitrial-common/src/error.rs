//! Common error types for AI on Trial

use thiserror::Error;

/// Common result type for AI on Trial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the case catalog core
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed case dataset or boundary file (startup-fatal)
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Facet value that cannot be coerced to the facet's type
    #[error("Invalid value for {facet} filter: {value:?}")]
    InvalidFilterValue { facet: &'static str, value: String },

    /// More countries requested for comparison than the aggregator supports
    #[error("Too many selections: {requested} requested, at most {max} allowed")]
    TooManySelections { requested: usize, max: usize },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Soft outcomes the caller should degrade on rather than fail
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::TooManySelections { .. })
    }
}
