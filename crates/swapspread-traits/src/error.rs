//! Error types for the swapspread pipeline.
//!
//! Every stage either succeeds or aborts the run, so a single error enum is
//! shared across the workspace. Unparseable cells are not errors; the cleaner
//! turns them into missing values.

use thiserror::Error;

/// The main error type for swapspread operations.
#[derive(Debug, Error)]
pub enum SpreadError {
    /// The market-data provider failed or rejected the request.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// A required column (instrument or computed field) is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A date could not be parsed or constructed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error while reading or writing caches and artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error rendering a chart.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for SpreadError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SpreadError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for swapspread operations.
pub type Result<T> = std::result::Result<T, SpreadError>;
