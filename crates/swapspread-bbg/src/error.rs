//! Error types for the Bloomberg adapter.

use std::path::PathBuf;

use swapspread_traits::{Date, SpreadError};
use thiserror::Error;

/// Errors raised while reading vendor data.
#[derive(Debug, Error)]
pub enum BbgError {
    /// No export file for the requested field.
    #[error("BDH export not found: {}", .0.display())]
    MissingExport(PathBuf),

    /// The export has no date column header.
    #[error("BDH export {} has no date column", .0.display())]
    MissingDateColumn(PathBuf),

    /// A requested ticker is not part of the export.
    #[error("Ticker not found in export: {0}")]
    TickerNotFound(String),

    /// A row carries a date that cannot be parsed.
    #[error("Invalid date '{value}' on line {line}")]
    InvalidDate {
        /// 1-based line number in the export.
        line: u64,
        /// Raw cell content.
        value: String,
    },

    /// The same date appears twice.
    #[error("Duplicate date in export: {0}")]
    DuplicateDate(Date),

    /// CSV parsing failed.
    #[error("Failed to parse export: {0}")]
    Csv(#[from] csv::Error),

    /// Building the DataFrame failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl From<BbgError> for SpreadError {
    fn from(err: BbgError) -> Self {
        Self::DataFetch(err.to_string())
    }
}
