#![doc(issue_tracker_base_url = "https://github.com/factordynamics/swapspread/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the swapspread pipeline.
//!
//! This crate holds the pieces every stage agrees on: the error type, the
//! typed maturity set, the table wrappers passed between stages, the
//! [`QuoteProvider`] seam to the market-data vendor and the [`TableCache`]
//! abstraction that decides whether a stage recomputes or reloads.

/// The version of the swapspread-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod cache;
pub mod error;
pub mod maturity;
pub mod provider;
pub mod types;

// Re-exports
pub use cache::{CacheKey, DiskCache, MemoryCache, TableCache};
pub use error::{Result, SpreadError};
pub use maturity::Maturity;
pub use provider::QuoteProvider;
pub use types::{
    CE_TO_UNIX_EPOCH_DAYS, DATE_COLUMN, Date, PriceTable, SpreadSummary, SpreadTable, Ticker,
};
