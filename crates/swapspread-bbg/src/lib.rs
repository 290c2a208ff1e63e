//! Bloomberg-side data source for swapspread.
//!
//! This crate knows which instruments the pipeline pulls, how to read them
//! from a Bloomberg BDH export, and how to cache the raw pulls so later runs
//! do not touch the vendor again.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swapspread_bbg::{BdhExportProvider, BloombergSource, PullWindow};
//! use swapspread_traits::DiskCache;
//!
//! let provider = BdhExportProvider::new("_data/bbg_export");
//! let cache = DiskCache::new("_data");
//! let mut source = BloombergSource::new(provider, cache, PullWindow::through_yesterday(start));
//!
//! let raw_treasuries = source.pull_raw_tyields(false)?;
//! let raw_swaps = source.pull_raw_syields(false)?;
//! ```
//!
//! # Export layout
//!
//! One CSV per field, named `<FIELD>.csv` (e.g. `PX_LAST.csv`), with a `date`
//! header followed by one column per ticker:
//!
//! ```text
//! date,GB1 Govt,GB2 Govt,...,USSO30 CMPN Curncy
//! 2000-01-03,5.27,5.33,...,#N/A N/A
//! ```

mod error;
mod export;
mod source;
pub mod tickers;

pub use error::BbgError;
pub use export::BdhExportProvider;
pub use source::{BloombergSource, PullWindow, RAW_SYIELDS_KEY, RAW_TYIELDS_KEY};

/// Result type for Bloomberg adapter operations.
pub type Result<T> = std::result::Result<T, BbgError>;
