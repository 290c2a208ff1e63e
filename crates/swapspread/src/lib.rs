#![doc(issue_tracker_base_url = "https://github.com/factordynamics/swapspread/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # swapspread
//!
//! Treasury/SOFR OIS swap spread replication.
//!
//! swapspread is an umbrella crate that re-exports the pipeline's sub-crates.
//! Each stage keeps its own public contract; this crate only gathers them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use swapspread::bbg::{BdhExportProvider, BloombergSource, PullWindow};
//! use swapspread::calc::{CleanOptions, clean_cached, compute_spreads};
//! use swapspread::{CacheKey, DiskCache, Result};
//!
//! # fn main() -> Result<()> {
//! let provider = BdhExportProvider::new("_data/bbg_export");
//! let mut source = BloombergSource::new(provider, DiskCache::new("_data"), PullWindow::through_yesterday(start));
//!
//! let raw_t = source.pull_raw_tyields(false)?;
//! let raw_s = source.pull_raw_syields(false)?;
//! let cache = source.cache_mut();
//! let treasury = clean_cached(cache, &CacheKey::new(swapspread::calc::TYIELDS_KEY), &raw_t, CleanOptions::default())?;
//! let swap = clean_cached(cache, &CacheKey::new(swapspread::calc::SYIELDS_KEY), &raw_s, CleanOptions::default())?;
//!
//! let spreads = compute_spreads(&treasury, &swap)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`]: error type, maturities, tables, provider and cache traits
//! - [`bbg`]: tickers, BDH export provider and cached vendor pulls
//! - [`calc`]: cleaning and spread calculation
//! - [`report`]: mean table and charts
//!
//! ## Pipeline
//!
//! 1. **Pull** raw treasury and swap quotes (cached)
//! 2. **Clean** every cell to a number or missing (cached)
//! 3. **Calc** the per-maturity spread `100 * (swap - treasury)` in bps
//! 4. **Report** the mean table, spread charts and replication charts

/// Version information for the swapspread crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core types and traits.
pub mod traits {
    pub use swapspread_traits::*;
}

/// Bloomberg-side data source.
pub mod bbg {
    pub use swapspread_bbg::*;
}

/// Cleaning and spread calculation.
pub mod calc {
    pub use swapspread_calc::*;
}

/// Report artifacts.
pub mod report {
    pub use swapspread_report::*;
}

// Re-export the types every stage shares
pub use swapspread_traits::{
    CacheKey, Date, DiskCache, Maturity, MemoryCache, PriceTable, QuoteProvider, Result,
    SpreadError, SpreadSummary, SpreadTable, TableCache,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_stage_modules_are_reachable() {
        assert_eq!(calc::MIN_YEAR, 2000);
        assert_eq!(bbg::tickers::FIELD_PX_LAST, "PX_LAST");
        assert_eq!(report::MEAN_COLUMN, "Mean(bps)");
        assert_eq!(traits::Maturity::ALL.len(), 7);
    }
}
