#![doc(issue_tracker_base_url = "https://github.com/factordynamics/swapspread/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Cleaning and spread calculation.
//!
//! Raw vendor pulls are coerced to numbers by [`clean_table`], then
//! [`compute_spreads`] joins the cleaned treasury and swap tables on date and
//! derives, per maturity, the arbitrage spread and the scaled swap rate:
//!
//! ```text
//! Arb_Swap_{n} = 100 * (USSO{n} - GT{n})   (bps)
//! tswap_{n}_rf = 100 * USSO{n}
//! ```

pub mod clean;
pub mod spread;

pub use clean::{CleanOptions, SYIELDS_KEY, TYIELDS_KEY, clean_cached, clean_table};
pub use spread::{
    MERGED_KEY, MIN_YEAR, compute_spreads, compute_spreads_for, replication_frame,
};
