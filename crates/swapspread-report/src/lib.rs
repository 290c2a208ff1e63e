#![doc(issue_tracker_base_url = "https://github.com/factordynamics/swapspread/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Report artifacts for the swap spread pipeline.
//!
//! - [`write_mean_table`]: mean spread per maturity as a LaTeX `tabular`
//! - [`plot_spreads`]: one line per maturity on shared axes
//! - [`plot_replication`]: log treasury and swap levels, one image per maturity

pub mod chart;
pub mod table;

pub use chart::{
    CHART_SIZE, ChartWindow, maturity_path, plot_replication, plot_spreads,
};
pub use table::{LABEL_COLUMN, MEAN_COLUMN, mean_spreads, mean_spreads_for, to_latex, write_mean_table};
