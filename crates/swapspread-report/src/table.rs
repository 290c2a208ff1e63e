//! Mean spread table.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use swapspread_traits::{Maturity, Result, SpreadError, SpreadTable};
use tracing::info;

/// Header of the mean column.
pub const MEAN_COLUMN: &str = "Mean(bps)";

/// Name of the row label column in [`mean_spreads`] output.
pub const LABEL_COLUMN: &str = "maturity";

fn column_means(spreads: &SpreadTable, maturities: &[Maturity]) -> Result<Vec<(String, Option<f64>)>> {
    maturities
        .iter()
        .map(|m| {
            let column = spreads
                .data()
                .column(m.spread_column())
                .map_err(|_| SpreadError::MissingColumn(m.spread_column().to_string()))?;
            let mean = column
                .as_materialized_series()
                .cast(&DataType::Float64)?
                .f64()?
                .mean();
            Ok((m.display_label(), mean))
        })
        .collect()
}

fn means_frame(rows: &[(String, Option<f64>)]) -> Result<DataFrame> {
    let labels: Vec<&str> = rows.iter().map(|(label, _)| label.as_str()).collect();
    let means: Vec<Option<f64>> = rows.iter().map(|(_, mean)| *mean).collect();
    Ok(df! {
        LABEL_COLUMN => labels,
        MEAN_COLUMN => means,
    }?)
}

/// Mean spread per maturity, labelled `Arb Swap {n}`.
///
/// Missing observations are skipped; an all-missing column has a null mean.
pub fn mean_spreads(spreads: &SpreadTable) -> Result<DataFrame> {
    mean_spreads_for(spreads, &Maturity::ALL)
}

/// Mean spread for the given maturities.
///
/// # Errors
///
/// Returns [`SpreadError::MissingColumn`] if a spread column is absent.
pub fn mean_spreads_for(spreads: &SpreadTable, maturities: &[Maturity]) -> Result<DataFrame> {
    means_frame(&column_means(spreads, maturities)?)
}

/// Render labelled means as a booktabs LaTeX `tabular`.
///
/// Values print with six decimals and a missing mean prints as `NaN`.
pub fn to_latex(rows: &[(String, Option<f64>)]) -> String {
    let mut out = String::new();
    out.push_str("\\begin{tabular}{lr}\n");
    out.push_str("\\toprule\n");
    out.push_str(&format!(" & {MEAN_COLUMN} \\\\\n"));
    out.push_str("\\midrule\n");
    for (label, mean) in rows {
        match mean {
            Some(v) if !v.is_nan() => out.push_str(&format!("{label} & {v:.6} \\\\\n")),
            _ => out.push_str(&format!("{label} & NaN \\\\\n")),
        }
    }
    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out
}

/// Write the mean table for every maturity to `path` and return the means.
///
/// Parent directories are created as needed.
pub fn write_mean_table(spreads: &SpreadTable, path: &Path) -> Result<DataFrame> {
    let rows = column_means(spreads, &Maturity::ALL)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_latex(&rows))?;
    info!(path = %path.display(), rows = rows.len(), "wrote mean spread table");
    means_frame(&rows)
}
