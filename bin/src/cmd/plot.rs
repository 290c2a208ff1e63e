//! Plot command implementation.

use std::path::PathBuf;

use anyhow::Result;
use swapspread_report::{ChartWindow, plot_spreads};

use crate::data;
use crate::settings::Settings;

/// Chart ending at the configured end date.
pub(crate) const REPLICATED_FILE: &str = "replicated_swap_spread_arb_figure.png";

/// Chart running to the end of the data.
pub(crate) const UPDATED_FILE: &str = "updated_swap_spread_arb_figure.png";

/// Write the replicated and updated spread charts.
pub(crate) fn run(settings: &Settings) -> Result<[PathBuf; 2]> {
    let mut source = data::source(settings);
    let spreads = data::load_spreads(&mut source)?;

    let replicated = settings.output_path(REPLICATED_FILE);
    plot_spreads(
        &spreads,
        &replicated,
        &ChartWindow::between(settings.start_date, settings.end_date),
    )?;

    let updated = settings.output_path(UPDATED_FILE);
    plot_spreads(&spreads, &updated, &ChartWindow::starting(settings.start_date))?;

    let summary = spreads.summary()?;
    println!("Dimensions: {} rows x {} columns", summary.rows, summary.columns);
    println!("Wrote {}", replicated.display());
    println!("Wrote {}", updated.display());

    Ok([replicated, updated])
}
