//! Supplementary command implementation.

use std::path::PathBuf;

use anyhow::Result;
use polars::prelude::DataFrame;
use swapspread_calc::replication_frame;
use swapspread_report::{LABEL_COLUMN, MEAN_COLUMN, plot_replication, write_mean_table};

use crate::data;
use crate::settings::Settings;

/// File name of the mean spread table.
pub(crate) const TABLE_FILE: &str = "table.txt";

/// Base file name of the replication charts.
pub(crate) const REPLICATION_FILE: &str = "replication_figure.png";

/// Outputs of the supplementary stage.
#[derive(Debug)]
pub(crate) struct Supplementary {
    pub(crate) means: DataFrame,
    pub(crate) table_path: PathBuf,
    pub(crate) charts: Vec<PathBuf>,
}

/// Write the mean spread table and the replication charts.
pub(crate) fn run(settings: &Settings) -> Result<Supplementary> {
    let mut source = data::source(settings);
    let cleaned = data::load_cleaned(&mut source, false)?;
    let spreads = data::load_spreads(&mut source)?;

    let table_path = settings.output_path(TABLE_FILE);
    let means = write_mean_table(&spreads, &table_path)?;

    let frame = replication_frame(&cleaned.treasury, &cleaned.swap, settings.start_date)?;
    let charts = plot_replication(&frame, &settings.output_path(REPLICATION_FILE))?;

    let out = Supplementary {
        means,
        table_path,
        charts,
    };
    out.print()?;
    Ok(out)
}

impl Supplementary {
    fn print(&self) -> Result<()> {
        print_means(&self.means)?;
        println!();
        println!("Wrote {}", self.table_path.display());
        for chart in &self.charts {
            println!("Wrote {}", chart.display());
        }
        Ok(())
    }
}

fn print_means(means: &DataFrame) -> Result<()> {
    let labels = means.column(LABEL_COLUMN)?.as_materialized_series().str()?;
    let values = means.column(MEAN_COLUMN)?.as_materialized_series().f64()?;

    println!("{:<14} {:>12}", "", MEAN_COLUMN);
    println!("{}", "-".repeat(27));
    for (label, value) in labels.into_iter().zip(values.into_iter()) {
        match value {
            Some(v) => println!("{:<14} {:>12.4}", label.unwrap_or_default(), v),
            None => println!("{:<14} {:>12}", label.unwrap_or_default(), "NaN"),
        }
    }
    Ok(())
}
