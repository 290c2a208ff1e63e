//! Calc command implementation.

use anyhow::Result;
use clap::ValueEnum;
use swapspread_traits::SpreadTable;

use crate::data;
use crate::settings::Settings;

/// How the spread summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object
    Json,
}

/// Compute the spread table, store it and print its summary.
pub(crate) fn run(settings: &Settings, refresh: bool, format: OutputFormat) -> Result<SpreadTable> {
    let mut source = data::source(settings);
    let spreads = data::calc_spreads(&mut source, refresh)?;
    let summary = spreads.summary()?;

    match format {
        OutputFormat::Text => {
            println!("Spread table: {} rows x {} columns", summary.rows, summary.columns);
            match (summary.first_valid, summary.last_valid) {
                (Some(first), Some(last)) => println!("Valid data:   {first} to {last}"),
                _ => println!("Valid data:   none"),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(spreads)
}
