//! Pull command implementation.

use anyhow::Result;

use crate::data::{self, Cleaned};
use crate::settings::Settings;

/// Pull raw treasury and swap quotes and clean them.
pub(crate) fn run(settings: &Settings, refresh: bool) -> Result<Cleaned> {
    let mut source = data::source(settings);
    let cleaned = data::load_cleaned(&mut source, refresh)?;

    println!(
        "Treasury yields: {} rows x {} columns",
        cleaned.treasury.len(),
        cleaned.treasury.columns().len()
    );
    println!(
        "Swap rates:      {} rows x {} columns",
        cleaned.swap.len(),
        cleaned.swap.columns().len()
    );
    Ok(cleaned)
}
