//! Config command implementation.

use std::fs;

use anyhow::Result;
use tracing::info;

use crate::settings::Settings;

/// Create the data and output directories.
pub(crate) fn create_dirs(settings: &Settings) -> Result<()> {
    for dir in [&settings.data_dir, &settings.output_dir] {
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "ensured directory");
    }
    Ok(())
}

/// Print the resolved settings.
pub(crate) fn show(settings: &Settings) {
    println!("BASE_DIR        {}", settings.base_dir.display());
    println!("DATA_DIR        {}", settings.data_dir.display());
    println!("OUTPUT_DIR      {}", settings.output_dir.display());
    println!("BBG_EXPORT_DIR  {}", settings.bbg_export_dir.display());
    println!("START_DATE      {}", settings.start_date);
    println!("END_DATE        {}", settings.end_date);
    println!("PULL_START_DATE {}", settings.pull_start_date);
}
