//! Environment-driven settings.

use std::env;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use swapspread_traits::{Result, SpreadError};

const DEFAULT_START_DATE: &str = "2010-01-01";
const DEFAULT_END_DATE: &str = "2024-02-28";
const DEFAULT_PULL_START_DATE: &str = "2000-01-01";

/// Directories and dates every stage reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) base_dir: PathBuf,
    /// Cache root.
    pub(crate) data_dir: PathBuf,
    /// Report artifacts.
    pub(crate) output_dir: PathBuf,
    /// Start of the chart and replication window.
    pub(crate) start_date: NaiveDate,
    /// End of the replicated chart window.
    pub(crate) end_date: NaiveDate,
    /// First date requested from the vendor.
    pub(crate) pull_start_date: NaiveDate,
    pub(crate) bbg_export_dir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first.
    pub(crate) fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset or
    /// empty variables.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_dir = match get("BASE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir()?,
        };
        let resolve = |key: &str, default: PathBuf| match get(key) {
            Some(dir) => join_relative(&base_dir, Path::new(&dir)),
            None => default,
        };

        let data_dir = resolve("DATA_DIR", base_dir.join("_data"));
        let output_dir = resolve("OUTPUT_DIR", base_dir.join("_output"));
        let bbg_export_dir = resolve("BBG_EXPORT_DIR", data_dir.join("bbg_export"));

        let date = |key: &str, default: &str| {
            let raw = get(key).unwrap_or_else(|| default.to_string());
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| SpreadError::Config(format!("{key}='{raw}': {e}")))
        };

        Ok(Self {
            start_date: date("START_DATE", DEFAULT_START_DATE)?,
            end_date: date("END_DATE", DEFAULT_END_DATE)?,
            pull_start_date: date("PULL_START_DATE", DEFAULT_PULL_START_DATE)?,
            base_dir,
            data_dir,
            output_dir,
            bbg_export_dir,
        })
    }

    /// Path of a report artifact.
    pub(crate) fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
