//! Fixtures for stage tests.

use std::fs;

use swapspread_bbg::tickers::{self, FIELD_PX_LAST};
use tempfile::TempDir;

use crate::settings::Settings;

pub(crate) const FIXTURE_DATES: [&str; 4] = ["2009-12-31", "2010-01-04", "2010-01-05", "2010-01-06"];

/// Treasury level for a ticker on the `row`-th fixture date.
pub(crate) fn treasury_level(ticker: &str, row: usize) -> f64 {
    let tenor: f64 = ticker
        .trim_start_matches("GB")
        .trim_start_matches("GT")
        .trim_end_matches(" Govt")
        .parse()
        .unwrap_or(1.0);
    let base = if ticker.starts_with("GB") { tenor / 12.0 } else { tenor / 10.0 };
    1.0 + base + 0.01 * row as f64
}

/// A project directory with a BDH export covering every pulled ticker.
///
/// The 30Y swap is `#N/A N/A` on the last date; every other swap sits 5bp
/// above its treasury.
pub(crate) fn project() -> (TempDir, Settings) {
    let dir = tempfile::tempdir().unwrap();
    let treasuries = tickers::treasury_tickers();
    let swaps = tickers::swap_tickers();

    let mut csv = String::from("date");
    for t in treasuries.iter().chain(swaps.iter()) {
        csv.push(',');
        csv.push_str(t);
    }
    csv.push('\n');

    for (row, date) in FIXTURE_DATES.iter().enumerate() {
        csv.push_str(date);
        for t in &treasuries {
            csv.push_str(&format!(",{}", treasury_level(t, row)));
        }
        for s in &swaps {
            let years = s.trim_start_matches("USSO").trim_end_matches(" CMPN Curncy");
            let treasury = if years == "1" {
                tickers::ONE_YEAR_BILL.to_string()
            } else {
                format!("GT{years} Govt")
            };
            if years == "30" && row == FIXTURE_DATES.len() - 1 {
                csv.push_str(",#N/A N/A");
            } else {
                csv.push_str(&format!(",{}", treasury_level(&treasury, row) + 0.05));
            }
        }
        csv.push('\n');
    }

    let export_dir = dir.path().join("_data").join("bbg_export");
    fs::create_dir_all(&export_dir).unwrap();
    fs::write(export_dir.join(format!("{FIELD_PX_LAST}.csv")), csv).unwrap();

    let base = dir.path().to_string_lossy().into_owned();
    let settings = Settings::from_lookup(|key| (key == "BASE_DIR").then(|| base.clone())).unwrap();
    (dir, settings)
}
