//! Provider reading Bloomberg BDH exports from disk.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use swapspread_traits::types::date_to_days;
use swapspread_traits::{DATE_COLUMN, Date, QuoteProvider};
use tracing::debug;

use crate::{Result, error::BbgError};

/// Date formats accepted in the export's first column.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Reads daily history from wide BDH exports, one CSV per field.
///
/// Cells are returned as raw strings; vendor error markers such as
/// `#N/A N/A` pass through untouched and blank cells become missing.
#[derive(Debug, Clone)]
pub struct BdhExportProvider {
    dir: PathBuf,
}

impl BdhExportProvider {
    /// Create a provider reading exports from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the exports.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Export file for `field`.
    pub fn export_path(&self, field: &str) -> PathBuf {
        self.dir.join(format!("{field}.csv"))
    }

    fn read(&self, tickers: &[&str], field: &str, start: Date, end: Date) -> Result<DataFrame> {
        let path = self.export_path(field);
        if !path.exists() {
            return Err(BbgError::MissingExport(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let headers = reader.headers()?.clone();
        let is_date_header = headers
            .get(0)
            .map(|h| {
                let h = h.trim_start_matches('\u{feff}');
                h.is_empty() || h.eq_ignore_ascii_case(DATE_COLUMN)
            })
            .unwrap_or(false);
        if !is_date_header {
            return Err(BbgError::MissingDateColumn(path));
        }

        let indices = tickers
            .iter()
            .map(|ticker| {
                headers
                    .iter()
                    .skip(1)
                    .position(|h| h == *ticker)
                    .map(|i| i + 1)
                    .ok_or_else(|| BbgError::TickerNotFound((*ticker).to_string()))
            })
            .collect::<Result<Vec<usize>>>()?;

        let mut rows: Vec<(Date, Vec<Option<String>>)> = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            // +2: records start after the header, lines are 1-based
            let line = idx as u64 + 2;
            let raw_date = record.get(0).unwrap_or_default();
            let date = parse_date(raw_date).ok_or_else(|| BbgError::InvalidDate {
                line,
                value: raw_date.to_string(),
            })?;
            if date < start || date > end {
                continue;
            }

            let cells = indices
                .iter()
                .map(|&i| match record.get(i) {
                    Some(cell) if !cell.is_empty() => Some(cell.to_string()),
                    _ => None,
                })
                .collect();
            rows.push((date, cells));
        }

        rows.sort_by_key(|(date, _)| *date);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(BbgError::DuplicateDate(pair[0].0));
        }

        debug!(path = %path.display(), rows = rows.len(), tickers = tickers.len(), "read BDH export");

        let days: Vec<i32> = rows.iter().map(|(date, _)| date_to_days(*date)).collect();
        let mut columns = Vec::with_capacity(tickers.len() + 1);
        columns.push(Column::from(
            Series::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?,
        ));
        for (pos, ticker) in tickers.iter().enumerate() {
            let cells: Vec<Option<String>> = rows.iter().map(|(_, cells)| cells[pos].clone()).collect();
            columns.push(Column::from(Series::new((*ticker).into(), cells)));
        }

        Ok(DataFrame::new(columns)?)
    }
}

impl QuoteProvider for BdhExportProvider {
    fn name(&self) -> &str {
        "Bloomberg"
    }

    fn history(
        &self,
        tickers: &[&str],
        field: &str,
        start: Date,
        end: Date,
    ) -> swapspread_traits::Result<DataFrame> {
        Ok(self.read(tickers, field, start, end)?)
    }
}

fn parse_date(raw: &str) -> Option<Date> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| Date::parse_from_str(raw.trim(), fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use swapspread_traits::{PriceTable, SpreadError};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn write_export(dir: &Path, body: &str) {
        fs::write(dir.join("PX_LAST.csv"), body).unwrap();
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-02-28"), Some(d(2024, 2, 28)));
        assert_eq!(parse_date("02/28/2024"), Some(d(2024, 2, 28)));
        assert_eq!(parse_date("28.02.2024"), None);
    }

    #[test]
    fn test_history_selects_window_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_export(
            dir.path(),
            "date,GT2 Govt,USSO2 CMPN Curncy\n\
             2021-01-05,0.13,0.20\n\
             2021-01-04,0.12,#N/A N/A\n\
             1999-12-31,6.10,\n\
             2021-01-06,,0.22\n",
        );
        let provider = BdhExportProvider::new(dir.path());

        let df = provider
            .history(&["USSO2 CMPN Curncy"], "PX_LAST", d(2000, 1, 1), d(2021, 1, 5))
            .unwrap();
        let table = PriceTable::new(df);

        assert_eq!(table.columns(), vec!["USSO2 CMPN Curncy"]);
        assert_eq!(
            table.dates().unwrap(),
            vec![Some(d(2021, 1, 4)), Some(d(2021, 1, 5))]
        );

        let cells: Vec<Option<&str>> = table
            .column("USSO2 CMPN Curncy")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(cells, vec![Some("#N/A N/A"), Some("0.20")]);
    }

    #[test]
    fn test_missing_export_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = BdhExportProvider::new(dir.path());

        let err = provider
            .history(&["GT2 Govt"], "PX_LAST", d(2000, 1, 1), d(2021, 1, 1))
            .unwrap_err();
        assert!(matches!(err, SpreadError::DataFetch(_)));
        assert!(err.to_string().contains("PX_LAST.csv"));
    }

    #[test]
    fn test_unknown_ticker_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), "date,GT2 Govt\n2021-01-04,0.12\n");
        let provider = BdhExportProvider::new(dir.path());

        let err = provider.read(&["GT7 Govt"], "PX_LAST", d(2000, 1, 1), d(2022, 1, 1));
        assert!(matches!(err, Err(BbgError::TickerNotFound(t)) if t == "GT7 Govt"));
    }

    #[test]
    fn test_duplicate_dates_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), "date,GT2 Govt\n2021-01-04,0.12\n2021-01-04,0.13\n");
        let provider = BdhExportProvider::new(dir.path());

        let err = provider.read(&["GT2 Govt"], "PX_LAST", d(2000, 1, 1), d(2022, 1, 1));
        assert!(matches!(err, Err(BbgError::DuplicateDate(date)) if date == d(2021, 1, 4)));
    }

    #[test]
    fn test_invalid_date_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), "date,GT2 Govt\n2021-01-04,0.12\nnot-a-date,0.13\n");
        let provider = BdhExportProvider::new(dir.path());

        let err = provider.read(&["GT2 Govt"], "PX_LAST", d(2000, 1, 1), d(2022, 1, 1));
        assert!(matches!(err, Err(BbgError::InvalidDate { line: 3, .. })));
    }
}
