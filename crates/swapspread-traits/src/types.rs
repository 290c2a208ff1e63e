//! Common types passed between pipeline stages.
//!
//! Tables are Polars DataFrames with a `date` column of dtype `Date` and one
//! column per instrument or computed field. The wrappers here only add
//! accessors; they do not copy the underlying data.

use chrono::Datelike;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Maturity, Result, SpreadError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A vendor instrument identifier, e.g. `"USSO10 CMPN Curncy"`.
pub type Ticker = String;

/// Name of the date column every table is keyed on.
pub const DATE_COLUMN: &str = "date";

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Convert a calendar date to Polars' physical `Date` representation.
#[must_use]
pub fn date_to_days(date: Date) -> i32 {
    date.num_days_from_ce() - CE_TO_UNIX_EPOCH_DAYS
}

/// Convert Polars' physical `Date` representation back to a calendar date.
#[must_use]
pub fn days_to_date(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS)
}

/// Build a `date` column of dtype `Date`.
pub fn date_series(dates: &[Date]) -> Result<Series> {
    let days: Vec<i32> = dates.iter().map(|d| date_to_days(*d)).collect();
    Ok(Series::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?)
}

/// Read the `date` column of a table.
pub fn read_dates(df: &DataFrame) -> Result<Vec<Option<Date>>> {
    let column = df
        .column(DATE_COLUMN)
        .map_err(|_| SpreadError::MissingColumn(DATE_COLUMN.to_string()))?;
    Ok(column
        .as_materialized_series()
        .date()?
        .into_iter()
        .map(|d: Option<i32>| d.and_then(days_to_date))
        .collect())
}

/// Read `(date, value)` pairs for one column, dropping missing and
/// non-finite observations.
pub fn dated_values(df: &DataFrame, name: &str) -> Result<Vec<(Date, f64)>> {
    let dates = read_dates(df)?;
    let column = df
        .column(name)
        .map_err(|_| SpreadError::MissingColumn(name.to_string()))?;
    let values = column.as_materialized_series().cast(&DataType::Float64)?;

    Ok(dates
        .into_iter()
        .zip(values.f64()?.into_iter())
        .filter_map(|(date, value)| match (date, value) {
            (Some(date), Some(value)) if value.is_finite() => Some((date, value)),
            _ => None,
        })
        .collect())
}

fn value_column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .filter(|s| s.as_str() != DATE_COLUMN)
        .map(|s| s.to_string())
        .collect()
}

/// A date-indexed table of instrument prices.
///
/// Used for both raw vendor pulls (cells may be strings) and cleaned tables
/// (every value column is `Float64`).
///
/// # Expected Schema
///
/// - `date`: observation date, unique and ascending
/// - one column per instrument, named by its ticker
#[derive(Debug, Clone)]
pub struct PriceTable {
    /// The underlying DataFrame.
    data: DataFrame,
}

impl PriceTable {
    /// Wrap a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Build a numeric table from dates and named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a column length differs from the number of dates.
    pub fn from_columns(dates: &[Date], columns: Vec<(&str, Vec<Option<f64>>)>) -> Result<Self> {
        let mut cols = Vec::with_capacity(columns.len() + 1);
        cols.push(Column::from(date_series(dates)?));
        for (name, values) in columns {
            if values.len() != dates.len() {
                return Err(SpreadError::InvalidData(format!(
                    "column '{name}' has {} values for {} dates",
                    values.len(),
                    dates.len()
                )));
            }
            cols.push(Column::from(Series::new(name.into(), values)));
        }
        Ok(Self::new(DataFrame::new(cols)?))
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Instrument column names (the `date` column excluded).
    pub fn columns(&self) -> Vec<String> {
        value_column_names(&self.data)
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.column(name).ok()
    }

    /// Observation dates in table order.
    pub fn dates(&self) -> Result<Vec<Option<Date>>> {
        read_dates(&self.data)
    }

    /// Non-missing observations of one instrument.
    pub fn series(&self, ticker: &str) -> Result<Vec<(Date, f64)>> {
        dated_values(&self.data, ticker)
    }
}

impl From<DataFrame> for PriceTable {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for PriceTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

/// Date-indexed spread and scaled swap-rate columns, one pair per maturity.
///
/// Spreads are in basis points: `Arb_Swap_{n} = 100 * (swap - treasury)`.
#[derive(Debug, Clone)]
pub struct SpreadTable {
    data: DataFrame,
}

impl SpreadTable {
    /// Wrap a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Computed column names (the `date` column excluded).
    pub fn columns(&self) -> Vec<String> {
        value_column_names(&self.data)
    }

    /// Observation dates in table order.
    pub fn dates(&self) -> Result<Vec<Option<Date>>> {
        read_dates(&self.data)
    }

    /// Non-missing observations of any computed column.
    pub fn series(&self, name: &str) -> Result<Vec<(Date, f64)>> {
        dated_values(&self.data, name)
    }

    /// Non-missing spread observations for one maturity.
    pub fn spread(&self, maturity: Maturity) -> Result<Vec<(Date, f64)>> {
        self.series(maturity.spread_column())
    }

    /// Shape and valid date range of the table.
    pub fn summary(&self) -> Result<SpreadSummary> {
        let names = self.columns();
        let dates = self.dates()?;

        let mut any_valid: Option<BooleanChunked> = None;
        for name in &names {
            let valid = self.data.column(name)?.as_materialized_series().is_not_null();
            any_valid = Some(match any_valid {
                None => valid,
                Some(acc) => &acc | &valid,
            });
        }

        let valid_dates: Vec<Date> = match any_valid {
            None => Vec::new(),
            Some(mask) => dates
                .into_iter()
                .zip(mask.into_iter())
                .filter_map(|(d, ok)| if ok.unwrap_or(false) { d } else { None })
                .collect(),
        };

        Ok(SpreadSummary {
            rows: self.len(),
            columns: names.len(),
            first_valid: valid_dates.iter().min().copied(),
            last_valid: valid_dates.iter().max().copied(),
        })
    }
}

impl From<DataFrame> for SpreadTable {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for SpreadTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

/// Dimensions and valid date range of a spread table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadSummary {
    /// Number of dated rows.
    pub rows: usize,
    /// Number of computed columns.
    pub columns: usize,
    /// First date with at least one observation.
    pub first_valid: Option<Date>,
    /// Last date with at least one observation.
    pub last_valid: Option<Date>,
}
