//! Numeric coercion of raw price tables.

use polars::prelude::*;
use swapspread_traits::{CacheKey, DATE_COLUMN, PriceTable, Result, SpreadError, TableCache};
use tracing::debug;

/// Cache key of the cleaned treasury table.
pub const TYIELDS_KEY: &str = "bbg/tyields";

/// Cache key of the cleaned swap table.
pub const SYIELDS_KEY: &str = "bbg/syields";

/// How [`clean_cached`] treats the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// Recompute even if a cleaned table is stored.
    pub force_refresh: bool,
    /// Read and write the cache. When false the cache is not touched.
    pub persist: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            force_refresh: false,
            persist: true,
        }
    }
}

impl CleanOptions {
    /// Options that ignore any stored table.
    pub const fn refresh() -> Self {
        Self {
            force_refresh: true,
            persist: true,
        }
    }

    /// Options that neither read nor write the cache.
    pub const fn transient() -> Self {
        Self {
            force_refresh: false,
            persist: false,
        }
    }
}

/// Coerce every value column to `Float64`.
///
/// Cells that do not parse as numbers (vendor error strings, blanks) and
/// NaN values become null. The `date` column and the row count are kept as
/// they are, so cleaning a cleaned table returns it unchanged.
///
/// # Errors
///
/// Returns [`SpreadError::MissingColumn`] if the table has no `date` column.
pub fn clean_table(raw: &PriceTable) -> Result<PriceTable> {
    let df = raw.data();
    if df.get_column_index(DATE_COLUMN).is_none() {
        return Err(SpreadError::MissingColumn(DATE_COLUMN.to_string()));
    }

    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            if column.name().as_str() == DATE_COLUMN {
                Ok(column.clone())
            } else {
                to_float(column)
            }
        })
        .collect::<PolarsResult<Vec<Column>>>()?;

    let cleaned = DataFrame::new(columns)?;
    debug!(rows = cleaned.height(), columns = cleaned.width() - 1, "cleaned table");
    Ok(PriceTable::new(cleaned))
}

/// Cast to `Float64` with unparseable cells and NaN both as null.
fn to_float(column: &Column) -> PolarsResult<Column> {
    let cast = column.cast(&DataType::Float64)?;
    let values: Float64Chunked = cast
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(Column::from(values.with_name(column.name().clone()).into_series()))
}

/// Clean `raw`, going through `cache` under `key` unless `options.persist`
/// is false.
pub fn clean_cached<C: TableCache>(
    cache: &mut C,
    key: &CacheKey,
    raw: &PriceTable,
    options: CleanOptions,
) -> Result<PriceTable> {
    if !options.persist {
        return clean_table(raw);
    }
    let table = cache.get_or_compute(key, options.force_refresh, || {
        clean_table(raw).map(PriceTable::into_inner)
    })?;
    Ok(PriceTable::new(table))
}
