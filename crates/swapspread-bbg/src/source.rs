//! Cached raw pulls.

use chrono::{Days, Local};
use polars::prelude::*;
use swapspread_traits::{
    CacheKey, Date, Maturity, PriceTable, QuoteProvider, Result, SpreadError, TableCache,
};
use tracing::{error, info};

use crate::tickers::{self, FIELD_PX_LAST, ONE_YEAR_BILL};

/// Cache key of the raw treasury pull.
pub const RAW_TYIELDS_KEY: &str = "bbg/raw_tyields";

/// Cache key of the raw swap pull.
pub const RAW_SYIELDS_KEY: &str = "bbg/raw_syields";

/// Inclusive date range requested from the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullWindow {
    /// First requested date.
    pub start: Date,
    /// Last requested date.
    pub end: Date,
}

impl PullWindow {
    /// Create a window.
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Window from `start` to yesterday, local time.
    pub fn through_yesterday(start: Date) -> Self {
        let today = Local::now().date_naive();
        let end = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        Self::new(start, end)
    }
}

/// Vendor pulls behind a table cache.
///
/// A pull is served from the cache when a table is stored under its key and
/// no refresh is forced; otherwise the provider is called once and the
/// result is stored before it is returned.
#[derive(Debug)]
pub struct BloombergSource<P, C> {
    provider: P,
    cache: C,
    window: PullWindow,
}

impl<P: QuoteProvider, C: TableCache> BloombergSource<P, C> {
    /// Create a source.
    pub const fn new(provider: P, cache: C, window: PullWindow) -> Self {
        Self {
            provider,
            cache,
            window,
        }
    }

    /// The requested date range.
    pub const fn window(&self) -> PullWindow {
        self.window
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// The underlying cache.
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Mutable access to the cache, for stages that derive further tables.
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// Give back the cache.
    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Fetch `tickers` for the source window, cached under `key`.
    ///
    /// # Errors
    ///
    /// Provider failures are logged and propagated unchanged; nothing is
    /// stored in that case.
    pub fn fetch(
        &mut self,
        key: &CacheKey,
        tickers: &[&str],
        field: &str,
        force_refresh: bool,
    ) -> Result<PriceTable> {
        self.fetch_with(key, tickers, field, force_refresh, Ok)
    }

    fn fetch_with<F>(
        &mut self,
        key: &CacheKey,
        tickers: &[&str],
        field: &str,
        force_refresh: bool,
        post: F,
    ) -> Result<PriceTable>
    where
        F: FnOnce(DataFrame) -> Result<DataFrame>,
    {
        if !force_refresh && self.cache.contains(key) {
            info!(%key, "Loading local data");
        } else {
            info!(
                %key,
                provider = self.provider.name(),
                tickers = tickers.len(),
                start = %self.window.start,
                end = %self.window.end,
                "Fetching data"
            );
        }

        let provider = &self.provider;
        let window = self.window;
        let table = self.cache.get_or_compute(key, force_refresh, || {
            let df = provider
                .history(tickers, field, window.start, window.end)
                .inspect_err(|e| error!(%key, provider = provider.name(), "Failed to fetch data: {e}"))?;
            post(df)
        })?;

        Ok(PriceTable::new(table))
    }

    /// Raw treasury yields, bills and notes, with the 12-month bill renamed
    /// to the one-year treasury column.
    pub fn pull_raw_tyields(&mut self, force_refresh: bool) -> Result<PriceTable> {
        let tickers = tickers::treasury_tickers();
        let refs: Vec<&str> = tickers.iter().map(String::as_str).collect();
        let key = CacheKey::new(RAW_TYIELDS_KEY);
        self.fetch_with(&key, &refs, FIELD_PX_LAST, force_refresh, rename_one_year_bill)
    }

    /// Raw SOFR OIS swap rates.
    pub fn pull_raw_syields(&mut self, force_refresh: bool) -> Result<PriceTable> {
        let tickers = tickers::swap_tickers();
        let refs: Vec<&str> = tickers.iter().map(String::as_str).collect();
        let key = CacheKey::new(RAW_SYIELDS_KEY);
        self.fetch(&key, &refs, FIELD_PX_LAST, force_refresh)
    }
}

fn rename_one_year_bill(mut df: DataFrame) -> Result<DataFrame> {
    if df.get_column_index(ONE_YEAR_BILL).is_none() {
        return Err(SpreadError::MissingColumn(ONE_YEAR_BILL.to_string()));
    }
    df.rename(ONE_YEAR_BILL, Maturity::Y1.treasury_ticker().into())?;
    Ok(df)
}
