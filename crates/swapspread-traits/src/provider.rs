//! Market-data provider trait.
//!
//! The vendor call is the one external collaborator of the pipeline. It is
//! kept behind this trait so the cached source can be driven by the real
//! vendor adapter in production and by an in-memory stub in tests.

use crate::{Date, Result};
use polars::prelude::*;

/// A source of daily historical quotes.
///
/// # Example
///
/// ```no_run
/// use swapspread_traits::{Date, QuoteProvider, Result};
/// use polars::prelude::*;
///
/// struct EmptyProvider;
///
/// impl QuoteProvider for EmptyProvider {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn history(&self, _tickers: &[&str], _field: &str, _start: Date, _end: Date) -> Result<DataFrame> {
///         Ok(DataFrame::default())
///     }
/// }
/// ```
pub trait QuoteProvider {
    /// Short provider name used in log messages.
    fn name(&self) -> &str;

    /// Fetch one field for a list of instruments over an inclusive date range.
    ///
    /// # Returns
    ///
    /// A DataFrame with a `date` column (dtype `Date`, unique, ascending) and
    /// one column per requested ticker, named by the ticker. Cells may be of
    /// any dtype; cleaning coerces them to numbers later.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::DataFetch`](crate::SpreadError::DataFetch) when
    /// the vendor is unreachable or rejects the request. Callers do not retry.
    fn history(&self, tickers: &[&str], field: &str, start: Date, end: Date) -> Result<DataFrame>;
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn history(&self, tickers: &[&str], field: &str, start: Date, end: Date) -> Result<DataFrame> {
        (**self).history(tickers, field, start, end)
    }
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn history(&self, tickers: &[&str], field: &str, start: Date, end: Date) -> Result<DataFrame> {
        (**self).history(tickers, field, start, end)
    }
}
