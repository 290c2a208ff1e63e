//! Instruments requested from the vendor.

use swapspread_traits::{Maturity, Ticker};

/// Last price field.
pub const FIELD_PX_LAST: &str = "PX_LAST";

/// Bill maturities requested, in months.
pub const BILL_MONTHS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Note and bond maturities requested, in years.
pub const NOTE_YEARS: [u32; 7] = [2, 3, 5, 7, 10, 20, 30];

/// The 12-month bill, which stands in for the missing one-year note.
pub const ONE_YEAR_BILL: &str = "GB12 Govt";

/// Generic treasury tickers, bills first.
#[must_use]
pub fn treasury_tickers() -> Vec<Ticker> {
    BILL_MONTHS
        .iter()
        .map(|m| format!("GB{m} Govt"))
        .chain(NOTE_YEARS.iter().map(|y| format!("GT{y} Govt")))
        .collect()
}

/// SOFR OIS swap tickers, one per maturity.
#[must_use]
pub fn swap_tickers() -> Vec<Ticker> {
    Maturity::ALL
        .iter()
        .map(|m| m.swap_ticker().to_string())
        .collect()
}
