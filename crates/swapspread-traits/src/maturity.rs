//! The fixed set of maturities the spread is computed for.
//!
//! Each maturity maps to the vendor tickers it is built from and to the
//! column names it produces, so callers never assemble column names by hand.

use serde::{Deserialize, Serialize};

/// A swap/treasury maturity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Maturity {
    /// 1 year
    Y1,
    /// 2 years
    Y2,
    /// 3 years
    Y3,
    /// 5 years
    Y5,
    /// 10 years
    Y10,
    /// 20 years
    Y20,
    /// 30 years
    Y30,
}

impl Maturity {
    /// All maturities in ascending tenor order.
    pub const ALL: [Self; 7] = [
        Self::Y1,
        Self::Y2,
        Self::Y3,
        Self::Y5,
        Self::Y10,
        Self::Y20,
        Self::Y30,
    ];

    /// Order in which spread lines are drawn on the spread chart.
    pub const PLOT_ORDER: [Self; 7] = [
        Self::Y1,
        Self::Y20,
        Self::Y2,
        Self::Y30,
        Self::Y3,
        Self::Y5,
        Self::Y10,
    ];

    /// Tenor in years.
    #[must_use]
    pub const fn years(self) -> u32 {
        match self {
            Self::Y1 => 1,
            Self::Y2 => 2,
            Self::Y3 => 3,
            Self::Y5 => 5,
            Self::Y10 => 10,
            Self::Y20 => 20,
            Self::Y30 => 30,
        }
    }

    /// Look up a maturity by its tenor in years.
    #[must_use]
    pub fn from_years(years: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.years() == years)
    }

    /// Treasury ticker holding this maturity's yield.
    ///
    /// The one-year point is pulled as the 12-month bill and renamed after
    /// the raw pull, so it shares the `GT` prefix with the notes and bonds.
    #[must_use]
    pub const fn treasury_ticker(self) -> &'static str {
        match self {
            Self::Y1 => "GT1 Govt",
            Self::Y2 => "GT2 Govt",
            Self::Y3 => "GT3 Govt",
            Self::Y5 => "GT5 Govt",
            Self::Y10 => "GT10 Govt",
            Self::Y20 => "GT20 Govt",
            Self::Y30 => "GT30 Govt",
        }
    }

    /// SOFR OIS swap ticker for this maturity.
    #[must_use]
    pub const fn swap_ticker(self) -> &'static str {
        match self {
            Self::Y1 => "USSO1 CMPN Curncy",
            Self::Y2 => "USSO2 CMPN Curncy",
            Self::Y3 => "USSO3 CMPN Curncy",
            Self::Y5 => "USSO5 CMPN Curncy",
            Self::Y10 => "USSO10 CMPN Curncy",
            Self::Y20 => "USSO20 CMPN Curncy",
            Self::Y30 => "USSO30 CMPN Curncy",
        }
    }

    /// Name of the spread column, `100 * (swap - treasury)` in bps.
    #[must_use]
    pub const fn spread_column(self) -> &'static str {
        match self {
            Self::Y1 => "Arb_Swap_1",
            Self::Y2 => "Arb_Swap_2",
            Self::Y3 => "Arb_Swap_3",
            Self::Y5 => "Arb_Swap_5",
            Self::Y10 => "Arb_Swap_10",
            Self::Y20 => "Arb_Swap_20",
            Self::Y30 => "Arb_Swap_30",
        }
    }

    /// Name of the scaled swap-rate column, `100 * swap`.
    #[must_use]
    pub const fn scaled_swap_column(self) -> &'static str {
        match self {
            Self::Y1 => "tswap_1_rf",
            Self::Y2 => "tswap_2_rf",
            Self::Y3 => "tswap_3_rf",
            Self::Y5 => "tswap_5_rf",
            Self::Y10 => "tswap_10_rf",
            Self::Y20 => "tswap_20_rf",
            Self::Y30 => "tswap_30_rf",
        }
    }

    /// Row label used in the mean-spread table.
    #[must_use]
    pub fn display_label(self) -> String {
        format!("Arb Swap {}", self.years())
    }

    /// Short legend label, e.g. `10Y`.
    #[must_use]
    pub fn legend_label(self) -> String {
        format!("{}Y", self.years())
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Y", self.years())
    }
}
