//! Treasury/swap spread calculation.

use polars::prelude::*;
use swapspread_traits::types::date_to_days;
use swapspread_traits::{
    DATE_COLUMN, Date, Maturity, PriceTable, Result, SpreadError, SpreadTable,
};
use tracing::{debug, info};

/// Cache key of the merged spread table.
pub const MERGED_KEY: &str = "calc_spread/calc_merged";

/// Rows dated before this year are dropped from the spread table.
pub const MIN_YEAR: i32 = 2000;

const YEAR_COLUMN: &str = "year";

fn require(table: &PriceTable, name: &str) -> Result<()> {
    if table.has_column(name) {
        Ok(())
    } else {
        Err(SpreadError::MissingColumn(name.to_string()))
    }
}

fn on_or_after(start: Date) -> Expr {
    col(DATE_COLUMN)
        .cast(DataType::Int32)
        .gt_eq(lit(date_to_days(start)))
}

/// Spreads for every maturity.
///
/// See [`compute_spreads_for`].
pub fn compute_spreads(treasury: &PriceTable, swap: &PriceTable) -> Result<SpreadTable> {
    compute_spreads_for(treasury, swap, &Maturity::ALL)
}

/// Spreads for the given maturities.
///
/// The cleaned tables are inner-joined on `date` with no filling. For each
/// maturity the result holds `Arb_Swap_{n} = 100 * (swap - treasury)` and
/// `tswap_{n}_rf = 100 * swap`, spread columns first. Rows before
/// [`MIN_YEAR`] and rows where every computed value is missing are dropped.
/// Disjoint date sets give an empty table.
///
/// # Errors
///
/// Returns [`SpreadError::InvalidData`] for an empty maturity list and
/// [`SpreadError::MissingColumn`] naming the first treasury or swap column
/// that is absent from its input.
pub fn compute_spreads_for(
    treasury: &PriceTable,
    swap: &PriceTable,
    maturities: &[Maturity],
) -> Result<SpreadTable> {
    if maturities.is_empty() {
        return Err(SpreadError::InvalidData(
            "no maturities to compute spreads for".to_string(),
        ));
    }
    require(treasury, DATE_COLUMN)?;
    require(swap, DATE_COLUMN)?;
    for m in maturities {
        require(treasury, m.treasury_ticker())?;
        require(swap, m.swap_ticker())?;
    }

    let select_left: Vec<Expr> = std::iter::once(col(DATE_COLUMN))
        .chain(
            maturities
                .iter()
                .map(|m| col(m.treasury_ticker()).cast(DataType::Float64)),
        )
        .collect();
    let select_right: Vec<Expr> = std::iter::once(col(DATE_COLUMN))
        .chain(
            maturities
                .iter()
                .map(|m| col(m.swap_ticker()).cast(DataType::Float64)),
        )
        .collect();

    let spreads: Vec<Expr> = maturities
        .iter()
        .map(|m| {
            (lit(100.0) * (col(m.swap_ticker()) - col(m.treasury_ticker())))
                .alias(m.spread_column())
        })
        .collect();
    let scaled: Vec<Expr> = maturities
        .iter()
        .map(|m| (lit(100.0) * col(m.swap_ticker())).alias(m.scaled_swap_column()))
        .collect();

    let computed: Vec<&str> = maturities
        .iter()
        .map(|m| m.spread_column())
        .chain(maturities.iter().map(|m| m.scaled_swap_column()))
        .collect();
    let output: Vec<Expr> = std::iter::once(col(DATE_COLUMN))
        .chain(computed.iter().map(|name| col(*name)))
        .collect();

    let mut lf = treasury
        .data()
        .clone()
        .lazy()
        .select(select_left)
        .join(
            swap.data().clone().lazy().select(select_right),
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .with_columns(spreads)
        .with_columns(scaled)
        .with_column(col(DATE_COLUMN).dt().year().alias(YEAR_COLUMN))
        .filter(col(YEAR_COLUMN).gt_eq(lit(MIN_YEAR)))
        .select(output);

    if let Some(any_present) = computed
        .iter()
        .map(|name| col(*name).is_not_null())
        .reduce(|acc, e| acc.or(e))
    {
        lf = lf.filter(any_present);
    }

    let df = lf.sort([DATE_COLUMN], Default::default()).collect()?;
    info!(
        rows = df.height(),
        maturities = maturities.len(),
        "computed swap spreads"
    );
    Ok(SpreadTable::new(df))
}

/// Treasury and swap levels for every maturity from `start` on.
///
/// Each side is restricted to dates on or after `start` and the two are
/// inner-joined on `date`. Columns keep their vendor ticker names, treasury
/// columns first.
///
/// # Errors
///
/// Returns [`SpreadError::MissingColumn`] if a treasury or swap column is
/// absent.
pub fn replication_frame(
    treasury: &PriceTable,
    swap: &PriceTable,
    start: Date,
) -> Result<PriceTable> {
    require(treasury, DATE_COLUMN)?;
    require(swap, DATE_COLUMN)?;
    for m in Maturity::ALL {
        require(treasury, m.treasury_ticker())?;
        require(swap, m.swap_ticker())?;
    }

    let side = |table: &PriceTable, names: Vec<&'static str>| {
        let exprs: Vec<Expr> = std::iter::once(col(DATE_COLUMN))
            .chain(names.into_iter().map(|n| col(n).cast(DataType::Float64)))
            .collect();
        table
            .data()
            .clone()
            .lazy()
            .filter(on_or_after(start))
            .select(exprs)
    };

    let left = side(treasury, Maturity::ALL.iter().map(|m| m.treasury_ticker()).collect());
    let right = side(swap, Maturity::ALL.iter().map(|m| m.swap_ticker()).collect());

    let df = left
        .join(
            right,
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([DATE_COLUMN], Default::default())
        .collect()?;
    debug!(rows = df.height(), %start, "built replication frame");
    Ok(PriceTable::new(df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn single_day(treasury: [f64; 2], swap: [f64; 2]) -> (PriceTable, PriceTable) {
        let dates = [d(2021, 1, 1)];
        let t = PriceTable::from_columns(
            &dates,
            vec![
                ("GT1 Govt", vec![Some(treasury[0])]),
                ("GT2 Govt", vec![Some(treasury[1])]),
            ],
        )
        .unwrap();
        let s = PriceTable::from_columns(
            &dates,
            vec![
                ("USSO1 CMPN Curncy", vec![Some(swap[0])]),
                ("USSO2 CMPN Curncy", vec![Some(swap[1])]),
            ],
        )
        .unwrap();
        (t, s)
    }

    /// Every maturity, with `f(m)` as treasury and `f(m) + 0.05` as swap.
    fn full_tables(dates: &[Date], missing_on: Option<Date>) -> (PriceTable, PriceTable) {
        let value = |m: Maturity, date: Date| {
            if Some(date) == missing_on {
                None
            } else {
                Some(f64::from(m.years()) / 10.0)
            }
        };
        let t = PriceTable::from_columns(
            dates,
            Maturity::ALL
                .iter()
                .map(|m| {
                    (
                        m.treasury_ticker(),
                        dates.iter().map(|date| value(*m, *date)).collect(),
                    )
                })
                .collect(),
        )
        .unwrap();
        let s = PriceTable::from_columns(
            dates,
            Maturity::ALL
                .iter()
                .map(|m| {
                    (
                        m.swap_ticker(),
                        dates
                            .iter()
                            .map(|date| value(*m, *date).map(|v| v + 0.05))
                            .collect(),
                    )
                })
                .collect(),
        )
        .unwrap();
        (t, s)
    }

    #[test]
    fn test_two_maturity_example() {
        let (t, s) = single_day([0.10, 0.20], [0.15, 0.25]);

        let spreads = compute_spreads_for(&t, &s, &[Maturity::Y1, Maturity::Y2]).unwrap();

        assert_eq!(
            spreads.columns(),
            vec!["Arb_Swap_1", "Arb_Swap_2", "tswap_1_rf", "tswap_2_rf"]
        );
        assert_eq!(spreads.len(), 1);
        assert_relative_eq!(spreads.series("Arb_Swap_1").unwrap()[0].1, 5.0, epsilon = 1e-9);
        assert_relative_eq!(spreads.series("tswap_1_rf").unwrap()[0].1, 15.0, epsilon = 1e-9);
        assert_relative_eq!(spreads.series("Arb_Swap_2").unwrap()[0].1, 5.0, epsilon = 1e-9);
        assert_relative_eq!(spreads.series("tswap_2_rf").unwrap()[0].1, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spread_formula_for_all_maturities() {
        let dates = [d(2015, 6, 1), d(2015, 6, 2)];
        let (t, s) = full_tables(&dates, None);

        let spreads = compute_spreads(&t, &s).unwrap();

        assert_eq!(spreads.columns().len(), 2 * Maturity::ALL.len());
        for m in Maturity::ALL {
            let tsy = t.series(m.treasury_ticker()).unwrap();
            let swp = s.series(m.swap_ticker()).unwrap();
            let spread = spreads.spread(m).unwrap();
            let scaled = spreads.series(m.scaled_swap_column()).unwrap();
            for i in 0..dates.len() {
                assert_relative_eq!(spread[i].1, 100.0 * (swp[i].1 - tsy[i].1), epsilon = 1e-9);
                assert_relative_eq!(scaled[i].1, 100.0 * swp[i].1, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_drops_pre_2000_and_all_missing_rows() {
        let dates = [d(1999, 12, 31), d(2000, 1, 3), d(2000, 1, 4), d(2000, 1, 5)];
        let (t, s) = full_tables(&dates, Some(d(2000, 1, 4)));

        let spreads = compute_spreads(&t, &s).unwrap();

        assert_eq!(
            spreads.dates().unwrap(),
            vec![Some(d(2000, 1, 3)), Some(d(2000, 1, 5))]
        );
    }

    #[test]
    fn test_keeps_row_with_partial_data() {
        let dates = [d(2021, 1, 1)];
        let t = PriceTable::from_columns(&dates, vec![("GT1 Govt", vec![None])]).unwrap();
        let s = PriceTable::from_columns(&dates, vec![("USSO1 CMPN Curncy", vec![Some(0.2)])]).unwrap();

        let spreads = compute_spreads_for(&t, &s, &[Maturity::Y1]).unwrap();

        assert_eq!(spreads.len(), 1);
        assert!(spreads.spread(Maturity::Y1).unwrap().is_empty());
        assert_relative_eq!(spreads.series("tswap_1_rf").unwrap()[0].1, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_common_dates_gives_empty_table() {
        let (t, _) = full_tables(&[d(2020, 1, 1)], None);
        let (_, s) = full_tables(&[d(2020, 1, 2)], None);

        let spreads = compute_spreads(&t, &s).unwrap();

        assert!(spreads.is_empty());
        assert_eq!(spreads.columns().len(), 2 * Maturity::ALL.len());
    }

    #[test]
    fn test_nan_quotes_leave_no_row() {
        use crate::clean::clean_table;
        use swapspread_traits::types::date_series;

        let dates = [d(2021, 1, 1), d(2021, 1, 4)];
        let raw = |name: &str, cells: Vec<Option<&str>>| {
            PriceTable::new(
                DataFrame::new(vec![
                    Column::from(date_series(&dates).unwrap()),
                    Column::from(Series::new(name.into(), cells)),
                ])
                .unwrap(),
            )
        };
        let t = clean_table(&raw("GT1 Govt", vec![Some("NaN"), Some("0.10")])).unwrap();
        let s = clean_table(&raw("USSO1 CMPN Curncy", vec![Some("nan"), Some("0.15")])).unwrap();

        let spreads = compute_spreads_for(&t, &s, &[Maturity::Y1]).unwrap();

        assert_eq!(spreads.dates().unwrap(), vec![Some(d(2021, 1, 4))]);
        assert_relative_eq!(spreads.spread(Maturity::Y1).unwrap()[0].1, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_maturity_list_is_rejected() {
        let (t, s) = single_day([0.10, 0.20], [0.15, 0.25]);

        let err = compute_spreads_for(&t, &s, &[]).unwrap_err();

        assert!(matches!(err, SpreadError::InvalidData(_)));
    }

    #[test]
    fn test_missing_maturity_is_lookup_error() {
        let (t, s) = single_day([0.10, 0.20], [0.15, 0.25]);

        let err = compute_spreads(&t, &s).unwrap_err();

        assert!(matches!(err, SpreadError::MissingColumn(c) if c == "GT3 Govt"));
    }

    #[test]
    fn test_output_sorted_by_date() {
        let dates = [d(2020, 1, 3), d(2020, 1, 1), d(2020, 1, 2)];
        let (t, s) = full_tables(&dates, None);

        let spreads = compute_spreads(&t, &s).unwrap();

        assert_eq!(
            spreads.dates().unwrap(),
            vec![Some(d(2020, 1, 1)), Some(d(2020, 1, 2)), Some(d(2020, 1, 3))]
        );
    }

    #[test]
    fn test_replication_frame_starts_at_window() {
        let dates = [d(2009, 12, 31), d(2010, 1, 4), d(2010, 1, 5)];
        let (t, s) = full_tables(&dates, None);

        let frame = replication_frame(&t, &s, d(2010, 1, 1)).unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.columns().len(), 2 * Maturity::ALL.len());
        assert_eq!(frame.columns()[0], "GT1 Govt");
        assert!(frame.has_column("USSO30 CMPN Curncy"));
        assert_eq!(frame.dates().unwrap()[0], Some(d(2010, 1, 4)));
    }
}
