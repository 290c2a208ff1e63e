//! PNG charts of spread and replication series.

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::Days;
use plotters::prelude::*;
use swapspread_traits::{Date, Maturity, PriceTable, Result, SpreadError, SpreadTable};
use tracing::info;

/// Pixel size of every chart.
pub const CHART_SIZE: (u32, u32) = (1200, 800);

const SPREAD_TITLE: &str = "Treasury-Swap";
const X_DESC: &str = "Dates";
const SPREAD_Y_DESC: &str = "Arbitrage Spread (bps)";
const REPLICATION_Y_DESC: &str = "ln(100 x rate)";

/// Dates shown on a spread chart, `end` open when `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartWindow {
    /// First date shown.
    pub start: Date,
    /// Last date shown.
    pub end: Option<Date>,
}

impl ChartWindow {
    /// Window from `start` to the end of the data.
    pub const fn starting(start: Date) -> Self {
        Self { start, end: None }
    }

    /// Window from `start` to `end`, both inclusive.
    pub const fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && self.end.is_none_or(|end| date <= end)
    }
}

#[derive(Debug)]
struct Line {
    label: String,
    points: Vec<(Date, f64)>,
}

fn bounds(lines: &[Line], window: ChartWindow) -> (Range<Date>, Range<f64>) {
    let points = || lines.iter().flat_map(|l| l.points.iter());

    let first = points().map(|(d, _)| *d).min();
    let last = points().map(|(d, _)| *d).max();
    let x = match (first, last) {
        (Some(first), Some(last)) if last > first => first..last,
        (Some(day), _) => day..day.checked_add_days(Days::new(1)).unwrap_or(day),
        _ => {
            let end = window
                .end
                .filter(|end| *end > window.start)
                .or_else(|| window.start.checked_add_days(Days::new(1)))
                .unwrap_or(window.start);
            window.start..end
        }
    };

    let low = points().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let high = points().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let y = if !low.is_finite() || !high.is_finite() {
        -1.0..1.0
    } else if high - low < f64::EPSILON {
        (low - 1.0)..(high + 1.0)
    } else {
        let pad = 0.05 * (high - low);
        (low - pad)..(high + pad)
    };

    (x, y)
}

fn draw_lines(
    path: &Path,
    title: &str,
    y_desc: &str,
    lines: &[Line],
    window: ChartWindow,
) -> std::result::Result<(), Box<dyn Error>> {
    let (x_range, y_range) = bounds(lines, window);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    // horizontal grid only
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(X_DESC)
        .y_desc(y_desc)
        .x_labels(8)
        .x_label_formatter(&|d: &Date| d.format("%Y-%m").to_string())
        .draw()?;

    for (i, line) in lines.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerMiddle)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn render(path: &Path, title: &str, y_desc: &str, lines: &[Line], window: ChartWindow) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // the bitmap encoder picks its format from the extension
    let staging = match (path.extension(), path.file_name()) {
        (None, Some(name)) => Some(path.with_file_name(format!(".{}.png", name.to_string_lossy()))),
        _ => None,
    };
    let target = staging.as_deref().unwrap_or(path);
    draw_lines(target, title, y_desc, lines, window)
        .map_err(|e| SpreadError::Chart(format!("{}: {e}", path.display())))?;
    if let Some(staging) = &staging {
        fs::rename(staging, path)?;
    }
    info!(path = %path.display(), lines = lines.len(), "saved chart");
    Ok(())
}

/// Plot the spread of every maturity inside `window` to a PNG at `path`.
///
/// Lines are drawn in [`Maturity::PLOT_ORDER`] and labelled `{n}Y`; missing
/// observations are dropped. An empty window still produces an image. A
/// path without an extension is written as PNG under that exact name.
///
/// # Errors
///
/// Returns [`SpreadError::MissingColumn`] if a spread column is absent and
/// [`SpreadError::Chart`] if drawing fails.
pub fn plot_spreads(spreads: &SpreadTable, path: &Path, window: &ChartWindow) -> Result<()> {
    let lines = Maturity::PLOT_ORDER
        .iter()
        .map(|m| {
            let points = spreads
                .spread(*m)?
                .into_iter()
                .filter(|(date, _)| window.contains(*date))
                .collect();
            Ok(Line {
                label: m.legend_label(),
                points,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    render(path, SPREAD_TITLE, SPREAD_Y_DESC, &lines, *window)
}

/// `base` with the maturity's tenor inserted before the extension,
/// e.g. `replication_figure.png` becomes `replication_figure10.png`.
pub fn maturity_path(base: &Path, maturity: Maturity) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}{}.{}", maturity.years(), ext.to_string_lossy()),
        None => format!("{stem}{}", maturity.years()),
    };
    base.with_file_name(name)
}

fn log_scaled(points: Vec<(Date, f64)>) -> Vec<(Date, f64)> {
    points
        .into_iter()
        .map(|(date, v)| (date, (100.0 * v).ln()))
        .filter(|(_, v)| v.is_finite())
        .collect()
}

/// Plot `ln(100 * treasury)` against `ln(100 * swap)` for each maturity of a
/// replication frame, one PNG per maturity named by [`maturity_path`].
///
/// Returns the written paths in ascending maturity order.
pub fn plot_replication(frame: &PriceTable, base_path: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(Maturity::ALL.len());
    for m in Maturity::ALL {
        let lines = [
            Line {
                label: format!("Treasury {m}"),
                points: log_scaled(frame.series(m.treasury_ticker())?),
            },
            Line {
                label: format!("Swap {m}"),
                points: log_scaled(frame.series(m.swap_ticker())?),
            },
        ];
        let start = lines
            .iter()
            .flat_map(|l| l.points.first().map(|(d, _)| *d))
            .min()
            .unwrap_or_default();

        let path = maturity_path(base_path, m);
        render(
            &path,
            &format!("{m} Treasury vs Swap"),
            REPLICATION_Y_DESC,
            &lines,
            ChartWindow::starting(start),
        )?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn spreads(dates: &[Date]) -> SpreadTable {
        let columns = Maturity::ALL
            .iter()
            .map(|m| {
                (
                    m.spread_column(),
                    dates
                        .iter()
                        .enumerate()
                        .map(|(i, _)| Some(f64::from(m.years()) - i as f64))
                        .collect(),
                )
            })
            .collect();
        SpreadTable::new(PriceTable::from_columns(dates, columns).unwrap().into_inner())
    }

    #[test]
    fn test_window_contains() {
        let open = ChartWindow::starting(d(2010, 1, 1));
        assert!(open.contains(d(2030, 1, 1)));
        assert!(!open.contains(d(2009, 12, 31)));

        let closed = ChartWindow::between(d(2010, 1, 1), d(2024, 2, 28));
        assert!(closed.contains(d(2024, 2, 28)));
        assert!(!closed.contains(d(2024, 2, 29)));
    }

    #[test]
    fn test_maturity_path() {
        let base = Path::new("/out/replication_figure.png");
        assert_eq!(
            maturity_path(base, Maturity::Y10),
            PathBuf::from("/out/replication_figure10.png")
        );
        assert_eq!(
            maturity_path(Path::new("figure"), Maturity::Y2),
            PathBuf::from("figure2")
        );
    }

    #[test]
    fn test_bounds_cover_points() {
        let lines = vec![
            Line {
                label: "1Y".into(),
                points: vec![(d(2020, 1, 1), -5.0), (d(2020, 6, 1), 15.0)],
            },
            Line {
                label: "2Y".into(),
                points: vec![(d(2019, 1, 1), 0.0)],
            },
        ];
        let (x, y) = bounds(&lines, ChartWindow::starting(d(2010, 1, 1)));
        assert_eq!(x, d(2019, 1, 1)..d(2020, 6, 1));
        assert!(y.start < -5.0 && y.end > 15.0);
    }

    #[test]
    fn test_bounds_fall_back_to_window() {
        let (x, y) = bounds(&[], ChartWindow::between(d(2010, 1, 1), d(2024, 2, 28)));
        assert_eq!(x, d(2010, 1, 1)..d(2024, 2, 28));
        assert_eq!(y, -1.0..1.0);
    }

    #[test]
    fn test_log_scaled_drops_non_finite() {
        let points = log_scaled(vec![(d(2020, 1, 1), 0.0), (d(2020, 1, 2), 0.01), (d(2020, 1, 3), -1.0)]);
        assert_eq!(points, vec![(d(2020, 1, 2), 0.0)]);
    }

    #[test]
    fn test_plot_spreads_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updated_swap_spread_arb_figure.png");
        let table = spreads(&[d(2009, 1, 1), d(2015, 1, 1), d(2020, 1, 1)]);

        plot_spreads(&table, &path, &ChartWindow::starting(d(2010, 1, 1))).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_plot_spreads_extensionless_path_is_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spread_chart");
        let table = spreads(&[d(2015, 1, 1), d(2020, 1, 1)]);

        plot_spreads(&table, &path, &ChartWindow::starting(d(2010, 1, 1))).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("spread_chart")]);
    }

    #[test]
    fn test_plot_spreads_empty_window_still_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replicated_swap_spread_arb_figure.png");
        let table = spreads(&[d(2005, 1, 1)]);

        plot_spreads(&table, &path, &ChartWindow::between(d(2010, 1, 1), d(2024, 2, 28))).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_plot_spreads_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let table = PriceTable::from_columns(&[d(2020, 1, 1)], vec![("Arb_Swap_1", vec![Some(1.0)])]).unwrap();

        let err = plot_spreads(
            &SpreadTable::new(table.into_inner()),
            &dir.path().join("x.png"),
            &ChartWindow::starting(d(2010, 1, 1)),
        )
        .unwrap_err();
        assert!(matches!(err, SpreadError::MissingColumn(_)));
    }

    #[test]
    fn test_plot_replication_one_file_per_maturity() {
        let dir = tempfile::tempdir().unwrap();
        let dates = [d(2010, 1, 4), d(2010, 1, 5)];
        let mut columns: Vec<(&str, Vec<Option<f64>>)> = Maturity::ALL
            .iter()
            .map(|m| (m.treasury_ticker(), vec![Some(1.0), Some(1.1)]))
            .collect();
        columns.extend(
            Maturity::ALL
                .iter()
                .map(|m| (m.swap_ticker(), vec![Some(1.2), None])),
        );
        let frame = PriceTable::from_columns(&dates, columns).unwrap();

        let written = plot_replication(&frame, &dir.path().join("replication_figure.png")).unwrap();

        assert_eq!(written.len(), Maturity::ALL.len());
        for (path, m) in written.iter().zip(Maturity::ALL) {
            assert_eq!(
                path.file_name().unwrap().to_string_lossy(),
                format!("replication_figure{}.png", m.years())
            );
            assert!(path.exists());
        }
    }
}
