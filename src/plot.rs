//! Dual-axis summary chart of a k sweep.
//!
//! Silhouette widths share the left axis, the relative error gets its own
//! axis on the right. Series are aligned by position: entry `i` of every
//! series belongs to `k_start + i`.

use crate::aggregate::{summary_path, AVG_SIL_FILE, MIN_SIL_FILE, RELERR_AVG_FILE};
use crate::config::PlotConfig;
use crate::error::ExperimentError;
use crate::matrix_io::read_series;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

const AVG_SIL_COLOR: RGBColor = RGBColor(0, 128, 0);
const MIN_SIL_COLOR: RGBColor = BLUE;
const RELERR_COLOR: RGBColor = RED;

/// The three aligned summary series of one sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub min_sil: Vec<f64>,
    pub avg_sil: Vec<f64>,
    pub relerr: Vec<f64>,
}

impl SummaryTable {
    /// Build a table, checking that all series have the same length.
    pub fn new(
        min_sil: Vec<f64>,
        avg_sil: Vec<f64>,
        relerr: Vec<f64>,
    ) -> Result<Self, ExperimentError> {
        if min_sil.len() != avg_sil.len() || avg_sil.len() != relerr.len() {
            return Err(ExperimentError::SeriesLengthMismatch {
                min: min_sil.len(),
                avg: avg_sil.len(),
                relerr: relerr.len(),
            });
        }

        Ok(Self {
            min_sil,
            avg_sil,
            relerr,
        })
    }

    /// Read `<prefix>Min_sil.csv`, `<prefix>Avg_sil.csv` and `<prefix>Relerr_Avg.csv`.
    pub fn load(prefix: &str) -> Result<Self, ExperimentError> {
        let min_sil = read_series(&summary_path(prefix, MIN_SIL_FILE))?;
        let avg_sil = read_series(&summary_path(prefix, AVG_SIL_FILE))?;
        let relerr = read_series(&summary_path(prefix, RELERR_AVG_FILE))?;
        Self::new(min_sil, avg_sil, relerr)
    }

    /// Number of k values
    pub fn len(&self) -> usize {
        self.relerr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relerr.is_empty()
    }

    /// k value of every entry
    pub fn ks(&self, k_start: usize) -> Vec<usize> {
        (k_start..k_start + self.len()).collect()
    }
}

/// Where the figure for `figure_name` is written.
///
/// The name is appended to the prefix as plain text. A name without an
/// extension is saved as PNG.
pub fn figure_path(prefix: &str, figure_name: &str) -> PathBuf {
    let path = PathBuf::from(format!("{}{}", prefix, figure_name));
    if path.extension().is_some() {
        path
    } else {
        PathBuf::from(format!("{}{}.png", prefix, figure_name))
    }
}

// Padded axis range over finite values
fn value_range<'a>(series: impl IntoIterator<Item = &'a f64>) -> Range<f64> {
    let (lo, hi) = series
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo {
        (hi - lo) * 0.05
    } else {
        lo.abs().max(1.0) * 0.05
    };
    (lo - pad)..(hi + pad)
}

/// Render the sweep chart to `out_path`.
///
/// `.svg` paths use the SVG backend, everything else the bitmap backend.
pub fn render_summary(
    table: &SummaryTable,
    out_path: &Path,
    figure_name: &str,
    config: &PlotConfig,
) -> Result<(), ExperimentError> {
    if table.is_empty() {
        return Err(ExperimentError::Plot("no k values to plot".to_string()));
    }

    let size = (config.width, config.height);
    let is_svg = out_path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        draw_chart(
            SVGBackend::new(out_path, size).into_drawing_area(),
            table,
            figure_name,
            config,
        )?;
    } else {
        draw_chart(
            BitMapBackend::new(out_path, size).into_drawing_area(),
            table,
            figure_name,
            config,
        )?;
    }

    info!(path = %out_path.display(), n_k = table.len(), "saved figure");
    Ok(())
}

fn plot_err(e: impl std::fmt::Display) -> ExperimentError {
    ExperimentError::Plot(e.to_string())
}

fn draw_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &SummaryTable,
    figure_name: &str,
    config: &PlotConfig,
) -> Result<(), ExperimentError> {
    root.fill(&WHITE).map_err(plot_err)?;

    let k_start = config.k_start as f64;
    let k_end = (config.k_start + table.len() - 1) as f64;
    let x_range = (k_start - 0.5)..(k_end + 0.5);
    let sil_range = value_range(table.avg_sil.iter().chain(table.min_sil.iter()));
    let err_range = value_range(table.relerr.iter());

    let caption = format!("{} ({})", config.title_prefix, figure_name);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .right_y_label_area_size(100)
        .build_cartesian_2d(x_range.clone(), sil_range)
        .map_err(plot_err)?
        .set_secondary_coord(x_range, err_range);

    chart
        .configure_mesh()
        .x_desc("Latent Dimensionality k")
        .y_desc("Silhouette Width")
        .x_labels(table.len() + 1)
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .x_label_style(("sans-serif", 22))
        .y_label_style(("sans-serif", 22).into_font().color(&MIN_SIL_COLOR))
        .axis_desc_style(("sans-serif", 26))
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(plot_err)?;

    chart
        .configure_secondary_axes()
        .y_desc("Relative Error")
        .label_style(("sans-serif", 22).into_font().color(&RELERR_COLOR))
        .axis_desc_style(("sans-serif", 26).into_font().color(&RELERR_COLOR))
        .draw()
        .map_err(plot_err)?;

    let ks = table.ks(config.k_start);
    let points = |values: &[f64]| -> Vec<(f64, f64)> {
        ks.iter().map(|&k| k as f64).zip(values.iter().copied()).collect()
    };

    let avg_points = points(&table.avg_sil[..]);
    chart
        .draw_series(LineSeries::new(avg_points, AVG_SIL_COLOR.stroke_width(3)).point_size(8))
        .map_err(plot_err)?
        .label("Avg Silhouette")
        .legend(|(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (30, 0)], AVG_SIL_COLOR.stroke_width(3))
                + Circle::new((15, 0), 5, AVG_SIL_COLOR.filled())
        });

    let min_points = points(&table.min_sil[..]);
    chart
        .draw_series(LineSeries::new(min_points, MIN_SIL_COLOR.stroke_width(3)).point_size(8))
        .map_err(plot_err)?
        .label("Min Silhouette")
        .legend(|(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (30, 0)], MIN_SIL_COLOR.stroke_width(3))
                + Circle::new((15, 0), 5, MIN_SIL_COLOR.filled())
        });

    let relerr_points = points(&table.relerr[..]);
    chart
        .draw_secondary_series(LineSeries::new(
            relerr_points.clone(),
            RELERR_COLOR.stroke_width(3),
        ))
        .map_err(plot_err)?
        .label("Relative Error")
        .legend(|(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (30, 0)], RELERR_COLOR.stroke_width(3))
                + TriangleMarker::new((15, 0), 6, RELERR_COLOR.filled())
        });
    chart
        .draw_secondary_series(
            relerr_points
                .into_iter()
                .map(|p| TriangleMarker::new(p, 10, RELERR_COLOR.filled())),
        )
        .map_err(plot_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 24))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
