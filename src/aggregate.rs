use crate::config::AggregateConfig;
use crate::error::ExperimentError;
use crate::matrix_io::{read_table, write_series};
use ndarray::{Array2, Axis};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the average-silhouette summary
pub const AVG_SIL_FILE: &str = "Avg_sil.csv";
/// File name of the minimum-silhouette summary
pub const MIN_SIL_FILE: &str = "Min_sil.csv";
/// File name of the average relative-error summary
pub const RELERR_AVG_FILE: &str = "Relerr_Avg.csv";

/// Per-k metric produced by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Silhouette widths, one column per trial
    Silhouette,
    /// Relative reconstruction errors
    RelativeError,
}

impl MetricKind {
    /// Prefix of the per-k file name; k is appended directly
    pub fn file_stem(&self) -> &'static str {
        match self {
            MetricKind::Silhouette => "Si_at_k",
            MetricKind::RelativeError => "relerr_at_k",
        }
    }
}

/// Path of the per-k metric file, `<dir>/<subdir>/<stem><k>`
pub fn metric_path(dir: &str, subdir: &str, kind: MetricKind, k: usize) -> PathBuf {
    PathBuf::from(format!("{}/{}/{}{}", dir, subdir, kind.file_stem(), k))
}

/// Path of a summary file.
///
/// The file name is appended to `dir` as plain text, so the summary lands
/// next to the run directory rather than inside it unless `dir` ends with a
/// separator.
pub fn summary_path(dir: &str, file_name: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", dir, file_name))
}

/// Mean and minimum of the column means of a silhouette table
pub fn silhouette_stats(table: &Array2<f64>) -> Option<(f64, f64)> {
    let col_means = table.mean_axis(Axis(0))?;
    let avg = col_means.mean()?;
    let min = col_means.iter().copied().fold(f64::INFINITY, nan_min);
    Some((avg, min))
}

/// Arithmetic mean over every value of the table
pub fn flat_mean(table: &Array2<f64>) -> Option<f64> {
    table.mean()
}

// Minimum that propagates NaN
fn nan_min(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.min(v)
    }
}

/// Scalars indexed by k, starting at `k_start`
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySeries {
    /// k value of the first entry
    pub k_start: usize,

    /// One value per consecutive k
    pub values: Vec<f64>,
}

impl SummarySeries {
    /// Create an empty series starting at `k_start`
    pub fn new(k_start: usize) -> Self {
        Self {
            k_start,
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// k values aligned with `values`
    pub fn ks(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.values.len()).map(move |i| self.k_start + i)
    }
}

/// Average and minimum silhouette series of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SilhouetteSummary {
    pub avg: SummarySeries,
    pub min: SummarySeries,
}

fn check_range(config: &AggregateConfig) -> Result<usize, ExperimentError> {
    if config.k_range.is_empty() {
        return Err(ExperimentError::InvalidRange(format!(
            "{}..={} selects no k",
            config.k_range.start(),
            config.k_range.end()
        )));
    }
    Ok(*config.k_range.start())
}

fn read_metric(
    dir: &str,
    config: &AggregateConfig,
    kind: MetricKind,
    k: usize,
) -> Result<(PathBuf, Array2<f64>), ExperimentError> {
    let path = metric_path(dir, &config.metrics_subdir, kind, k);
    let table = read_table(&path)?;
    debug!(
        k,
        rows = table.nrows(),
        cols = table.ncols(),
        path = %path.display(),
        "read metric file"
    );
    Ok((path, table))
}

/// Collect average and minimum silhouettes for every k of the sweep.
///
/// For each k, the column means of `Si_at_k<k>` are reduced to their mean
/// and their minimum. Any missing or malformed file fails the whole sweep.
pub fn collect_silhouettes(
    dir: &str,
    config: &AggregateConfig,
) -> Result<SilhouetteSummary, ExperimentError> {
    let k_start = check_range(config)?;
    let mut avg = SummarySeries::new(k_start);
    let mut min = SummarySeries::new(k_start);

    for k in config.k_range.clone() {
        let (path, table) = read_metric(dir, config, MetricKind::Silhouette, k)?;
        let (k_avg, k_min) =
            silhouette_stats(&table).ok_or(ExperimentError::EmptyInput { path })?;
        avg.values.push(k_avg);
        min.values.push(k_min);
    }

    info!(n_k = avg.len(), "collected silhouettes");
    Ok(SilhouetteSummary { avg, min })
}

/// Collect the mean relative error for every k of the sweep.
pub fn collect_relative_errors(
    dir: &str,
    config: &AggregateConfig,
) -> Result<SummarySeries, ExperimentError> {
    let mut series = SummarySeries::new(check_range(config)?);

    for k in config.k_range.clone() {
        let (path, table) = read_metric(dir, config, MetricKind::RelativeError, k)?;
        series
            .values
            .push(flat_mean(&table).ok_or(ExperimentError::EmptyInput { path })?);
    }

    info!(n_k = series.len(), "collected relative errors");
    Ok(series)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

/// Write `<dir>Avg_sil.csv` and `<dir>Min_sil.csv`; returns the two paths.
///
/// Both series are written to `.partial` files first and only renamed into
/// place once both writes succeed, so a failed run leaves neither summary.
pub fn write_silhouette_summary(
    dir: &str,
    summary: &SilhouetteSummary,
) -> Result<(PathBuf, PathBuf), ExperimentError> {
    let avg_path = summary_path(dir, AVG_SIL_FILE);
    let min_path = summary_path(dir, MIN_SIL_FILE);
    let avg_staged = staging_path(&avg_path);
    let min_staged = staging_path(&min_path);

    let staged = write_series(&avg_staged, &summary.avg.values)
        .and_then(|_| write_series(&min_staged, &summary.min.values));
    if let Err(e) = staged {
        let _ = fs::remove_file(&avg_staged);
        let _ = fs::remove_file(&min_staged);
        return Err(e);
    }

    fs::rename(&avg_staged, &avg_path).map_err(|e| ExperimentError::io(&avg_path, e))?;
    fs::rename(&min_staged, &min_path).map_err(|e| ExperimentError::io(&min_path, e))?;
    info!(avg = %avg_path.display(), min = %min_path.display(), "wrote silhouette summary");
    Ok((avg_path, min_path))
}

/// Write `<dir>Relerr_Avg.csv`; returns its path.
pub fn write_relative_error_summary(
    dir: &str,
    series: &SummarySeries,
) -> Result<PathBuf, ExperimentError> {
    let path = summary_path(dir, RELERR_AVG_FILE);
    write_series(&path, &series.values)?;
    info!(path = %path.display(), "wrote relative error summary");
    Ok(path)
}
