//! # nmfk-experiments
//!
//! Experiment tooling around a distributed NMFk solver, built on ndarray.
//!
//! ## Features
//!
//! - **Input splitting**: Load a matrix from a MATLAB `.mat` file and write it
//!   as a `pr x pc` grid of tab-delimited blocks (`<out>/<p>cores/A_<i>`), one
//!   per worker
//! - **Metric aggregation**: Reduce the per-k silhouette and relative-error
//!   files written by the solver into one summary value per k
//! - **Result plots**: Render silhouette widths and relative error against k
//!   on a dual-axis chart
//!
//! ## Example
//!
//! ```rust
//! use nmfk_experiments::{plan_split, SplitPlan};
//!
//! // 6x4 matrix, 2x2 workers: four 3x2 blocks
//! let grid = match plan_split(6, 4, 2, 2).unwrap() {
//!     SplitPlan::RowWise(grid) => grid,
//!     SplitPlan::ColumnWiseUnsupported { .. } => unreachable!(),
//! };
//! assert_eq!(grid.n_partitions(), 4);
//! assert_eq!(grid.block_shape(), (3, 2));
//! ```
//!
//! ## Aggregating a sweep
//!
//! ```no_run
//! use nmfk_experiments::{collect_silhouettes, write_silhouette_summary, AggregateConfig};
//!
//! let config = AggregateConfig::new(2..=20);
//! let summary = collect_silhouettes("/runs/bbc", &config).unwrap();
//! assert_eq!(summary.avg.len(), 19);
//!
//! // writes /runs/bbcAvg_sil.csv and /runs/bbcMin_sil.csv
//! write_silhouette_summary("/runs/bbc", &summary).unwrap();
//! ```

mod aggregate;
mod config;
mod error;
mod matrix_io;
mod plot;
mod split;

pub use aggregate::{
    collect_relative_errors, collect_silhouettes, flat_mean, metric_path, silhouette_stats,
    summary_path, write_relative_error_summary, write_silhouette_summary, MetricKind,
    SilhouetteSummary, SummarySeries, AVG_SIL_FILE, MIN_SIL_FILE, RELERR_AVG_FILE,
};
pub use config::{AggregateConfig, PlotConfig, SplitConfig};
pub use error::ExperimentError;
pub use matrix_io::{
    format_value, is_mat_path, load_mat, parse_table, read_series, read_table, write_series,
    write_table,
};
pub use plot::{figure_path, render_summary, SummaryTable};
pub use split::{
    partition_dir, plan_split, split_mat_file, split_matrix, PartitionBlock, PartitionGrid,
    SplitPlan, SplitReport,
};
