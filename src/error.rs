use std::path::PathBuf;
use thiserror::Error;

/// Error types for the experiment tooling
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// Input file is not a MATLAB `.mat` file
    #[error("Wrong input format, can only deal with '*.mat' files for now: {0}")]
    InvalidFormat(String),

    /// Requested variable is not stored in the MATLAB file
    #[error("Variable '{name}' not found in {path}")]
    MissingVariable { name: String, path: PathBuf },

    /// Stored array cannot be used as a real 2-D matrix
    #[error("Unsupported matrix: {0}")]
    UnsupportedMatrix(String),

    /// MATLAB file could not be parsed
    #[error("Failed to parse MATLAB file {path}: {message}")]
    Mat { path: PathBuf, message: String },

    /// Column-wise splitting (cols >= rows) is not supported yet
    #[error("Sorry, column-wise splitting is not supported for now ({rows} rows x {cols} cols)")]
    UnsupportedOrientation { rows: usize, cols: usize },

    /// Partition counts are invalid (must be > 0)
    #[error("Invalid partition grid: {0}")]
    InvalidPartition(String),

    /// The k range selects no values
    #[error("Invalid k range: {0}")]
    InvalidRange(String),

    /// Underlying filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A numeric table contained something other than numbers
    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A numeric table contained no values
    #[error("No numeric data in {path}")]
    EmptyInput { path: PathBuf },

    /// Summary series passed to the plotter are not aligned by k
    #[error(
        "Summary series have different lengths: min silhouette {min}, avg silhouette {avg}, relative error {relerr}"
    )]
    SeriesLengthMismatch { min: usize, avg: usize, relerr: usize },

    /// Chart rendering failed
    #[error("Plotting failed: {0}")]
    Plot(String),
}

impl ExperimentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExperimentError::Io {
            path: path.into(),
            source,
        }
    }
}
