use std::ops::RangeInclusive;

/// Configuration for splitting an input matrix into partition blocks
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Name of the variable holding the matrix inside the `.mat` file
    pub variable: String,

    /// Separator written between values of a block row
    pub delimiter: char,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            variable: "X".to_string(),
            delimiter: '\t',
        }
    }
}

impl SplitConfig {
    /// Set the variable name to load from the `.mat` file
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Set the value delimiter for block files
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Configuration for the per-k metric aggregators
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Latent dimensionalities to collect, inclusive on both ends.
    /// The first value maps to index 0 of every summary series.
    pub k_range: RangeInclusive<usize>,

    /// Directory (relative to the run directory) holding the per-k files
    pub metrics_subdir: String,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            k_range: 2..=20,
            metrics_subdir: "silhouettes".to_string(),
        }
    }
}

impl AggregateConfig {
    /// Create a configuration sweeping the given k range
    pub fn new(k_range: RangeInclusive<usize>) -> Self {
        Self {
            k_range,
            ..Default::default()
        }
    }

    /// Set the k range
    pub fn with_k_range(mut self, k_range: RangeInclusive<usize>) -> Self {
        self.k_range = k_range;
        self
    }

    /// Set the metrics subdirectory
    pub fn with_metrics_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.metrics_subdir = subdir.into();
        self
    }
}

/// Configuration for the summary chart
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Caption text; the figure name is appended in parentheses
    pub title_prefix: String,

    /// First k of the summary series
    pub k_start: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1000,
            title_prefix: "Distnmfk Results".to_string(),
            k_start: 2,
        }
    }
}

impl PlotConfig {
    /// Set the image size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the caption prefix
    pub fn with_title_prefix(mut self, title_prefix: impl Into<String>) -> Self {
        self.title_prefix = title_prefix.into();
        self
    }

    /// Set the k value plotted at the first position
    pub fn with_k_start(mut self, k_start: usize) -> Self {
        self.k_start = k_start;
        self
    }
}
