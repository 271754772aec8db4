use crate::config::SplitConfig;
use crate::error::ExperimentError;
use crate::matrix_io::{is_mat_path, load_mat, write_table};
use ndarray::{s, ArrayView2};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One rectangular block of the input matrix, owned by a single worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionBlock {
    /// Flattened partition index, row-major over the grid
    pub index: usize,

    /// Row group (0..pr)
    pub row_group: usize,

    /// Column group (0..pc)
    pub col_group: usize,

    /// Rows of the source matrix covered by this block
    pub rows: Range<usize>,

    /// Columns of the source matrix covered by this block
    pub cols: Range<usize>,
}

impl PartitionBlock {
    /// View of this block inside the source matrix
    pub fn view<'a>(&self, data: &ArrayView2<'a, f64>) -> ArrayView2<'a, f64> {
        (*data).slice_move(s![self.rows.clone(), self.cols.clone()])
    }

    /// File name the block is written under
    pub fn file_name(&self) -> String {
        format!("A_{}", self.index)
    }
}

/// A `pr x pc` grid of equally sized blocks.
///
/// Block extents are `floor(rows / pr) x floor(cols / pc)`; rows and columns
/// past the last full block are not assigned to any partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionGrid {
    pr: usize,
    pc: usize,
    n_partitions: usize,
    n_rows: usize,
    n_cols: usize,
    block_rows: usize,
    block_cols: usize,
}

impl PartitionGrid {
    /// Create a grid for a `rows x cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if `pr` or `pc` is 0, or if `pr * pc` overflows.
    pub fn new(rows: usize, cols: usize, pr: usize, pc: usize) -> Result<Self, ExperimentError> {
        if pr == 0 || pc == 0 {
            return Err(ExperimentError::InvalidPartition(format!(
                "partition counts must be greater than 0 (pr={}, pc={})",
                pr, pc
            )));
        }
        let n_partitions = pr.checked_mul(pc).ok_or_else(|| {
            ExperimentError::InvalidPartition(format!(
                "too many partitions (pr={}, pc={})",
                pr, pc
            ))
        })?;

        Ok(Self {
            pr,
            pc,
            n_partitions,
            n_rows: rows,
            n_cols: cols,
            block_rows: rows / pr,
            block_cols: cols / pc,
        })
    }

    /// Total number of partitions (`pr * pc`)
    pub fn n_partitions(&self) -> usize {
        self.n_partitions
    }

    /// Shape shared by every block
    pub fn block_shape(&self) -> (usize, usize) {
        (self.block_rows, self.block_cols)
    }

    /// Rows and columns left out of every block
    pub fn remainder(&self) -> (usize, usize) {
        (
            self.n_rows - self.block_rows * self.pr,
            self.n_cols - self.block_cols * self.pc,
        )
    }

    /// Blocks in row-major grid order
    pub fn blocks(&self) -> impl Iterator<Item = PartitionBlock> + '_ {
        (0..self.pr).flat_map(move |i| {
            (0..self.pc).map(move |j| PartitionBlock {
                index: i * self.pc + j,
                row_group: i,
                col_group: j,
                rows: i * self.block_rows..(i + 1) * self.block_rows,
                cols: j * self.block_cols..(j + 1) * self.block_cols,
            })
        })
    }
}

/// How a matrix of a given shape will be split
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitPlan {
    /// More rows than columns: split over the row-major grid
    RowWise(PartitionGrid),

    /// Columns >= rows: not implemented
    ColumnWiseUnsupported { rows: usize, cols: usize },
}

impl SplitPlan {
    /// Unwrap the row-wise grid, failing for the column-wise case
    pub fn into_grid(self) -> Result<PartitionGrid, ExperimentError> {
        match self {
            SplitPlan::RowWise(grid) => Ok(grid),
            SplitPlan::ColumnWiseUnsupported { rows, cols } => {
                Err(ExperimentError::UnsupportedOrientation { rows, cols })
            }
        }
    }
}

/// Decide how a `rows x cols` matrix is split into `pr x pc` partitions.
///
/// The orientation is chosen from the matrix shape alone, before the
/// partition counts are looked at.
pub fn plan_split(
    rows: usize,
    cols: usize,
    pr: usize,
    pc: usize,
) -> Result<SplitPlan, ExperimentError> {
    if rows > cols {
        Ok(SplitPlan::RowWise(PartitionGrid::new(rows, cols, pr, pc)?))
    } else {
        Ok(SplitPlan::ColumnWiseUnsupported { rows, cols })
    }
}

/// Summary of a completed split
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Directory the blocks were written to (`<output>/<p>cores`)
    pub partition_dir: PathBuf,

    /// Block files, indexed by partition
    pub block_paths: Vec<PathBuf>,

    /// Shape shared by every block
    pub block_shape: (usize, usize),

    /// Rows and columns that did not fit in any block
    pub dropped: (usize, usize),
}

/// Directory holding the blocks of a `n_partitions`-way split
pub fn partition_dir(output_dir: &Path, n_partitions: usize) -> PathBuf {
    output_dir.join(format!("{}cores", n_partitions))
}

/// Split a matrix into `pr x pc` blocks and write each to `<output>/<p>cores/A_<i>`.
///
/// Output directories are created if missing; existing block files are
/// overwritten.
///
/// # Errors
///
/// Returns an error if:
/// - The matrix does not have more rows than columns
/// - `pr` or `pc` is 0
/// - A directory or block file cannot be written
pub fn split_matrix(
    data: &ArrayView2<f64>,
    pr: usize,
    pc: usize,
    output_dir: &Path,
    config: &SplitConfig,
) -> Result<SplitReport, ExperimentError> {
    let grid = plan_split(data.nrows(), data.ncols(), pr, pc)?.into_grid()?;

    let dir = partition_dir(output_dir, grid.n_partitions());
    fs::create_dir_all(&dir).map_err(|e| ExperimentError::io(&dir, e))?;

    let mut block_paths = Vec::new();
    for block in grid.blocks() {
        let path = dir.join(block.file_name());
        write_table(&path, &block.view(data), config.delimiter)?;
        debug!(
            index = block.index,
            rows = ?block.rows,
            cols = ?block.cols,
            path = %path.display(),
            "wrote partition block"
        );
        block_paths.push(path);
    }

    let (dropped_rows, dropped_cols) = grid.remainder();
    if dropped_rows > 0 || dropped_cols > 0 {
        info!(dropped_rows, dropped_cols, "remainder not assigned to any block");
    }
    info!(
        partitions = grid.n_partitions(),
        dir = %dir.display(),
        "split complete"
    );

    Ok(SplitReport {
        partition_dir: dir,
        block_paths,
        block_shape: grid.block_shape(),
        dropped: grid.remainder(),
    })
}

/// Load the matrix from a `.mat` file and split it.
///
/// # Errors
///
/// Returns [`ExperimentError::InvalidFormat`] if the path does not name a
/// `.mat` file, and any error of [`load_mat`] or [`split_matrix`].
pub fn split_mat_file(
    data_file: &Path,
    pr: usize,
    pc: usize,
    output_dir: &Path,
    config: &SplitConfig,
) -> Result<SplitReport, ExperimentError> {
    if !is_mat_path(data_file) {
        return Err(ExperimentError::InvalidFormat(
            data_file.display().to_string(),
        ));
    }

    let data = load_mat(data_file, &config.variable)?;
    info!(
        rows = data.nrows(),
        cols = data.ncols(),
        "Shape of input matrix"
    );
    debug!(pr, pc, "splitting data");

    split_matrix(&data.view(), pr, pc, output_dir, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn sequential(rows: usize, cols: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64)
    }

    #[test]
    fn test_grid_blocks_row_major() {
        let grid = PartitionGrid::new(6, 4, 2, 2).unwrap();
        let blocks: Vec<_> = grid.blocks().collect();

        assert_eq!(blocks.len(), 4);
        assert_eq!(grid.block_shape(), (3, 2));
        assert_eq!((blocks[1].row_group, blocks[1].col_group), (0, 1));
        assert_eq!((blocks[2].row_group, blocks[2].col_group), (1, 0));
        assert_eq!(blocks[3].rows, 3..6);
        assert_eq!(blocks[3].cols, 2..4);
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.index, i);
            assert_eq!(block.file_name(), format!("A_{}", i));
        }
    }

    #[test]
    fn test_grid_drops_remainder() {
        let grid = PartitionGrid::new(7, 5, 2, 2).unwrap();
        assert_eq!(grid.block_shape(), (3, 2));
        assert_eq!(grid.remainder(), (1, 1));

        let last = grid.blocks().last().unwrap();
        assert_eq!(last.rows.end, 6);
        assert_eq!(last.cols.end, 4);
    }

    #[test]
    fn test_block_view_quadrants() {
        let data = sequential(6, 4);
        let view = data.view();
        let grid = PartitionGrid::new(6, 4, 2, 2).unwrap();
        let blocks: Vec<_> = grid.blocks().collect();

        assert_eq!(blocks[0].view(&view), data.slice(s![0..3, 0..2]));
        assert_eq!(blocks[1].view(&view), data.slice(s![0..3, 2..4]));
        assert_eq!(blocks[2].view(&view), data.slice(s![3..6, 0..2]));
        assert_eq!(blocks[3].view(&view), data.slice(s![3..6, 2..4]));
    }

    #[test]
    fn test_plan_row_wise() {
        let plan = plan_split(10, 3, 5, 1).unwrap();
        assert!(matches!(plan, SplitPlan::RowWise(_)));
    }

    #[test]
    fn test_plan_column_wise_unsupported() {
        for &(rows, cols) in &[(3, 10), (4, 4), (1, 1)] {
            let plan = plan_split(rows, cols, 2, 2).unwrap();
            assert_eq!(plan, SplitPlan::ColumnWiseUnsupported { rows, cols });
            assert!(matches!(
                plan.into_grid(),
                Err(ExperimentError::UnsupportedOrientation { .. })
            ));
        }
    }

    #[test]
    fn test_orientation_checked_before_partition_counts() {
        let plan = plan_split(2, 8, 0, 0).unwrap();
        assert!(matches!(plan, SplitPlan::ColumnWiseUnsupported { .. }));
    }

    #[test]
    fn test_zero_partitions() {
        assert!(matches!(
            PartitionGrid::new(10, 2, 0, 1),
            Err(ExperimentError::InvalidPartition(_))
        ));
        assert!(matches!(
            plan_split(10, 2, 2, 0),
            Err(ExperimentError::InvalidPartition(_))
        ));
    }

    #[test]
    fn test_partition_count_overflow() {
        let huge = 1usize << (usize::BITS / 2 + 1);
        assert!(matches!(
            PartitionGrid::new(6, 4, huge, huge),
            Err(ExperimentError::InvalidPartition(_))
        ));
        assert!(matches!(
            plan_split(6, 4, usize::MAX, 2),
            Err(ExperimentError::InvalidPartition(_))
        ));
    }

    #[test]
    fn test_partition_dir_name() {
        assert_eq!(
            partition_dir(Path::new("/data/out"), 24),
            PathBuf::from("/data/out/24cores")
        );
    }

    #[test]
    fn test_split_mat_file_rejects_other_formats() {
        let dir = tempfile::tempdir().unwrap();
        let result = split_mat_file(
            Path::new("input.csv"),
            2,
            2,
            dir.path(),
            &SplitConfig::default(),
        );
        assert!(matches!(result, Err(ExperimentError::InvalidFormat(_))));
    }
}
