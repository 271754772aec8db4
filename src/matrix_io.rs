//! Plain-text and MATLAB matrix I/O.
//!
//! Text tables carry no header and no schema; values are written in the
//! `%.18e` style used by numpy's `savetxt`, so files produced here are
//! interchangeable with the ones the solver tooling already consumes.

use crate::error::ExperimentError;
use matfile::{MatFile, NumericData};
use ndarray::{Array2, ArrayView2, ShapeBuilder};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Returns true when the path names a MATLAB file.
///
/// Only the trailing three characters are inspected, so `data.mat` and
/// `datamat` both pass.
pub fn is_mat_path(path: &Path) -> bool {
    path.to_string_lossy().ends_with("mat")
}

/// Load a real 2-D matrix stored under `variable` in a Level 5 MAT file.
///
/// Any real numeric class is widened to f64. Complex arrays and arrays that
/// are not two-dimensional are rejected.
pub fn load_mat(path: &Path, variable: &str) -> Result<Array2<f64>, ExperimentError> {
    let file = File::open(path).map_err(|e| ExperimentError::io(path, e))?;
    let mat = MatFile::parse(BufReader::new(file)).map_err(|e| ExperimentError::Mat {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    })?;

    let array = mat
        .find_by_name(variable)
        .ok_or_else(|| ExperimentError::MissingVariable {
            name: variable.to_string(),
            path: path.to_path_buf(),
        })?;

    let size = array.size();
    if size.len() != 2 {
        return Err(ExperimentError::UnsupportedMatrix(format!(
            "'{}' has {} dimensions, expected 2",
            variable,
            size.len()
        )));
    }
    let (rows, cols) = (size[0], size[1]);

    let values = real_values(array.data()).ok_or_else(|| {
        ExperimentError::UnsupportedMatrix(format!("'{}' is complex", variable))
    })?;

    // MAT files store arrays column-major
    Array2::from_shape_vec((rows, cols).f(), values)
        .map_err(|e| ExperimentError::UnsupportedMatrix(e.to_string()))
}

fn real_values(data: &NumericData) -> Option<Vec<f64>> {
    let values = match data {
        NumericData::Double { real, imag: None } => real.clone(),
        NumericData::Single { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int8 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt8 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int16 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt16 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int32 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt32 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int64 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt64 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        _ => return None,
    };
    Some(values)
}

/// Read a whitespace-delimited numeric table.
///
/// Blank lines are skipped. Every non-blank line must hold the same number
/// of values, and the file must hold at least one value.
pub fn read_table(path: &Path) -> Result<Array2<f64>, ExperimentError> {
    let content = fs::read_to_string(path).map_err(|e| ExperimentError::io(path, e))?;
    parse_table(&content, path)
}

/// Parse the contents of a whitespace-delimited numeric table.
pub fn parse_table(content: &str, path: &Path) -> Result<Array2<f64>, ExperimentError> {
    let mut values = Vec::new();
    let mut n_cols: Option<usize> = None;
    let mut n_rows = 0;

    for (line_idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let row_start = values.len();
        for token in trimmed.split_whitespace() {
            values.push(parse_value(token, path, line_idx + 1)?);
        }
        let width = values.len() - row_start;

        match n_cols {
            None => n_cols = Some(width),
            Some(expected) if expected != width => {
                return Err(ExperimentError::Parse {
                    path: path.to_path_buf(),
                    line: line_idx + 1,
                    message: format!("expected {} columns, found {}", expected, width),
                });
            }
            Some(_) => {}
        }
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or_else(|| ExperimentError::EmptyInput {
        path: path.to_path_buf(),
    })?;

    Array2::from_shape_vec((n_rows, n_cols), values).map_err(|e| ExperimentError::Parse {
        path: path.to_path_buf(),
        line: n_rows,
        message: e.to_string(),
    })
}

/// Read every value of a comma- or whitespace-delimited file, in file order.
pub fn read_series(path: &Path) -> Result<Vec<f64>, ExperimentError> {
    let content = fs::read_to_string(path).map_err(|e| ExperimentError::io(path, e))?;

    let mut values = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            values.push(parse_value(token, path, line_idx + 1)?);
        }
    }

    if values.is_empty() {
        return Err(ExperimentError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    Ok(values)
}

fn parse_value(token: &str, path: &Path, line: usize) -> Result<f64, ExperimentError> {
    token.parse::<f64>().map_err(|_| ExperimentError::Parse {
        path: path.to_path_buf(),
        line,
        message: format!("invalid number '{}'", token),
    })
}

/// Write a matrix as delimited text, one matrix row per line.
pub fn write_table(
    path: &Path,
    data: &ArrayView2<f64>,
    delimiter: char,
) -> Result<(), ExperimentError> {
    let file = File::create(path).map_err(|e| ExperimentError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let mut sep = [0u8; 4];
    let sep = delimiter.encode_utf8(&mut sep).as_bytes();

    for row in data.outer_iter() {
        for (j, &value) in row.iter().enumerate() {
            if j > 0 {
                writer.write_all(sep).map_err(|e| ExperimentError::io(path, e))?;
            }
            writer
                .write_all(format_value(value).as_bytes())
                .map_err(|e| ExperimentError::io(path, e))?;
        }
        writer
            .write_all(b"\n")
            .map_err(|e| ExperimentError::io(path, e))?;
    }

    writer.flush().map_err(|e| ExperimentError::io(path, e))
}

/// Write a series as a single column, one value per line.
pub fn write_series(path: &Path, values: &[f64]) -> Result<(), ExperimentError> {
    let mut out = String::with_capacity(values.len() * 26);
    for &value in values {
        out.push_str(&format_value(value));
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| ExperimentError::io(path, e))
}

/// Format a value like numpy's default `%.18e`, e.g. `1.000000000000000000e+00`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.18e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => formatted,
    }
}
