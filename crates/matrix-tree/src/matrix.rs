//! Dense row-major matrices produced by collapse

use std::fmt;

use serde::Serialize;

use crate::error::{MatrixTreeError, Result};

/// A dense `rows x cols` matrix of `f64` values in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// An all-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Fails with `SizeMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatrixTreeError::SizeMismatch {
                expected: rows * cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at row `i`, column `j`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// One row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over the rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols.max(1))
    }

    /// The underlying row-major buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Consume the matrix and return its buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Compute `y = self · x` into `y`.
    ///
    /// Both lengths are checked before `y` is written.
    pub fn mul_vec_into(&self, x: &[f64], y: &mut [f64]) -> Result<()> {
        if x.len() != self.cols {
            return Err(MatrixTreeError::DimensionMismatch {
                expected: self.cols,
                found: x.len(),
            });
        }
        if y.len() != self.rows {
            return Err(MatrixTreeError::DimensionMismatch {
                expected: self.rows,
                found: y.len(),
            });
        }

        for (out, row) in y.iter_mut().zip(self.row_iter()) {
            *out = row.iter().zip(x).map(|(a, b)| a * b).sum();
        }
        Ok(())
    }

    /// Compute `self · x` as a new vector.
    pub fn mul_vec(&self, x: &[f64]) -> Result<Vec<f64>> {
        let mut y = vec![0.0; self.rows];
        self.mul_vec_into(x, &mut y)?;
        Ok(y)
    }
}

/// Write a row-major buffer as a bracketed block, every line prefixed by `indent`.
pub(crate) fn write_block(
    f: &mut fmt::Formatter<'_>,
    data: &[f64],
    cols: usize,
    indent: &str,
) -> fmt::Result {
    writeln!(f, "{indent}[")?;
    for row in data.chunks_exact(cols.max(1)) {
        write!(f, "{indent}  ")?;
        for value in row {
            write!(f, "{:8.3} ", value)?;
        }
        writeln!(f)?;
    }
    write!(f, "{indent}]")
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.data, self.cols, "")
    }
}
