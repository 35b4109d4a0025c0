use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_index, fmt_matrix, LinalgError, MatrixRead, MatrixViewMut, MatrixWrite, VectorViewMut};

/// Dense row-major matrix.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// All-zero `rows x columns` matrix.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self { rows, columns, data: vec![0.0; rows * columns] }
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |r, c| if r == c { 1.0 } else { 0.0 })
    }

    /// Matrix whose entry `(r, c)` is `f(r, c)`.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                data.push(f(r, c));
            }
        }
        Self { rows, columns, data }
    }

    /// Wrap a row-major buffer of exactly `rows * columns` values.
    pub fn from_row_major(rows: usize, columns: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        if data.len() != rows * columns {
            return Err(LinalgError::DataLength { expected: rows * columns, got: data.len() });
        }
        Ok(Self { rows, columns, data })
    }

    /// Stack equally long rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(LinalgError::DataLength { expected: columns, got: row.len() });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), columns, data })
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Writable view of the whole matrix.
    pub fn view_mut(&mut self) -> MatrixViewMut<'_> {
        MatrixViewMut::dense(&mut self.data, self.rows, self.columns)
    }

    /// Writable view of one row.
    pub fn row_mut(&mut self, row: usize) -> VectorViewMut<'_> {
        assert!(row < self.rows, "row {row} out of range for {} rows", self.rows);
        let columns = self.columns;
        VectorViewMut::contiguous(&mut self.data, row * columns, columns)
    }

    /// Writable view of one column.
    pub fn column_mut(&mut self, column: usize) -> VectorViewMut<'_> {
        self.view_mut().into_column(column)
    }

    /// Writable `rows x columns` block starting at `(row, column)`.
    pub fn block_mut(&mut self, row: usize, column: usize, rows: usize, columns: usize) -> MatrixViewMut<'_> {
        self.view_mut().into_block(row, column, rows, columns)
    }

    /// Exchange two rows; a no-op when they coincide.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(a < self.rows && b < self.rows, "rows ({a}, {b}) out of range for {} rows", self.rows);
        if a == b {
            return;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.data.split_at_mut(hi * self.columns);
        head[lo * self.columns..(lo + 1) * self.columns].swap_with_slice(&mut tail[..self.columns]);
    }
}

impl MatrixRead for Matrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, column: usize) -> f64 {
        self[(row, column)]
    }
}

impl MatrixWrite for Matrix {
    fn set(&mut self, row: usize, column: usize, value: f64) {
        self[(row, column)] = value;
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        check_index(row, column, self.rows, self.columns);
        &self.data[row * self.columns + column]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        check_index(row, column, self.rows, self.columns);
        &mut self.data[row * self.columns + column]
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(mut self, rhs: Matrix) -> Matrix {
        assert_eq!(self.shape(), rhs.shape(), "matrix shapes differ");
        self.data.iter_mut().zip(&rhs.data).for_each(|(a, b)| *a += b);
        self
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(mut self, rhs: Matrix) -> Matrix {
        assert_eq!(self.shape(), rhs.shape(), "matrix shapes differ");
        self.data.iter_mut().zip(&rhs.data).for_each(|(a, b)| *a -= b);
        self
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(mut self, k: f64) -> Matrix {
        self.data.iter_mut().for_each(|a| *a *= k);
        self
    }
}

impl Div<f64> for Matrix {
    type Output = Matrix;

    fn div(mut self, k: f64) -> Matrix {
        self.data.iter_mut().for_each(|a| *a /= k);
        self
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self * -1.0
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}
