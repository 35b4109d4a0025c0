//! Dense and packed-symmetric linear algebra over `f64`.
//!
//! Shapes implement a read trait and, when they own or borrow writable
//! storage, a write trait. Arithmetic through the provided trait methods is
//! lazy: `a.plus(&b)` borrows both operands and computes entries on demand.
//! Indexed access outside the shape panics.

use std::fmt;

mod matrix;
mod solve;
mod symmetric;
mod vector;
mod view;

pub use matrix::Matrix;
pub use solve::solve;
pub use symmetric::SymmetricMatrix;
pub use vector::Vector;
pub use view::{MatrixView, MatrixViewMut, VectorView, VectorViewMut};

/// Errors from shape-checked construction and solving.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// A square matrix was required.
    #[error("matrix is {rows}x{columns}, expected square")]
    NotSquare {
        /// Row count of the offending matrix.
        rows: usize,
        /// Column count of the offending matrix.
        columns: usize,
    },
    /// Operand lengths disagree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Length required by the other operand.
        expected: usize,
        /// Length supplied.
        got: usize,
    },
    /// A raw buffer does not match the requested shape.
    #[error("buffer holds {got} values, shape needs {expected}")]
    DataLength {
        /// Values the shape needs.
        expected: usize,
        /// Values supplied.
        got: usize,
    },
    /// No nonzero pivot is left in this column.
    #[error("matrix is singular (no pivot in column {column})")]
    Singular {
        /// Column where elimination stalled.
        column: usize,
    },
}

/// Read access to a rectangular shape.
pub trait MatrixRead {
    /// Number of rows.
    fn rows(&self) -> usize;
    /// Number of columns.
    fn columns(&self) -> usize;
    /// Entry at `(row, column)`; panics when out of range.
    fn get(&self, row: usize, column: usize) -> f64;

    /// `(rows, columns)`
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    /// Whether rows equal columns.
    fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    /// Lazy elementwise sum.
    fn plus<'a, M: MatrixRead + ?Sized>(&'a self, other: &'a M) -> MatrixView<'a> {
        assert_same_shape(self, other);
        MatrixView::new(self.rows(), self.columns(), move |r, c| self.get(r, c) + other.get(r, c))
    }

    /// Lazy elementwise difference.
    fn minus<'a, M: MatrixRead + ?Sized>(&'a self, other: &'a M) -> MatrixView<'a> {
        assert_same_shape(self, other);
        MatrixView::new(self.rows(), self.columns(), move |r, c| self.get(r, c) - other.get(r, c))
    }

    /// Lazy product with a scalar.
    fn scaled(&self, k: f64) -> MatrixView<'_> {
        MatrixView::new(self.rows(), self.columns(), move |r, c| self.get(r, c) * k)
    }

    /// Lazy quotient by a scalar.
    fn divided(&self, k: f64) -> MatrixView<'_> {
        MatrixView::new(self.rows(), self.columns(), move |r, c| self.get(r, c) / k)
    }

    /// Lazy transpose.
    fn transpose(&self) -> MatrixView<'_> {
        MatrixView::new(self.columns(), self.rows(), move |r, c| self.get(c, r))
    }

    /// Lazy view of one row.
    fn row(&self, row: usize) -> VectorView<'_> {
        assert!(row < self.rows(), "row {row} out of range for {} rows", self.rows());
        VectorView::new(self.columns(), move |c| self.get(row, c))
    }

    /// Lazy view of one column.
    fn column(&self, column: usize) -> VectorView<'_> {
        assert!(column < self.columns(), "column {column} out of range for {} columns", self.columns());
        VectorView::new(self.rows(), move |r| self.get(r, column))
    }

    /// Lazy matrix-vector product.
    fn times<'a, V: VectorRead + ?Sized>(&'a self, v: &'a V) -> VectorView<'a> {
        assert_eq!(self.columns(), v.len(), "cannot multiply {:?} matrix by length {} vector", self.shape(), v.len());
        VectorView::new(self.rows(), move |r| (0..self.columns()).map(|c| self.get(r, c) * v.get(c)).sum())
    }

    /// Materialize into an owned row-major matrix.
    fn to_matrix(&self) -> Matrix {
        Matrix::from_fn(self.rows(), self.columns(), |r, c| self.get(r, c))
    }
}

/// Per-entry writes on top of [`MatrixRead`].
pub trait MatrixWrite: MatrixRead {
    /// Store `value` at `(row, column)`; panics when out of range.
    fn set(&mut self, row: usize, column: usize, value: f64);

    /// Copy every entry of `source`, which must have the same shape.
    fn assign<M: MatrixRead + ?Sized>(&mut self, source: &M) {
        assert_same_shape(self, source);
        for r in 0..self.rows() {
            for c in 0..self.columns() {
                self.set(r, c, source.get(r, c));
            }
        }
    }

    /// Set every entry to `value`.
    fn fill(&mut self, value: f64) {
        for r in 0..self.rows() {
            for c in 0..self.columns() {
                self.set(r, c, value);
            }
        }
    }
}

/// Read access to a sequence of values.
pub trait VectorRead {
    /// Number of entries.
    fn len(&self) -> usize;
    /// Entry `index`; panics when out of range.
    fn get(&self, index: usize) -> f64;

    /// Whether there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in order.
    fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Lazy elementwise sum.
    fn plus<'a, V: VectorRead + ?Sized>(&'a self, other: &'a V) -> VectorView<'a> {
        assert_same_len(self, other);
        VectorView::new(self.len(), move |i| self.get(i) + other.get(i))
    }

    /// Lazy elementwise difference.
    fn minus<'a, V: VectorRead + ?Sized>(&'a self, other: &'a V) -> VectorView<'a> {
        assert_same_len(self, other);
        VectorView::new(self.len(), move |i| self.get(i) - other.get(i))
    }

    /// Lazy product with a scalar.
    fn scaled(&self, k: f64) -> VectorView<'_> {
        VectorView::new(self.len(), move |i| self.get(i) * k)
    }

    /// Lazy quotient by a scalar.
    fn divided(&self, k: f64) -> VectorView<'_> {
        VectorView::new(self.len(), move |i| self.get(i) / k)
    }

    /// Inner product; lengths must match.
    fn dot<V: VectorRead + ?Sized>(&self, other: &V) -> f64 {
        assert_same_len(self, other);
        (0..self.len()).map(|i| self.get(i) * other.get(i)).sum()
    }

    /// Euclidean length.
    fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Materialize into an owned vector.
    fn to_vector(&self) -> Vector {
        self.iter().collect()
    }
}

/// Per-entry writes on top of [`VectorRead`].
pub trait VectorWrite: VectorRead {
    /// Store `value` at `index`; panics when out of range.
    fn set(&mut self, index: usize, value: f64);

    /// Copy every entry of `source`, which must have the same length.
    fn assign<V: VectorRead + ?Sized>(&mut self, source: &V) {
        assert_same_len(self, source);
        for i in 0..self.len() {
            self.set(i, source.get(i));
        }
    }

    /// Set every entry to `value`.
    fn fill(&mut self, value: f64) {
        for i in 0..self.len() {
            self.set(i, value);
        }
    }
}

fn assert_same_shape<A: MatrixRead + ?Sized, B: MatrixRead + ?Sized>(a: &A, b: &B) {
    assert_eq!(a.shape(), b.shape(), "matrix shapes differ");
}

fn assert_same_len<A: VectorRead + ?Sized, B: VectorRead + ?Sized>(a: &A, b: &B) {
    assert_eq!(a.len(), b.len(), "vector lengths differ");
}

fn check_index(row: usize, column: usize, rows: usize, columns: usize) {
    assert!(
        row < rows && column < columns,
        "index ({row}, {column}) out of range for {rows}x{columns} matrix"
    );
}

/// `(1, 2, 3)`
fn fmt_vector<V: VectorRead + ?Sized>(v: &V, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    for i in 0..v.len() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v.get(i))?;
    }
    f.write_str(")")
}

/// One parenthesized row per line.
fn fmt_matrix<M: MatrixRead + ?Sized>(m: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for r in 0..m.rows() {
        if r > 0 {
            writeln!(f)?;
        }
        fmt_vector(&m.row(r), f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_views_compose() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
        let b = Matrix::identity(2);
        let sum = a.plus(&b);
        let diff = sum.minus(&b);
        let doubled = diff.scaled(2.0);
        assert_eq!(doubled.to_matrix(),Matrix::from_rows(&[[2.0, 4.0], [6.0, 8.0]])?);
        assert_eq!(a.transpose().get(0, 1), 3.0);
        assert_eq!(a.divided(2.0).get(1, 1), 2.0);
        Ok(())
    }

    #[test]
    fn display_formats() -> Result<(), LinalgError> {
        let v = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(v.to_string(), "(1, 2, 3)");
        let m = Matrix::from_rows(&[[1.0, 0.5], [0.0, -2.0]])?;
        assert_eq!(m.to_string(), "(1, 0.5)\n(0, -2)");
        Ok(())
    }

    #[test]
    #[should_panic(expected = "shapes differ")]
    fn mismatched_shapes_panic() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        let _ = a.plus(&b);
    }

    #[test]
    fn matrix_vector_product() -> Result<(), LinalgError> {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])?;
        let v = Vector::from([1.0, -1.0]);
        assert_eq!(m.times(&v).to_vector(), Vector::from([-1.0, -1.0, -1.0]));
        Ok(())
    }
}
