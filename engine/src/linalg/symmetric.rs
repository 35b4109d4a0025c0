use std::fmt;
use std::ops::{AddAssign, MulAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_index, fmt_matrix, LinalgError, MatrixRead, VectorRead};

/// Square symmetric matrix stored as its packed lower triangle.
///
/// Implements [`MatrixRead`] but not [`super::MatrixWrite`]: a single-entry
/// write would break symmetry, so updates go through
/// [`SymmetricMatrix::set_symmetric`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymmetricMatrix {
    size: usize,
    packed: Vec<f64>,
}

fn packed_len(size: usize) -> usize {
    size * (size + 1) / 2
}

impl SymmetricMatrix {
    /// All-zero `size x size` matrix.
    pub fn zeros(size: usize) -> Self {
        Self { size, packed: vec![0.0; packed_len(size)] }
    }

    /// Wrap a packed lower triangle, row by row: `(0,0), (1,0), (1,1), (2,0) ...`.
    pub fn from_packed(size: usize, packed: Vec<f64>) -> Result<Self, LinalgError> {
        if packed.len() != packed_len(size) {
            return Err(LinalgError::DataLength { expected: packed_len(size), got: packed.len() });
        }
        Ok(Self { size, packed })
    }

    /// `v vᵗ`
    pub fn self_outer_product<V: VectorRead + ?Sized>(v: &V) -> Self {
        let size = v.len();
        let mut packed = Vec::with_capacity(packed_len(size));
        for r in 0..size {
            for c in 0..=r {
                packed.push(v.get(r) * v.get(c));
            }
        }
        Self { size, packed }
    }

    /// Store `value` at both `(row, column)` and `(column, row)`.
    pub fn set_symmetric(&mut self, row: usize, column: usize, value: f64) {
        let i = self.slot(row, column);
        self.packed[i] = value;
    }

    /// Packed lower-triangle entries.
    pub fn as_packed(&self) -> &[f64] {
        &self.packed
    }

    fn slot(&self, row: usize, column: usize) -> usize {
        check_index(row, column, self.size, self.size);
        let (hi, lo) = if row >= column { (row, column) } else { (column, row) };
        hi * (hi + 1) / 2 + lo
    }
}

impl MatrixRead for SymmetricMatrix {
    fn rows(&self) -> usize {
        self.size
    }

    fn columns(&self) -> usize {
        self.size
    }

    fn get(&self, row: usize, column: usize) -> f64 {
        self.packed[self.slot(row, column)]
    }
}

impl AddAssign<&SymmetricMatrix> for SymmetricMatrix {
    fn add_assign(&mut self, rhs: &SymmetricMatrix) {
        assert_eq!(self.size, rhs.size, "matrix shapes differ");
        self.packed.iter_mut().zip(&rhs.packed).for_each(|(a, b)| *a += b);
    }
}

impl MulAssign<f64> for SymmetricMatrix {
    fn mul_assign(&mut self, k: f64) {
        self.packed.iter_mut().for_each(|a| *a *= k);
    }
}

impl fmt::Display for SymmetricMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Vector;

    #[test]
    fn outer_product_is_symmetric() {
        let m = SymmetricMatrix::self_outer_product(&Vector::from([1.0, 2.0, 3.0]));
        assert_eq!(m.as_packed(), &[1.0, 2.0, 4.0, 3.0, 6.0, 9.0]);
        assert_eq!(m.get(0, 2), m.get(2, 0));
        assert_eq!(m.get(1, 2), 6.0);
    }

    #[test]
    fn set_symmetric_writes_both_sides() {
        let mut m = SymmetricMatrix::zeros(3);
        m.set_symmetric(0, 2, 4.0);
        assert_eq!(m.get(2, 0), 4.0);
        assert_eq!(m.get(0, 2), 4.0);
        assert_eq!(m.to_string(), "(0, 0, 4)\n(0, 0, 0)\n(4, 0, 0)");
    }

    #[test]
    fn accumulates_in_place() {
        let mut m = SymmetricMatrix::zeros(2);
        m += &SymmetricMatrix::self_outer_product(&Vector::from([1.0, 0.0]));
        m += &SymmetricMatrix::self_outer_product(&Vector::from([1.0, 1.0]));
        m *= -2.0;
        assert_eq!(m.to_matrix().as_slice(), &[-4.0, -2.0, -2.0, -2.0]);
    }

    #[test]
    fn packed_length_is_checked() {
        assert_eq!(
            SymmetricMatrix::from_packed(3, vec![0.0; 5]),
            Err(LinalgError::DataLength { expected: 6, got: 5 })
        );
        assert!(SymmetricMatrix::from_packed(2, vec![1.0, 0.0, 1.0]).is_ok());
    }
}
