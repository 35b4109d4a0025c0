use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use icolat_geo::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{fmt_vector, LinalgError, VectorRead, VectorViewMut, VectorWrite};

/// Dense owned vector.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self { data: vec![0.0; len] }
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Unwrap into the backing buffer.
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }

    /// Writable view of the whole vector.
    pub fn view_mut(&mut self) -> VectorViewMut<'_> {
        let len = self.data.len();
        VectorViewMut::contiguous(&mut self.data, 0, len)
    }

    /// Writable view of `len` entries starting at `start`.
    pub fn slice_mut(&mut self, start: usize, len: usize) -> VectorViewMut<'_> {
        VectorViewMut::contiguous(&mut self.data, start, len)
    }

    /// The three entries of a length-3 vector.
    pub fn to_vec3(&self) -> Result<Vec3, LinalgError> {
        match self.data[..] {
            [x, y, z] => Ok(Vec3::new(x, y, z)),
            _ => Err(LinalgError::DimensionMismatch { expected: 3, got: self.data.len() }),
        }
    }
}

impl VectorRead for Vector {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, index: usize) -> f64 {
        self[index]
    }
}

impl VectorWrite for Vector {
    fn set(&mut self, index: usize, value: f64) {
        self[index] = value;
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self { data }
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(data: [f64; N]) -> Self {
        Self { data: data.to_vec() }
    }
}

impl From<Vec3> for Vector {
    fn from(v: Vec3) -> Self {
        Self { data: vec![v.x, v.y, v.z] }
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(mut self, rhs: Vector) -> Vector {
        assert_eq!(self.len(), rhs.len(), "vector lengths differ");
        self.data.iter_mut().zip(&rhs.data).for_each(|(a, b)| *a += b);
        self
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(mut self, rhs: Vector) -> Vector {
        assert_eq!(self.len(), rhs.len(), "vector lengths differ");
        self.data.iter_mut().zip(&rhs.data).for_each(|(a, b)| *a -= b);
        self
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(mut self, k: f64) -> Vector {
        self.data.iter_mut().for_each(|a| *a *= k);
        self
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(mut self, k: f64) -> Vector {
        self.data.iter_mut().for_each(|a| *a /= k);
        self
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_vector(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_round_trip_needs_three_entries() {
        let v = Vector::from(Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(v.to_vec3(), Ok(Vec3::new(1.0, -2.0, 0.5)));
        assert_eq!(
            Vector::zeros(2).to_vec3(),
            Err(LinalgError::DimensionMismatch { expected: 3, got: 2 })
        );
    }

    #[test]
    fn slices_write_through() {
        let mut v = Vector::zeros(5);
        v.slice_mut(1, 3).fill(2.0);
        v.view_mut().set(4, -1.0);
        assert_eq!(v.as_slice(), &[0.0, 2.0, 2.0, 2.0, -1.0]);
    }

    #[test]
    fn lazy_and_owned_arithmetic_agree() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = Vector::from([0.5, 0.5, 0.5]);
        let lazy = a.plus(&b).to_vector();
        let owned = a.clone() + b.clone();
        assert_eq!(lazy, owned);
        assert_eq!(a.minus(&b).to_vector(), a.clone() - b.clone());
        assert_eq!(a.scaled(2.0).to_vector(), a.clone() * 2.0);
        assert_eq!(a.divided(2.0).to_vector(), a.clone() / 2.0);
        assert_eq!(a.dot(&b), 3.0);
        assert_eq!((-a).get(0), -1.0);
    }
}
