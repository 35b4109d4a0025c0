use crate::error::LatticeError;
use crate::lattice::IcoLattice;
use crate::math::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The lattice triangle a direction falls in.
///
/// `remainder` locates the point inside the triangle: `(0, 0)` is at `a`,
/// `(1, 0)` at `b` and `(0, 1)` at `c`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Projection {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub remainder: [f64; 2],
}

impl Projection {
    /// Barycentric weights of `a`, `b` and `c`.
    #[must_use]
    pub fn weights(&self) -> [f64; 3] {
        let [s, t] = self.remainder;
        [1.0 - s - t, s, t]
    }

    /// The corner with the largest weight (earlier corners win ties).
    #[must_use]
    pub fn nearest(&self) -> usize {
        let [wa, wb, wc] = self.weights();
        if wa >= wb && wa >= wc {
            self.a
        } else if wb >= wc {
            self.b
        } else {
            self.c
        }
    }

    #[must_use]
    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

impl IcoLattice {
    /// Find the lattice triangle under `direction`.
    ///
    /// `direction` need not be unit length. Local coordinates are clamped into
    /// the face, so a direction never falls off the mesh through rounding.
    ///
    /// # Errors
    /// [`LatticeError::DegenerateDirection`] for a zero or non-finite input.
    #[allow(clippy::similar_names, clippy::many_single_char_names)]
    pub fn project(&self, direction: Vec3) -> Result<Projection, LatticeError> {
        if !direction.is_finite() {
            return Err(LatticeError::DegenerateDirection);
        }
        let scale = direction.x.abs().max(direction.y.abs()).max(direction.z.abs());
        if scale == 0.0 {
            return Err(LatticeError::DegenerateDirection);
        }
        let p = direction / scale;

        let mut plane = &self.planes[0];
        let mut best = plane.normal.dot(p).abs();
        for candidate in &self.planes[1..] {
            let d = candidate.normal.dot(p).abs();
            if d > best {
                best = d;
                plane = candidate;
            }
        }
        let face = plane.facing(p);

        let n = f64::from(self.subdivisions());
        let (u, v) = face.local_coordinates(p, n);
        let (mut u, mut v) = (u.clamp(0.0, n), v.clamp(0.0, n));
        if u + v > n {
            let s = n / (u + v);
            u *= s;
            v *= s;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let last = self.subdivisions() as i32 - 1;
        #[allow(clippy::cast_possible_truncation)]
        let (mut iu, mut iv) = ((u.floor() as i32).min(last), (v.floor() as i32).min(last));
        let (mut fu, mut fv) = (u - f64::from(iu), v - f64::from(iv));
        // A lattice point on the far edge has no cell of its own; use the
        // neighbouring cell where it is a corner.
        if iu + iv > last {
            if iu > 0 {
                iu -= 1;
                fu += 1.0;
            } else {
                iv -= 1;
                fv += 1.0;
            }
        }

        let sub = last + 1;
        let (corners, remainder) = if fu + fv > 1.0 && iu + iv + 2 <= sub {
            ([(iu + 1, iv + 1), (iu, iv + 1), (iu + 1, iv)], [1.0 - fu, 1.0 - fv])
        } else {
            ([(iu, iv), (iu + 1, iv), (iu, iv + 1)], [fu, fv])
        };
        let [a, b, c] = corners;
        let index = |(x, y): (i32, i32)| self.to_index(face.lattice_point(x, y, sub));
        let projection = Projection { a: index(a)?, b: index(b)?, c: index(c)?, remainder };
        tracing::trace!(
            kind = ?face.kind,
            lon_face = face.lon_face,
            a = projection.a,
            b = projection.b,
            c = projection.c,
            "projected direction"
        );
        Ok(projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let p = Projection { a: 1, b: 2, c: 3, remainder: [0.25, 0.5] };
        let w = p.weights();
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(p.nearest(), 3);
        assert_eq!(p.indices(), [1, 2, 3]);
    }

    #[test]
    fn degenerate_directions_fail() {
        let lat = IcoLattice::new(2).unwrap();
        assert_eq!(lat.project(Vec3::ZERO), Err(LatticeError::DegenerateDirection));
        assert_eq!(lat.project(Vec3::new(f64::NAN, 0.0, 1.0)), Err(LatticeError::DegenerateDirection));
        assert_eq!(lat.project(Vec3::new(f64::INFINITY, 0.0, 0.0)), Err(LatticeError::DegenerateDirection));
    }

    #[test]
    fn poles_project_onto_themselves() {
        let lat = IcoLattice::new(4).unwrap();
        let north = lat.project(Vec3::Y * 3.0).unwrap();
        assert_eq!(north.nearest(), 0);
        let south = lat.project(-Vec3::Y * 1e-300).unwrap();
        assert_eq!(south.nearest(), lat.vertex_count() - 1);
    }
}
