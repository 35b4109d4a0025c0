//! The icosahedral lattice geometry engine.
//!
//! Vertex indices run pole first, then the north cap rings, the tropic rows,
//! the south cap rings and finally the south pole.

use std::iter::FusedIterator;

use crate::coord::{pyramid_size, PolarCoordinate, Region};
use crate::error::LatticeError;
use crate::icosa::{build_face_planes, Corners, FacePlane};
use crate::math::Vec3;
use crate::{LatticeGeometry, MAX_SUBDIVISIONS};

/// An icosahedron subdivided `n` times per edge, mapped onto the unit sphere.
///
/// Immutable after construction. Vertex positions are produced by linear
/// interpolation of the corner table followed by renormalization.
#[derive(Clone, Debug)]
pub struct IcoLattice {
    subdivisions: i32,
    corners: Corners,
    pub(crate) planes: [FacePlane; 10],
}

impl IcoLattice {
    /// Build the geometry for `subdivisions` steps per icosahedron edge.
    ///
    /// # Errors
    /// [`LatticeError::InvalidSubdivisions`] when `subdivisions` is zero or
    /// above [`MAX_SUBDIVISIONS`].
    pub fn new(subdivisions: u32) -> Result<Self, LatticeError> {
        if subdivisions == 0 || subdivisions > MAX_SUBDIVISIONS {
            return Err(LatticeError::InvalidSubdivisions {
                got: i64::from(subdivisions),
                max: MAX_SUBDIVISIONS,
            });
        }
        let corners = Corners::new();
        let planes = build_face_planes(&corners);
        #[allow(clippy::cast_possible_wrap)]
        let lattice = Self { subdivisions: subdivisions as i32, corners, planes };
        tracing::debug!(
            subdivisions,
            vertices = lattice.vertex_count(),
            edges = lattice.edge_count(),
            "icosahedral lattice ready"
        );
        Ok(lattice)
    }

    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions as u32
    }

    #[inline]
    fn n(&self) -> usize {
        self.subdivisions() as usize
    }

    /// `10n² + 2`
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        let n = self.n();
        10 * n * n + 2
    }

    /// `30n²`, which is `3V - 6` for a closed triangulation.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let n = self.n();
        30 * n * n
    }

    #[must_use]
    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    /// Canonical form of `c` on this lattice.
    ///
    /// # Errors
    /// See [`PolarCoordinate::normalize`].
    pub fn normalize(&self, c: PolarCoordinate) -> Result<PolarCoordinate, LatticeError> {
        c.normalize(self.subdivisions)
    }

    /// Unit direction of the vertex at `c` (normalized first).
    ///
    /// # Errors
    /// Fails when `c` cannot be normalized.
    pub fn to_cartesian(&self, c: PolarCoordinate) -> Result<Vec3, LatticeError> {
        Ok(self.cartesian(self.normalize(c)?))
    }

    /// Dense index of the vertex at `c` (normalized first).
    ///
    /// # Errors
    /// Fails when `c` cannot be normalized.
    pub fn to_index(&self, c: PolarCoordinate) -> Result<usize, LatticeError> {
        Ok(self.index_of(self.normalize(c)?))
    }

    /// Normalized coordinate of vertex `index`, or `None` past the last vertex.
    #[must_use]
    pub fn polar_at(&self, index: usize) -> Option<PolarCoordinate> {
        (index < self.vertex_count()).then(|| self.decompose(index))
    }

    /// Every normalized coordinate, in index order.
    #[must_use]
    pub fn polar_coordinates(&self) -> PolarCoordinates<'_> {
        PolarCoordinates { lattice: self, next: 0, end: self.vertex_count() }
    }

    /// Vertex directions in index order.
    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + Clone + '_ {
        self.polar_coordinates().map(move |c| self.cartesian(c))
    }

    /// Every undirected edge exactly once, as index pairs.
    #[allow(clippy::many_single_char_names)]
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + Clone + '_ {
        let n = self.n();
        let row = 5 * n;
        let tropic_start = pyramid_size(n);
        let south_start = tropic_start + row * n;

        // Ring `n` of the north walk is tropic row 0, and ring `n` of the south
        // walk is the south pole.
        let north = move |lat: usize, f: usize, d: usize| {
            if lat == 0 {
                0
            } else {
                pyramid_size(lat) + (f * lat + d) % (5 * lat)
            }
        };
        let tropic = move |lat: usize, d: usize| tropic_start + lat * row + d % row;
        let south = move |lat: usize, f: usize, d: usize| {
            let len = n - lat;
            let start = south_start + 5 * lat * (n + len + 1) / 2;
            if len == 0 {
                start
            } else {
                start + (f * len + d) % (5 * len)
            }
        };

        let north_edges = (0..n).flat_map(move |lat| {
            (0..5).flat_map(move |f| {
                let spoke = (north(lat, f, 0), north(lat + 1, f, 0));
                std::iter::once(spoke).chain((0..lat).flat_map(move |d| {
                    let (a, b, c) = (north(lat, f, d), north(lat, f, d + 1), north(lat + 1, f, d + 1));
                    [(a, b), (a, c), (b, c)]
                }))
            })
        });
        let tropic_edges = (0..n).flat_map(move |lat| {
            (0..row).flat_map(move |d| {
                let (a, b, c) = (tropic(lat, d), tropic(lat, d + 1), tropic(lat + 1, d));
                [(a, b), (a, c), (b, c)]
            })
        });
        let south_edges = (0..n).flat_map(move |lat| {
            (0..5).flat_map(move |f| {
                (0..n - lat).flat_map(move |d| {
                    let (a, b, c) = (south(lat, f, d), south(lat, f, d + 1), south(lat + 1, f, d));
                    // (a, c) at d == 0 is the neighbouring face's last (b, c)
                    [Some((a, b)), (d > 0).then_some((a, c)), Some((b, c))].into_iter().flatten()
                })
            })
        });

        north_edges.chain(tropic_edges).chain(south_edges)
    }

    /// Position of a normalized coordinate.
    #[allow(clippy::cast_sign_loss, clippy::many_single_char_names)]
    pub(crate) fn cartesian(&self, c: PolarCoordinate) -> Vec3 {
        let n = f64::from(self.subdivisions);
        let (upper, lower) = (&self.corners.upper, &self.corners.lower);
        let f = c.lon.face as usize;
        let g = (f + 1) % 5;
        let (lat, lon) = (c.lat.div, c.lon.div);
        match c.region() {
            Region::NorthPole => Vec3::Y,
            Region::NorthCap => {
                let rim = upper[f].lerp(upper[g], f64::from(lon) / f64::from(lat));
                Vec3::Y.lerp(rim, f64::from(lat) / n).normalized()
            }
            Region::Tropics => {
                let s = f64::from(lat) / n;
                let down = self.subdivisions - lat;
                let (a, b, t) = if lon < down {
                    (upper[f].lerp(lower[f], s), upper[g].lerp(lower[f], s), f64::from(lon) / f64::from(down))
                } else {
                    (
                        upper[g].lerp(lower[f], s),
                        upper[g].lerp(lower[g], s),
                        f64::from(lon - down) / f64::from(lat),
                    )
                };
                a.lerp(b, t).normalized()
            }
            Region::SouthCap => {
                let len = self.subdivisions - lat;
                let rim = lower[f].lerp(lower[g], f64::from(lon) / f64::from(len));
                (-Vec3::Y).lerp(rim, f64::from(len) / n).normalized()
            }
            Region::SouthPole => -Vec3::Y,
        }
    }

    /// Index of a normalized coordinate.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn index_of(&self, c: PolarCoordinate) -> usize {
        let n = self.n();
        let (lat, face, lon) = (c.lat.div as usize, c.lon.face as usize, c.lon.div as usize);
        match c.region() {
            Region::NorthPole => 0,
            Region::NorthCap => pyramid_size(lat) + face * lat + lon,
            Region::Tropics => pyramid_size(n) + lat * 5 * n + face * n + lon,
            Region::SouthCap => {
                let len = n - lat;
                self.vertex_count() - pyramid_size(len + 1) + face * len + lon
            }
            Region::SouthPole => self.vertex_count() - 1,
        }
    }

    /// Inverse of [`Self::index_of`] for `index < vertex_count()`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::similar_names)]
    fn decompose(&self, index: usize) -> PolarCoordinate {
        let n = self.n();
        let last = self.vertex_count() - 1;
        let tropic_start = pyramid_size(n);
        let south_start = tropic_start + 5 * n * n;
        let coord = |lat_face: i32, lat: usize, face: usize, lon: usize| {
            PolarCoordinate::new(lat_face, lat as i32, face as i32, lon as i32)
        };

        if index == 0 {
            PolarCoordinate::NORTH_POLE
        } else if index < tropic_start {
            let lat = ring_containing(index - 1);
            let offset = index - pyramid_size(lat);
            coord(0, lat, offset / lat, offset % lat)
        } else if index < south_start {
            let offset = index - tropic_start;
            let (row, rest) = (offset / (5 * n), offset % (5 * n));
            coord(1, row, rest / n, rest % n)
        } else if index < last {
            let len = ring_containing(last - index - 1);
            let offset = index - (self.vertex_count() - pyramid_size(len + 1));
            coord(2, n - len, offset / len, offset % len)
        } else {
            PolarCoordinate::SOUTH_POLE
        }
    }
}

/// Largest `d ≥ 1` with `5d(d-1)/2 ≤ m`, i.e. the cap ring holding offset `m`.
fn ring_containing(m: usize) -> usize {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let mut d = ((1.0 + (1.0 + 1.6 * m as f64).sqrt()) / 2.0) as usize;
    d = d.max(1);
    while d > 1 && 5 * d * (d - 1) / 2 > m {
        d -= 1;
    }
    while 5 * (d + 1) * d / 2 <= m {
        d += 1;
    }
    d
}

impl LatticeGeometry for IcoLattice {
    type Vertex = Vec3;

    fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        IcoLattice::vertices(self)
    }

    fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        IcoLattice::edges(self)
    }

    fn vertex_count(&self) -> usize {
        IcoLattice::vertex_count(self)
    }
}

/// Restartable iterator over a lattice's normalized coordinates.
#[derive(Clone, Debug)]
pub struct PolarCoordinates<'a> {
    lattice: &'a IcoLattice,
    next: usize,
    end: usize,
}

impl Iterator for PolarCoordinates<'_> {
    type Item = PolarCoordinate;

    fn next(&mut self) -> Option<PolarCoordinate> {
        if self.next >= self.end {
            return None;
        }
        let c = self.lattice.decompose(self.next);
        self.next += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl DoubleEndedIterator for PolarCoordinates<'_> {
    fn next_back(&mut self) -> Option<PolarCoordinate> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.lattice.decompose(self.end))
    }
}

impl ExactSizeIterator for PolarCoordinates<'_> {}
impl FusedIterator for PolarCoordinates<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_subdivisions() {
        assert!(matches!(IcoLattice::new(0), Err(LatticeError::InvalidSubdivisions { got: 0, .. })));
        assert!(IcoLattice::new(MAX_SUBDIVISIONS + 1).is_err());
        assert!(IcoLattice::new(MAX_SUBDIVISIONS).is_ok());
    }

    #[test]
    fn ring_lookup_matches_pyramid_sizes() {
        for d in 1..40 {
            let lo = pyramid_size(d) - 1;
            let hi = pyramid_size(d + 1) - 2;
            assert_eq!(ring_containing(lo), d);
            assert_eq!(ring_containing(hi), d);
        }
    }

    #[test]
    fn single_subdivision_is_the_icosahedron() {
        let lat = IcoLattice::new(1).unwrap();
        assert_eq!(lat.vertex_count(), 12);
        assert_eq!(lat.edges().count(), 30);
        let upper = lat.to_cartesian(PolarCoordinate::new(1, 0, 2, 0)).unwrap();
        assert!((upper - lat.corners().upper[2]).length() < 1e-12);
        let lower = lat.to_cartesian(PolarCoordinate::new(2, 0, 4, 0)).unwrap();
        assert!((lower - lat.corners().lower[4]).length() < 1e-12);
    }

    #[test]
    fn iterator_reports_exact_length_from_both_ends() {
        let lat = IcoLattice::new(3).unwrap();
        let mut it = lat.polar_coordinates();
        assert_eq!(it.len(), 92);
        assert_eq!(it.next(), Some(PolarCoordinate::NORTH_POLE));
        assert_eq!(it.next_back(), Some(PolarCoordinate::SOUTH_POLE));
        assert_eq!(it.len(), 90);
        assert_eq!(it.clone().count(), 90);
    }
}
