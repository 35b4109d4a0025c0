//! Subdivided and polar lattice coordinates.
//!
//! Latitude runs over six faces: 0/1/2 are the north cap, the tropic band and
//! the south cap; 3/4/5 alias the same regions seen from the antipode. Longitude
//! runs over five faces whose ring length depends on the latitude.

use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LatticeError;

/// Latitude faces, including the three antipodal aliases.
pub const LAT_FACES: i32 = 6;
/// Longitude faces around the polar axis.
pub const LON_FACES: i32 = 5;

/// Vertex count of a pentagonal pyramid lattice of the given height.
#[must_use]
pub fn pyramid_size(height: usize) -> usize {
    if height == 0 {
        return 1;
    }
    1 + 5 * height * (height - 1) / 2
}

/// A position in a cyclic group of `faces` segments of `subdivisions` steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubdividedCoordinate {
    pub face: i32,
    pub div: i32,
}

impl SubdividedCoordinate {
    #[must_use]
    pub const fn new(face: i32, div: i32) -> Self {
        Self { face, div }
    }

    /// Bring the coordinate into `[0, faces) x [0, subdivisions)`.
    ///
    /// Uses floor division, so a negative `div` borrows from the previous face
    /// instead of truncating toward zero.
    ///
    /// # Panics
    /// Panics if `faces` or `subdivisions` is not positive.
    #[must_use]
    pub fn normalize(self, faces: i32, subdivisions: i32) -> Self {
        assert!(faces > 0 && subdivisions > 0, "normalize needs positive faces and subdivisions");
        let carry = self.div.div_euclid(subdivisions);
        let div = self.div.rem_euclid(subdivisions);
        let face = (i64::from(self.face) + i64::from(carry)).rem_euclid(i64::from(faces));
        // face < faces, which came from an i32
        #[allow(clippy::cast_possible_truncation)]
        Self { face: face as i32, div }
    }
}

/// Region of the sphere a normalized coordinate falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    NorthPole,
    NorthCap,
    Tropics,
    SouthCap,
    SouthPole,
}

/// A discretized point on the icosahedral sphere.
///
/// Latitude grows southward and longitude grows around the polar axis. In the
/// tropic band each longitude face is a down-pointing triangle followed by an
/// up-pointing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarCoordinate {
    pub lat: SubdividedCoordinate,
    pub lon: SubdividedCoordinate,
}

impl PolarCoordinate {
    pub const NORTH_POLE: Self = Self::new(0, 0, 0, 0);
    pub const SOUTH_POLE: Self = Self::new(3, 0, 0, 0);

    #[must_use]
    pub const fn new(lat_face: i32, lat_div: i32, lon_face: i32, lon_div: i32) -> Self {
        Self {
            lat: SubdividedCoordinate::new(lat_face, lat_div),
            lon: SubdividedCoordinate::new(lon_face, lon_div),
        }
    }

    /// The same coordinate on the opposite hemisphere (`lat.face + 3`).
    ///
    /// The result is unnormalized; the latitude face is reduced mod 6 first so
    /// the shift cannot overflow.
    #[must_use]
    pub fn antipode(self) -> Self {
        Self {
            lat: SubdividedCoordinate::new(self.lat.face.rem_euclid(LAT_FACES) + 3, self.lat.div),
            lon: self.lon,
        }
    }

    /// Canonical form for a lattice with `subdivisions` steps per face.
    ///
    /// Poles drop their longitude, back-hemisphere latitudes are flipped onto
    /// faces 0..=2, and the longitude is reduced over the ring length of the
    /// resulting latitude.
    ///
    /// Lower corner `j` is the antipode of upper corner `j + 3`, so every flip is
    /// a whole-face longitude rotation (plus a row slide in the tropics). No flip
    /// needs a half-face step, and odd `subdivisions` flip exactly like even ones.
    ///
    /// # Errors
    /// [`LatticeError::InvalidSubdivisions`] if `subdivisions < 1`, and
    /// [`LatticeError::Unrepresentable`] if the flip overflows the longitude.
    pub fn normalize(self, subdivisions: i32) -> Result<Self, LatticeError> {
        if subdivisions < 1 {
            return Err(LatticeError::InvalidSubdivisions {
                got: i64::from(subdivisions),
                max: crate::MAX_SUBDIVISIONS,
            });
        }
        let n = subdivisions;
        let mut lat = self.lat.normalize(LAT_FACES, n);
        let mut lon = self.lon;

        if lat.div == 0 && (lat.face == 0 || lat.face == 3) {
            return Ok(Self { lat, lon: SubdividedCoordinate::default() });
        }

        if lat.face >= 3 {
            let depth = lat.div;
            lat = SubdividedCoordinate::new(5 - lat.face, n - depth);
            // Lower corner j is the antipode of upper corner j + 3, so caps rotate by
            // whole faces and the skewed tropic rows also slide by the row depth.
            let (face_shift, div_shift) = match lat.face {
                0 => (3, 0),
                1 => (2, depth),
                _ => (2, 0),
            };
            lon.face = lon.face.checked_add(face_shift).ok_or(LatticeError::Unrepresentable(self))?;
            lon.div = lon.div.checked_add(div_shift).ok_or(LatticeError::Unrepresentable(self))?;
            // (0, n) is the first tropic row and (1, n) the first south ring.
            lat = lat.normalize(LAT_FACES, n);
        }

        let ring = match lat.face {
            0 => lat.div,
            1 => n,
            _ => n - lat.div,
        };
        lon = lon.normalize(LON_FACES, ring);
        Ok(Self { lat, lon })
    }

    /// Region of a normalized coordinate.
    #[must_use]
    pub fn region(self) -> Region {
        match (self.lat.face, self.lat.div) {
            (0, 0) => Region::NorthPole,
            (0, _) => Region::NorthCap,
            (1, _) => Region::Tropics,
            (2, _) => Region::SouthCap,
            _ => Region::SouthPole,
        }
    }
}

impl Neg for PolarCoordinate {
    type Output = Self;
    fn neg(self) -> Self {
        self.antipode()
    }
}
