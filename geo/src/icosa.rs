use std::f64::consts::TAU;

use super::coord::PolarCoordinate;
use super::math::Vec3;

/// Height of the upper tropic ring (`1/√5`); the lower ring sits at `-1/√5`.
pub const TROPIC_Y: f64 = 0.447_213_595_499_957_9;
/// Horizontal radius of both tropic rings (`2/√5`).
pub const TROPIC_R: f64 = 2.0 * TROPIC_Y;

/// The ten non-polar icosahedron corners.
///
/// Upper corner `i` sits at azimuth `72°·i` measured from +Z toward +X. Lower
/// corner `j` is the antipode of upper corner `j + 3`, which puts it halfway
/// between upper corners `j` and `j + 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    pub upper: [Vec3; 5],
    pub lower: [Vec3; 5],
}

impl Corners {
    #[must_use]
    pub fn new() -> Self {
        let mut upper = [Vec3::ZERO; 5];
        for (i, u) in upper.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let (s, c) = (TAU * i as f64 / 5.0).sin_cos();
            *u = Vec3::new(TROPIC_R * s, TROPIC_Y, TROPIC_R * c);
        }
        let mut lower = [Vec3::ZERO; 5];
        for (j, l) in lower.iter_mut().enumerate() {
            *l = -upper[(j + 3) % 5];
        }
        Self { upper, lower }
    }
}

impl Default for Corners {
    fn default() -> Self {
        Self::new()
    }
}

/// Which of the four face families a frame belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// `(pole, U_f, U_f+1)`
    NorthCap,
    /// `(U_f, U_f+1, L_f)`, the down-pointing half of a tropic quad.
    TropicDown,
    /// `(U_f+1, L_f+1, L_f)`, the up-pointing half of a tropic quad.
    TropicUp,
    /// `(south pole, L_f, L_f+1)`
    SouthCap,
}

/// One icosahedron face as an affine frame: points on the face are
/// `origin + (u/n)·u_axis + (v/n)·v_axis` with `u, v ≥ 0`, `u + v ≤ n`.
#[derive(Clone, Copy, Debug)]
pub struct FaceFrame {
    pub origin: Vec3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
    /// Outward unit normal of the face plane.
    pub normal: Vec3,
    pub kind: FaceKind,
    /// Longitude face the frame belongs to.
    pub lon_face: i32,
}

impl FaceFrame {
    fn new(origin: Vec3, a: Vec3, b: Vec3, kind: FaceKind, lon_face: i32) -> Self {
        let frame = Self {
            origin,
            u_axis: a - origin,
            v_axis: b - origin,
            normal: Vec3::ZERO,
            kind,
            lon_face,
        };
        frame.ensure_outward()
    }

    /// Compute the plane normal and orient it away from the sphere centre.
    #[must_use]
    pub fn ensure_outward(mut self) -> Self {
        let mut n = self.u_axis.cross(self.v_axis).normalized();
        if n.dot(self.origin) < 0.0 {
            n = -n;
        }
        self.normal = n;
        self
    }

    /// Unnormalized polar coordinate of integer frame point `(u, v)`.
    #[must_use]
    pub fn lattice_point(&self, u: i32, v: i32, subdivisions: i32) -> PolarCoordinate {
        let f = self.lon_face;
        match self.kind {
            FaceKind::NorthCap => PolarCoordinate::new(0, u + v, f, v),
            FaceKind::TropicDown => PolarCoordinate::new(1, v, f, u),
            FaceKind::TropicUp => PolarCoordinate::new(1, u + v, f, subdivisions - v),
            FaceKind::SouthCap => PolarCoordinate::new(2, subdivisions - u - v, f, v),
        }
    }

    /// Frame coordinates of direction `p`, scaled so corners sit at `0` and `n`.
    ///
    /// `p` is projected centrally onto the face plane, then `u` and `v` are the
    /// signed-area ratios of the projected point against the two axes. Assumes
    /// `normal · p > 0`.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn local_coordinates(&self, p: Vec3, subdivisions: f64) -> (f64, f64) {
        let q = p * (self.normal.dot(self.origin) / self.normal.dot(p));
        let r = q - self.origin;
        let area = self.u_axis.cross(self.v_axis);
        let scale = subdivisions / area.length_squared();
        let u = r.cross(self.v_axis).dot(area) * scale;
        let v = self.u_axis.cross(r).dot(area) * scale;
        (u, v)
    }
}

/// A pair of antipodal faces sharing one plane orientation.
#[derive(Clone, Copy, Debug)]
pub struct FacePlane {
    /// Outward normal of `front`; `back` faces the opposite way.
    pub normal: Vec3,
    pub front: FaceFrame,
    pub back: FaceFrame,
}

impl FacePlane {
    /// The face of this pair that `p` lies in front of.
    #[inline]
    #[must_use]
    pub fn facing(&self, p: Vec3) -> &FaceFrame {
        if self.normal.dot(p) >= 0.0 {
            &self.front
        } else {
            &self.back
        }
    }
}

/// Build the 20 face frames as 10 antipodal pairs.
///
/// North cap `f` pairs with south cap `f + 2`; tropic down `f` pairs with
/// tropic up `f + 2`.
#[must_use]
pub fn build_face_planes(corners: &Corners) -> [FacePlane; 10] {
    let north = Vec3::Y;
    let south = -Vec3::Y;
    let (u, l) = (&corners.upper, &corners.lower);
    let frame = |kind: FaceKind, f: usize| -> FaceFrame {
        let g = (f + 1) % 5;
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let lon_face = f as i32;
        match kind {
            FaceKind::NorthCap => FaceFrame::new(north, u[f], u[g], kind, lon_face),
            FaceKind::TropicDown => FaceFrame::new(u[f], u[g], l[f], kind, lon_face),
            FaceKind::TropicUp => FaceFrame::new(u[g], l[g], l[f], kind, lon_face),
            FaceKind::SouthCap => FaceFrame::new(south, l[f], l[g], kind, lon_face),
        }
    };

    std::array::from_fn(|i| {
        let f = i % 5;
        let (front_kind, back_kind) = if i < 5 {
            (FaceKind::NorthCap, FaceKind::SouthCap)
        } else {
            (FaceKind::TropicDown, FaceKind::TropicUp)
        };
        let front = frame(front_kind, f);
        let back = frame(back_kind, (f + 2) % 5);
        FacePlane { normal: front.normal, front, back }
    })
}
