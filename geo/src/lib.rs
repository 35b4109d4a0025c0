#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod coord;
mod error;
pub mod icosa;
mod lattice;
mod math;
mod project;


pub use coord::{pyramid_size, PolarCoordinate, Region, SubdividedCoordinate};
pub use error::LatticeError;
pub use lattice::{IcoLattice, PolarCoordinates};
pub use math::Vec3;
pub use project::Projection;

/// Largest supported subdivision count. Keeps every index below `u32::MAX`.
pub const MAX_SUBDIVISIONS: u32 = 8192;

/// A finite vertex set plus the undirected edges joining it.
///
/// Both sequences are restartable: each call starts a fresh pass.
pub trait LatticeGeometry {
    type Vertex;

    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_;

    /// Number of items `vertices` yields.
    fn vertex_count(&self) -> usize {
        self.vertices().count()
    }
}
