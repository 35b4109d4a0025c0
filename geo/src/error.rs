use crate::coord::PolarCoordinate;

/// Errors raised by lattice construction, normalization and projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// Subdivision count outside `1..=MAX_SUBDIVISIONS`.
    #[error("subdivisions must be in 1..={max} (got {got})")]
    InvalidSubdivisions {
        /// Requested count.
        got: i64,
        /// Largest supported count.
        max: u32,
    },
    /// The antipodal flip pushed the longitude outside the `i32` range.
    /// The coordinate must be discarded.
    #[error("polar coordinate {0:?} cannot be represented after the antipodal flip")]
    Unrepresentable(PolarCoordinate),
    /// Projection input was zero or not finite.
    #[error("cannot project a zero or non-finite direction")]
    DegenerateDirection,
}
