//! Materialized icosahedral lattices, dense linear algebra and force
//! distribution on top of `icolat-geo`.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod config;
pub mod lattice;
pub mod linalg;
pub mod statics;

pub use config::{ConfigError, EngineConfig};
pub use icolat_geo as geo;
pub use lattice::{Lattice, LatticeGrid};
pub use statics::distribute_forces;

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver_like() {
        assert!(version().split('.').count() >= 3);
    }
}
