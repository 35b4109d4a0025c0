//! Engine configuration.

use icolat_geo::{IcoLattice, LatticeError, Vec3, MAX_SUBDIVISIONS};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lattice::Lattice;
use crate::linalg::LinalgError;
use crate::statics::distribute_forces;

/// Invalid configuration values.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The lattice cannot be built with these parameters.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    /// Stiffness must be finite and positive.
    #[error("stiffness must be finite and positive (got {0})")]
    Stiffness(f64),
}

/// Parameters for building a lattice and distributing forces over it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EngineConfig {
    /// Steps per icosahedron edge, in `1..=MAX_SUBDIVISIONS`.
    pub subdivisions: u32,
    /// Spring stiffness used by force distribution.
    pub stiffness: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { subdivisions: 5, stiffness: 1.0 }
    }
}

impl EngineConfig {
    /// Check every field without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subdivisions == 0 || self.subdivisions > MAX_SUBDIVISIONS {
            return Err(LatticeError::InvalidSubdivisions {
                got: i64::from(self.subdivisions),
                max: MAX_SUBDIVISIONS,
            }
            .into());
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(ConfigError::Stiffness(self.stiffness));
        }
        Ok(())
    }

    /// Build the lattice geometry.
    pub fn geometry(&self) -> Result<IcoLattice, ConfigError> {
        self.validate()?;
        Ok(IcoLattice::new(self.subdivisions)?)
    }

    /// Build and materialize the lattice.
    pub fn lattice(&self) -> Result<Lattice<Vec3>, ConfigError> {
        Ok(Lattice::new(&self.geometry()?))
    }

    /// [`distribute_forces`] with this configuration's stiffness.
    pub fn distribute_forces(&self, normals: &[Vec3], force: Vec3) -> Result<Vec<f64>, LinalgError> {
        distribute_forces(normals, force, self.stiffness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.subdivisions, 5);
        assert_eq!(cfg.validate(), Ok(()));
        assert!(matches!(cfg.geometry(), Ok(g) if g.subdivisions() == 5));
    }

    #[test]
    fn rejects_bad_values() {
        let zero = EngineConfig { subdivisions: 0, ..EngineConfig::default() };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::Lattice(LatticeError::InvalidSubdivisions { got: 0, .. }))
        ));
        let soft = EngineConfig { stiffness: -1.0, ..EngineConfig::default() };
        assert_eq!(soft.validate(), Err(ConfigError::Stiffness(-1.0)));
        let nan = EngineConfig { stiffness: f64::NAN, ..EngineConfig::default() };
        assert!(matches!(nan.geometry(), Err(ConfigError::Stiffness(_))));
    }
}
