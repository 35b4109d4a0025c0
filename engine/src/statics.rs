//! Static force distribution across a set of contact normals.
//!
//! Each normal acts as a linear spring of stiffness `k`. The displacement `dx`
//! solving `-k · Σ n nᵗ · dx = force` gives every normal the load
//! `k · (dx · n)`, and the loads then cancel the external force.

use icolat_geo::Vec3;

use crate::linalg::{solve, LinalgError, SymmetricMatrix, Vector};

/// Split `force` across `normals`, one load per normal in input order.
///
/// With at least three independent normals the loads satisfy
/// `Σ loadᵢ · nᵢ = -force`.
///
/// # Errors
/// [`LinalgError::Singular`] when the normals do not span 3D space or the
/// stiffness is zero.
pub fn distribute_forces(normals: &[Vec3], force: Vec3, stiffness: f64) -> Result<Vec<f64>, LinalgError> {
    let mut system = SymmetricMatrix::zeros(3);
    for &n in normals {
        system += &SymmetricMatrix::self_outer_product(&Vector::from(n));
    }
    system *= -stiffness;

    let dx = solve(&system, &Vector::from(force))?.to_vec3()?;
    tracing::trace!(normals = normals.len(), ?dx, "distributed force");
    Ok(normals.iter().map(|n| stiffness * dx.dot(*n)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_normals_is_singular() {
        assert_eq!(
            distribute_forces(&[], Vec3::new(1.0, 0.0, 0.0), 1.0),
            Err(LinalgError::Singular { column: 0 })
        );
    }

    #[test]
    fn zero_stiffness_is_singular() {
        let normals = [Vec3::new(1.0, 0.0, 0.0), Vec3::Y, Vec3::new(0.0, 0.0, 1.0)];
        assert!(matches!(
            distribute_forces(&normals, Vec3::Y, 0.0),
            Err(LinalgError::Singular { .. })
        ));
    }
}
