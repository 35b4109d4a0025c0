use approx::assert_abs_diff_eq;
use icolat_engine::geo::{IcoLattice, Vec3};
use icolat_engine::linalg::LinalgError;
use icolat_engine::{distribute_forces, EngineConfig};

fn axes() -> [Vec3; 3] {
    [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)]
}

fn balance(normals: &[Vec3], loads: &[f64]) -> Vec3 {
    normals.iter().zip(loads).fold(Vec3::ZERO, |acc, (n, l)| acc + *n * *l)
}

#[test]
fn axis_normals_take_the_opposing_components() -> Result<(), LinalgError> {
    let loads = distribute_forces(&axes(), Vec3::new(1.0, 2.0, 3.0), 2.0)?;
    assert_eq!(loads.len(), 3);
    for (got, want) in loads.iter().zip([-1.0, -2.0, -3.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn lattice_normals_balance_the_force() -> Result<(), Box<dyn std::error::Error>> {
    let lattice = IcoLattice::new(2)?;
    let normals: Vec<Vec3> = lattice.vertices().collect();
    let force = Vec3::new(0.3, -1.2, 2.5);
    let loads = distribute_forces(&normals, force, 3.5)?;
    assert_eq!(loads.len(), normals.len());
    let net = balance(&normals, &loads);
    assert!((net + force).length() < 1e-9, "net {net:?}");
    Ok(())
}

#[test]
fn coplanar_normals_are_singular() {
    let normals = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0)];
    assert!(matches!(
        distribute_forces(&normals, Vec3::Y, 1.0),
        Err(LinalgError::Singular { .. })
    ));
    assert!(matches!(
        distribute_forces(&normals[..2], Vec3::Y, 1.0),
        Err(LinalgError::Singular { .. })
    ));
}

#[test]
fn stiffness_cancels_out_of_axis_loads() -> Result<(), LinalgError> {
    let force = Vec3::new(-4.0, 0.5, 1.0);
    let soft = EngineConfig { stiffness: 0.25, ..EngineConfig::default() };
    let stiff = EngineConfig { stiffness: 40.0, ..EngineConfig::default() };
    let a = soft.distribute_forces(&axes(), force)?;
    let b = stiff.distribute_forces(&axes(), force)?;
    for (x, y) in a.iter().zip(&b) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
    }
    Ok(())
}
