use approx::assert_abs_diff_eq;
use icolat_engine::linalg::{
    solve, LinalgError, Matrix, MatrixRead, MatrixWrite, SymmetricMatrix, Vector, VectorRead,
    VectorWrite,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn assert_vector_eq(got: &Vector, want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        assert_abs_diff_eq!(g, *w, epsilon = 1e-12);
    }
}

#[test]
fn solves_identity() -> Result<(), LinalgError> {
    let x = solve(&Matrix::identity(3), &Vector::from([1.0, 2.0, 3.0]))?;
    assert_vector_eq(&x, &[1.0, 2.0, 3.0]);
    Ok(())
}

#[test]
fn solves_with_row_swap() -> Result<(), LinalgError> {
    let a = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]])?;
    let x = solve(&a, &Vector::from([1.0, 3.0, 2.0]))?;
    assert_vector_eq(&x, &[1.0, 2.0, 3.0]);
    Ok(())
}

#[test]
fn solves_general_system() -> Result<(), LinalgError> {
    let a = Matrix::from_rows(&[[3.0, 1.0, 4.0], [1.0, 5.0, 9.0], [2.0, 6.0, 5.0]])?;
    let x = solve(&a, &Vector::from([1.0, 8.0, 3.0]))?;
    assert_vector_eq(&x, &[-1.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn rejects_singular_system() -> Result<(), LinalgError> {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]])?;
    assert_eq!(solve(&a, &Vector::from([4.0, 8.0, 12.0])), Err(LinalgError::Singular { column: 1 }));
    Ok(())
}

#[test]
fn rejects_bad_shapes() {
    assert_eq!(
        solve(&Matrix::zeros(2, 3), &Vector::zeros(2)),
        Err(LinalgError::NotSquare { rows: 2, columns: 3 })
    );
    assert_eq!(
        solve(&Matrix::identity(3), &Vector::zeros(2)),
        Err(LinalgError::DimensionMismatch { expected: 3, got: 2 })
    );
}

#[test]
fn inputs_are_untouched() -> Result<(), LinalgError> {
    let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]])?;
    let b = Vector::from([2.0, 3.0]);
    let (a0, b0) = (a.clone(), b.clone());
    let x = solve(&a, &b)?;
    assert_eq!((a, b), (a0, b0));
    assert_vector_eq(&x, &[3.0, 2.0]);
    Ok(())
}

#[test]
fn random_systems_reproduce_their_constants() -> Result<(), LinalgError> {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=8 {
        let mut a = Matrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
        // keep it comfortably invertible
        for i in 0..n {
            let d = a.get(i, i);
            a.set(i, i, d + if d >= 0.0 { 4.0 } else { -4.0 });
        }
        let b: Vector = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let x = solve(&a, &b)?;
        let back = a.times(&x).to_vector();
        for i in 0..n {
            assert_abs_diff_eq!(back.get(i), b.get(i), epsilon = 1e-9);
        }
    }
    Ok(())
}

#[test]
fn solves_through_views() -> Result<(), LinalgError> {
    let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 4.0]])?;
    let b = Matrix::identity(2);
    let sum = a.plus(&b);
    let t = sum.transpose();
    let x = solve(&t, &Vector::from([3.0, 10.0]))?;
    assert_vector_eq(&x, &[1.0, 2.0]);
    Ok(())
}

#[test]
fn symmetric_matrices_solve_like_dense_ones() -> Result<(), LinalgError> {
    let mut s = SymmetricMatrix::zeros(3);
    s += &SymmetricMatrix::self_outer_product(&Vector::from([1.0, 0.0, 0.0]));
    s += &SymmetricMatrix::self_outer_product(&Vector::from([0.0, 1.0, 1.0]));
    s += &SymmetricMatrix::self_outer_product(&Vector::from([0.0, 0.0, 1.0]));
    let dense = s.to_matrix();
    let b = Vector::from([1.0, 2.0, 3.0]);
    let xs = solve(&s, &b)?;
    let xd = solve(&dense, &b)?;
    assert_vector_eq(&xs, xd.as_slice());
    Ok(())
}

#[test]
fn augmented_blocks_assign_through_views() {
    let mut m = Matrix::zeros(2, 3);
    m.block_mut(0, 0, 2, 2).assign(&Matrix::identity(2));
    m.column_mut(2).assign(&Vector::from([5.0, 6.0]));
    assert_eq!(m.as_slice(), &[1.0, 0.0, 5.0, 0.0, 1.0, 6.0]);
    assert_eq!(m.to_string(), "(1, 0, 5)\n(0, 1, 6)");
}
