use super::{LinalgError, Matrix, MatrixRead, MatrixWrite, Vector, VectorRead, VectorWrite};

/// Solve `coefficients · x = constants` by Gaussian elimination with partial
/// pivoting.
///
/// Works on a private augmented copy; the inputs are never touched and no
/// partial result escapes on failure.
pub fn solve<M, V>(coefficients: &M, constants: &V) -> Result<Vector, LinalgError>
where
    M: MatrixRead + ?Sized,
    V: VectorRead + ?Sized,
{
    let (rows, columns) = coefficients.shape();
    if rows != columns {
        return Err(LinalgError::NotSquare { rows, columns });
    }
    if constants.len() != rows {
        return Err(LinalgError::DimensionMismatch { expected: rows, got: constants.len() });
    }
    let n = rows;

    let mut scratch = Matrix::zeros(n, n + 1);
    scratch.block_mut(0, 0, n, n).assign(coefficients);
    scratch.column_mut(n).assign(constants);

    for col in 0..n {
        let mut pivot = col;
        let mut best = scratch.get(col, col).abs();
        for r in col + 1..n {
            let v = scratch.get(r, col).abs();
            if v > best {
                best = v;
                pivot = r;
            }
        }
        if best == 0.0 {
            tracing::debug!(column = col, size = n, "singular system");
            return Err(LinalgError::Singular { column: col });
        }
        scratch.swap_rows(pivot, col);

        let p = scratch.get(col, col);
        {
            let mut row = scratch.row_mut(col);
            for c in col..=n {
                row.set(c, row.get(c) / p);
            }
        }
        for r in col + 1..n {
            let factor = scratch.get(r, col);
            if factor == 0.0 {
                continue;
            }
            for c in col..=n {
                let v = scratch.get(r, c) - factor * scratch.get(col, c);
                scratch.set(r, c, v);
            }
        }
    }

    for col in (0..n).rev() {
        let x = scratch.get(col, n);
        for r in 0..col {
            let v = scratch.get(r, n) - scratch.get(r, col) * x;
            scratch.set(r, n, v);
        }
    }
    let solution = scratch.column(n).to_vector();
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]])?;
        let b = Vector::from([3.0, 5.0]);
        let x = solve(&a, &b)?;
        assert!((x.get(0) - 0.8).abs() < 1e-12);
        assert!((x.get(1) - 1.4).abs() < 1e-12);
        assert_eq!(a, Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]])?);
        Ok(())
    }
}
