//! # Linear solvers
//!
//! The two small solvers the kernel needs:
//!
//! | function | system | used by |
//! |----------|--------|---------|
//! | [`solve_tri_diagonal`] | tri-diagonal, diagonally dominant | diffusion step over the slices |
//! | [`solve_linear_equations`] | dense, augmented `n x (n+1)` | stoichiometry of one reaction |
//! | [`solve_quadratic`] | `a x^2 + b x + c = 0` | bubble point correlation |
//!
//! The tri-diagonal solver does not pivot. The diffusion coefficients built by the
//! generation engine keep the matrix diagonally dominant for physical input, so no
//! check is made there. The dense solver pivots on the largest remaining entry and
//! reports a vanishing pivot as [`GenexError::SingularSystem`].
use crate::errors::GenexError;
use nalgebra::{DMatrix, DVector};

/// Thomas algorithm.
///
/// Row `i` reads `lower[i] * x[i-1] + diag[i] * x[i] + upper[i] * x[i+1] = rhs[i]`;
/// `lower[0]` and `upper[n-1]` are ignored. Work arrays are copies, inputs stay untouched.
pub fn solve_tri_diagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    debug_assert!(lower.len() == n && upper.len() == n && rhs.len() == n);
    if n == 0 {
        return Vec::new();
    }
    let mut d = diag.to_vec();
    let mut c = rhs.to_vec();
    // forward elimination of the sub-diagonal
    for i in 1..n {
        let factor = lower[i] / d[i - 1];
        d[i] -= factor * upper[i - 1];
        c[i] -= factor * c[i - 1];
    }
    let mut x = vec![0.0; n];
    x[n - 1] = c[n - 1] / d[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = (c[i] - upper[i] * x[i + 1]) / d[i];
    }
    x
}

/// Gaussian elimination with partial pivoting on an augmented matrix `[A | b]`.
pub fn solve_linear_equations(mut system: DMatrix<f64>) -> Result<DVector<f64>, GenexError> {
    let n = system.nrows();
    if system.ncols() != n + 1 {
        return Err(GenexError::Argument(format!(
            "augmented system must be n x (n+1), got {} x {}",
            n,
            system.ncols()
        )));
    }
    let scale = system
        .columns(0, n)
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = f64::EPSILON * scale.max(1.0) * n as f64;

    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot = system[(k, k)].abs();
        for i in (k + 1)..n {
            if system[(i, k)].abs() > pivot {
                pivot = system[(i, k)].abs();
                pivot_row = i;
            }
        }
        if pivot <= tolerance {
            return Err(GenexError::SingularSystem { column: k });
        }
        if pivot_row != k {
            system.swap_rows(k, pivot_row);
        }
        for i in (k + 1)..n {
            let factor = system[(i, k)] / system[(k, k)];
            if factor == 0.0 {
                continue;
            }
            for j in k..=n {
                system[(i, j)] -= factor * system[(k, j)];
            }
        }
    }

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = system[(i, n)];
        for j in (i + 1)..n {
            sum -= system[(i, j)] * x[j];
        }
        x[i] = sum / system[(i, i)];
    }
    Ok(x)
}

/// Root `(-b + sqrt(b^2 - 4ac)) / 2a`, or the repeated root `-b / 2a` when the
/// discriminant is not positive.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> f64 {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant > 0.0 {
        (-b + discriminant.sqrt()) / (2.0 * a)
    } else {
        -b / (2.0 * a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tri_diagonal_hand_computed() {
        // 2x0 - x1 = 1, -x0 + 2x1 - x2 = 0, -x1 + 2x2 = 1  =>  x = (1, 1, 1)
        let lower = [0.0, -1.0, -1.0];
        let diag = [2.0, 2.0, 2.0];
        let upper = [-1.0, -1.0, 0.0];
        let rhs = [1.0, 0.0, 1.0];
        let x = solve_tri_diagonal(&lower, &diag, &upper, &rhs);
        for xi in x {
            assert_relative_eq!(xi, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn tri_diagonal_matches_dense_lu() {
        let n = 6;
        let lower: Vec<f64> = (0..n).map(|i| -0.3 - 0.05 * i as f64).collect();
        let upper: Vec<f64> = (0..n).map(|i| -0.7 + 0.02 * i as f64).collect();
        let diag: Vec<f64> = (0..n).map(|i| 2.5 + 0.1 * i as f64).collect();
        let rhs: Vec<f64> = (0..n).map(|i| (i as f64).sin() + 2.0).collect();
        let x = solve_tri_diagonal(&lower, &diag, &upper, &rhs);

        let mut dense = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            dense[(i, i)] = diag[i];
            if i > 0 {
                dense[(i, i - 1)] = lower[i];
            }
            if i + 1 < n {
                dense[(i, i + 1)] = upper[i];
            }
        }
        let expected = dense.lu().solve(&DVector::from_vec(rhs)).unwrap();
        for i in 0..n {
            assert_relative_eq!(x[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn tri_diagonal_single_row() {
        let x = solve_tri_diagonal(&[0.0], &[4.0], &[0.0], &[2.0]);
        assert_eq!(x, vec![0.5]);
    }

    #[test]
    fn dense_solver_needs_pivoting() {
        // zero on the leading diagonal entry
        let system = DMatrix::from_row_slice(
            3,
            4,
            &[
                0.0, 1.0, 1.0, 5.0, //
                2.0, 1.0, -1.0, 1.0, //
                1.0, -1.0, 2.0, 5.0,
            ],
        );
        let x = solve_linear_equations(system).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn dense_solver_reports_singular_matrix() {
        let system = DMatrix::from_row_slice(
            2,
            3,
            &[
                1.0, 2.0, 3.0, //
                2.0, 4.0, 6.0,
            ],
        );
        match solve_linear_equations(system) {
            Err(GenexError::SingularSystem { column }) => assert_eq!(column, 1),
            other => panic!("expected a singular system, got {:?}", other),
        }
    }

    #[test]
    fn dense_solver_rejects_wrong_shape() {
        let system = DMatrix::<f64>::zeros(3, 3);
        assert!(matches!(
            solve_linear_equations(system),
            Err(GenexError::Argument(_))
        ));
    }

    #[test]
    fn quadratic_roots() {
        // x^2 - 3x + 2 = 0 -> larger root 2
        assert_relative_eq!(solve_quadratic(1.0, -3.0, 2.0), 2.0);
        // (x - 1)^2 -> repeated root
        assert_relative_eq!(solve_quadratic(1.0, -2.0, 1.0), 1.0);
        // no real roots falls back to the vertex
        assert_relative_eq!(solve_quadratic(1.0, 2.0, 5.0), -1.0);
    }
}
