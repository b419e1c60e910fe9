// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Dense LU
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense LU factorization with partial pivoting, factor-once /
//! solve-many. Singular systems are reported through the factor status
//! and the factorization continues with a substituted pivot, producing a
//! best-effort solution rather than aborting the run.

use equi_types::constants::{SMALL, SQRT_MACH_PREC};
use ndarray::{Array1, Array2};

use equi_types::error::{EquiError, EquiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorStatus {
    Ok,
    /// A pivot collapsed at this column; solves remain finite but
    /// inaccurate in the associated direction.
    Singular { column: usize },
}

#[derive(Debug, Clone)]
pub struct LuFactors {
    lu: Array2<f64>,
    pivots: Vec<usize>,
    pub status: FactorStatus,
}

impl LuFactors {
    /// Factor a square matrix. Fails only on a shape violation; numerical
    /// singularity is reported via `status`.
    pub fn factor(a: &Array2<f64>) -> EquiResult<Self> {
        let (nr, nc) = a.dim();
        if nr != nc || nr == 0 {
            return Err(EquiError::LinAlg(format!(
                "LU requires a non-empty square matrix, got {nr}x{nc}"
            )));
        }
        let n = nr;
        let mut lu = a.clone();
        let mut pivots = vec![0usize; n];
        let mut status = FactorStatus::Ok;

        let scale = lu.iter().fold(0.0f64, |m, &v| m.max(v.abs())).max(1.0);

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_mag = lu[[col, col]].abs();
            for row in col + 1..n {
                let mag = lu[[row, col]].abs();
                if mag > pivot_mag {
                    pivot_row = row;
                    pivot_mag = mag;
                }
            }
            pivots[col] = pivot_row;
            if pivot_row != col {
                for j in 0..n {
                    let tmp = lu[[col, j]];
                    lu[[col, j]] = lu[[pivot_row, j]];
                    lu[[pivot_row, j]] = tmp;
                }
            }

            if pivot_mag <= SMALL * scale {
                if status == FactorStatus::Ok {
                    status = FactorStatus::Singular { column: col };
                }
                // keep downstream solves finite
                let sub = SQRT_MACH_PREC * scale;
                lu[[col, col]] = if lu[[col, col]] < 0.0 { -sub } else { sub };
            }

            let pivot = lu[[col, col]];
            for row in col + 1..n {
                let factor = lu[[row, col]] / pivot;
                lu[[row, col]] = factor;
                for j in col + 1..n {
                    lu[[row, j]] -= factor * lu[[col, j]];
                }
            }
        }

        Ok(LuFactors { lu, pivots, status })
    }

    pub fn is_singular(&self) -> bool {
        matches!(self.status, FactorStatus::Singular { .. })
    }

    pub fn order(&self) -> usize {
        self.lu.nrows()
    }

    /// Solve A x = rhs with the stored factors.
    pub fn solve(&self, rhs: &Array1<f64>) -> Array1<f64> {
        let n = self.order();
        debug_assert_eq!(rhs.len(), n);
        let mut x = rhs.clone();

        for col in 0..n {
            let p = self.pivots[col];
            if p != col {
                x.swap(col, p);
            }
        }
        // forward substitution, unit lower triangle
        for i in 1..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= self.lu[[i, j]] * x[j];
            }
            x[i] = sum;
        }
        // back substitution
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in i + 1..n {
                sum -= self.lu[[i, j]] * x[j];
            }
            x[i] = sum / self.lu[[i, i]];
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_solve_known_system() {
        let a = array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let rhs = array![8.0, -11.0, -3.0];
        let lu = LuFactors::factor(&a).unwrap();
        assert_eq!(lu.status, FactorStatus::Ok);
        let x = lu.solve(&rhs);
        // known solution (2, 3, -1)
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_once_solve_many() {
        let a = array![[4.0, 1.0], [1.0, 3.0]];
        let lu = LuFactors::factor(&a).unwrap();
        for rhs in [array![1.0, 0.0], array![0.0, 1.0], array![2.0, -5.0]] {
            let x = lu.solve(&rhs);
            let r0 = 4.0 * x[0] + x[1] - rhs[0];
            let r1 = x[0] + 3.0 * x[1] - rhs[1];
            assert!(r0.abs() < 1e-12 && r1.abs() < 1e-12);
        }
    }

    #[test]
    fn test_pivoting_handles_zero_leading_entry() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let lu = LuFactors::factor(&a).unwrap();
        assert_eq!(lu.status, FactorStatus::Ok);
        let x = lu.solve(&array![3.0, 7.0]);
        assert!((x[0] - 7.0).abs() < 1e-13);
        assert!((x[1] - 3.0).abs() < 1e-13);
    }

    #[test]
    fn test_singular_matrix_reported_but_finite() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let lu = LuFactors::factor(&a).unwrap();
        assert!(lu.is_singular());
        let x = lu.solve(&array![1.0, 2.0]);
        assert!(x.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_non_square_rejected() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(LuFactors::factor(&a).is_err());
    }
}
