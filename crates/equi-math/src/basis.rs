// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Radial Basis Evaluation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Chebyshev and Zernike radial basis families, values and first
//! derivatives at a single radial coordinate.
//!
//! Regular volumes use plain Chebyshev polynomials T_l(s) on s in [-1,1].
//! The innermost volume contains the coordinate singularity and uses the
//! Zernike radial polynomials R_l^m(ρ) on ρ = (1+s)/2, which vanish to
//! the correct order on the axis. Derivatives returned here are with
//! respect to the evaluation variable; the half-domain substitution
//! Jacobian is applied by the caller.

use ndarray::{Array2, Array3};

/// T_l and T_l' for l = 0..lrad; shape (lrad+1, 2), last axis
/// {value, derivative}.
pub fn chebyshev(s: f64, lrad: usize) -> Array2<f64> {
    let mut out = Array2::zeros((lrad + 1, 2));
    out[[0, 0]] = 1.0;
    if lrad == 0 {
        return out;
    }
    out[[1, 0]] = s;
    out[[1, 1]] = 1.0;
    for l in 2..=lrad {
        out[[l, 0]] = 2.0 * s * out[[l - 1, 0]] - out[[l - 2, 0]];
        out[[l, 1]] = 2.0 * out[[l - 1, 0]] + 2.0 * s * out[[l - 1, 1]] - out[[l - 2, 1]];
    }
    out
}

/// R_l^m and d/dρ R_l^m for l = 0..lrad, m = 0..mpol; shape
/// (lrad+1, mpol+1, 2). Entries with l < m or l-m odd are structural
/// zeros and stay zero.
///
/// Uses the closed forms at l = m and l = m+2 and the Kintner three-term
/// recurrence above, with the derivative propagated through the same
/// relations.
pub fn zernike(rho: f64, lrad: usize, mpol: usize) -> Array3<f64> {
    let mut out = Array3::zeros((lrad + 1, mpol + 1, 2));

    for m in 0..=mpol.min(lrad) {
        let mf = m as f64;

        // l = m: rho^m
        let (vm, dm) = if m == 0 {
            (1.0, 0.0)
        } else {
            (rho.powi(m as i32), mf * rho.powi(m as i32 - 1))
        };
        out[[m, m, 0]] = vm;
        out[[m, m, 1]] = dm;

        // l = m + 2: ((m+2) rho^2 - (m+1)) rho^m
        if m + 2 <= lrad {
            let v = (mf + 2.0) * rho.powi(m as i32 + 2) - (mf + 1.0) * rho.powi(m as i32);
            let mut d = (mf + 2.0) * (mf + 2.0) * rho.powi(m as i32 + 1);
            if m > 0 {
                d -= mf * (mf + 1.0) * rho.powi(m as i32 - 1);
            }
            out[[m + 2, m, 0]] = v;
            out[[m + 2, m, 1]] = d;
        }

        let mut l = m + 4;
        while l <= lrad {
            let (nf, mf) = (l as f64, m as f64);
            let k1 = (nf + mf) * (nf - mf) * (nf - 2.0) / 2.0;
            let k2 = 2.0 * nf * (nf - 1.0) * (nf - 2.0);
            let k3 = -mf * mf * (nf - 1.0) - nf * (nf - 1.0) * (nf - 2.0);
            let k4 = -nf * (nf + mf - 2.0) * (nf - mf - 2.0) / 2.0;

            let v2 = out[[l - 2, m, 0]];
            let d2 = out[[l - 2, m, 1]];
            let v4 = out[[l - 4, m, 0]];
            let d4 = out[[l - 4, m, 1]];

            out[[l, m, 0]] = ((k2 * rho * rho + k3) * v2 + k4 * v4) / k1;
            out[[l, m, 1]] =
                (2.0 * k2 * rho * v2 + (k2 * rho * rho + k3) * d2 + k4 * d4) / k1;
            l += 2;
        }
    }

    out
}
