// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Property-Based Tests (proptest) for equi-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for equi-math using proptest.
//!
//! Covers: Chebyshev bounds, Zernike regularity, Gauss-Legendre
//! exactness, angular transform round trips, LU residuals.

use equi_math::basis::{chebyshev, zernike};
use equi_math::fourier::{AngularTransform, Harmonics};
use equi_math::linalg::LuFactors;
use equi_math::quadrature::gauss_legendre;
use equi_types::modes::ModeTable;
use ndarray::{Array1, Array2};
use proptest::prelude::*;

proptest! {
    /// Chebyshev polynomials stay inside [-1, 1] on the interval.
    #[test]
    fn chebyshev_bounded_on_interval(s in -1.0f64..1.0, lrad in 1usize..12) {
        let b = chebyshev(s, lrad);
        for l in 0..=lrad {
            prop_assert!(b[[l, 0]].abs() <= 1.0 + 1e-12,
                "T_{}({}) = {}", l, s, b[[l, 0]]);
        }
    }

    /// Zernike polynomials vanish at the origin to at least first order
    /// for every m >= 1 entry.
    #[test]
    fn zernike_vanishes_on_axis(lrad in 2usize..9) {
        let z = zernike(0.0, lrad, 3);
        for l in 0..=lrad {
            for m in 1..=3.min(l) {
                if (l - m) % 2 != 0 { continue; }
                prop_assert!(z[[l, m, 0]].abs() < 1e-14);
            }
        }
    }

    /// An n-point rule integrates monomials up to degree 2n-1 exactly.
    #[test]
    fn gauss_legendre_exactness(n in 2usize..12, degree_half in 0usize..6) {
        let degree = (2 * degree_half).min(2 * n - 2);
        let (x, w) = gauss_legendre(n);
        let quad: f64 = x.iter().zip(w.iter())
            .map(|(&s, &w)| w * s.powi(degree as i32))
            .sum();
        let exact = 2.0 / (degree as f64 + 1.0);
        prop_assert!((quad - exact).abs() < 1e-12,
            "n={}, degree={}: {} vs {}", n, degree, quad, exact);
    }

    /// synthesize -> analyze is the identity on band-limited harmonics.
    #[test]
    fn transform_roundtrip(seed in proptest::collection::vec(-1.0f64..1.0, 30)) {
        let modes = ModeTable::new(2, 2);
        let tr = AngularTransform::new(&modes, 12, 10);
        let mn = modes.len();
        let mut h = Harmonics::zeros(mn);
        for k in 0..mn {
            h.cos[k] = seed[k % seed.len()];
            if k > 0 {
                h.sin[k] = seed[(k + 7) % seed.len()];
            }
        }
        let back = tr.analyze(&tr.synthesize(&h));
        for k in 0..mn {
            prop_assert!((back.cos[k] - h.cos[k]).abs() < 1e-11);
            prop_assert!((back.sin[k] - h.sin[k]).abs() < 1e-11);
        }
    }

    /// LU solves of diagonally dominant systems have tiny residuals.
    #[test]
    fn lu_residual_small(n in 2usize..10, seed in proptest::collection::vec(-1.0f64..1.0, 120)) {
        let mut a = Array2::zeros((n, n));
        for i in 0..n {
            for j in 0..n {
                a[[i, j]] = seed[(i * n + j) % seed.len()];
            }
            a[[i, i]] += n as f64; // dominance guarantees a clean factorization
        }
        let rhs = Array1::from_shape_fn(n, |i| seed[(7 * i + 3) % seed.len()]);
        let lu = LuFactors::factor(&a).unwrap();
        prop_assert!(!lu.is_singular());
        let x = lu.solve(&rhs);
        for i in 0..n {
            let mut r = -rhs[i];
            for j in 0..n {
                r += a[[i, j]] * x[j];
            }
            prop_assert!(r.abs() < 1e-10, "residual[{}] = {}", i, r);
        }
    }
}
