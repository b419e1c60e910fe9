// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Gaussian Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gauss-Legendre abscissae and weights on [-1, 1].

use ndarray::Array1;

/// Legendre P_n and P_{n-1} at x.
fn legendre_pair(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    if n == 0 {
        return (1.0, 0.0);
    }
    for k in 2..=n {
        let kf = k as f64;
        let p2 = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
        p0 = p1;
        p1 = p2;
    }
    (p1, p0)
}

/// Nodes (ascending) and weights of the n-point Gauss-Legendre rule.
/// Newton iteration from the Chebyshev-angle initial guess; exact for
/// polynomials of degree 2n-1.
pub fn gauss_legendre(n: usize) -> (Array1<f64>, Array1<f64>) {
    let mut nodes = Array1::zeros(n);
    let mut weights = Array1::zeros(n);
    let nf = n as f64;

    for i in 0..n.div_ceil(2) {
        let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        if n % 2 == 1 && i == n / 2 {
            x = 0.0;
        }
        let mut dp = 0.0;
        for _ in 0..100 {
            let (p, pm1) = legendre_pair(n, x);
            dp = if x.abs() < 1.0 {
                nf * (x * p - pm1) / (x * x - 1.0)
            } else {
                nf * (nf + 1.0) / 2.0 * x.signum()
            };
            let dx = p / dp;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        let w = 2.0 / ((1.0 - x * x) * dp * dp);
        nodes[i] = -x;
        nodes[n - 1 - i] = x;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    (nodes, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_interval_length() {
        for n in 1..=24 {
            let (_, w) = gauss_legendre(n);
            let total: f64 = w.sum();
            assert!((total - 2.0).abs() < 1e-13, "n={n}: sum(w)={total}");
        }
    }

    #[test]
    fn test_nodes_symmetric_and_sorted() {
        let (x, _) = gauss_legendre(9);
        for i in 0..9 {
            assert!((x[i] + x[8 - i]).abs() < 1e-14);
            if i > 0 {
                assert!(x[i] > x[i - 1]);
            }
        }
        assert!(x[4].abs() < 1e-15);
    }

    #[test]
    fn test_two_point_rule_matches_closed_form() {
        let (x, w) = gauss_legendre(2);
        let r = 1.0 / 3f64.sqrt();
        assert!((x[0] + r).abs() < 1e-14);
        assert!((x[1] - r).abs() < 1e-14);
        assert!((w[0] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_exact_for_high_degree_polynomial() {
        // integral of s^10 over [-1,1] = 2/11
        let (x, w) = gauss_legendre(6);
        let quad: f64 = x.iter().zip(w.iter()).map(|(&s, &w)| w * s.powi(10)).sum();
        assert!((quad - 2.0 / 11.0).abs() < 1e-13, "quad={quad}");
    }
}
