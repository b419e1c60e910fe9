// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Full poloidal angle.
pub const PI2: f64 = 2.0 * std::f64::consts::PI;

/// Guard against division by structurally tiny quantities.
pub const VSMALL: f64 = 1.0e-30;

/// Generic small-number threshold for pivot/degeneracy checks.
pub const SMALL: f64 = 1.0e-15;

/// sqrt of f64 machine precision, the pivot-substitution scale for
/// best-effort solves of near-singular systems.
pub const SQRT_MACH_PREC: f64 = 1.4901161193847656e-8;

/// Global scale folded into every assembled interaction tensor: the
/// angular integration measure of one field period, halved.
/// (2π)·(2π/nfp)·(1/2) = 2π²/nfp.
pub fn angle_integral_norm(nfp: usize) -> f64 {
    PI2 * PI2 / (nfp as f64) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_integral_norm_single_period() {
        let expected = 2.0 * std::f64::consts::PI * std::f64::consts::PI;
        assert!((angle_integral_norm(1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_angle_integral_norm_scales_inversely_with_periods() {
        assert!((angle_integral_norm(5) - angle_integral_norm(1) / 5.0).abs() < 1e-12);
    }
}
