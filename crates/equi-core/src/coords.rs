// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Two-Point Coordinate Jacobian
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Surface Jacobian of the two-point (axis + interface) sub-problem with
//! the coordinate singularity installed, evaluated at the interface.
//!
//! The radial interpolation between axis and interface is linear in
//! s̄ = (1+s)/2 for m = 0 harmonics and carries the s̄^(m/2)
//! regularization prefactor for m > 0, so at s̄ = 1 the radial slope of
//! an m > 0 harmonic is m/2 times its interface amplitude. The returned
//! field is J = R_θ Z_s̄ − Z_θ R_s̄, the surface element divided by the
//! radial coordinate, affine in the axis amplitudes — which is what lets
//! the axis constructor zero its m = 1 harmonic with one linear solve.

use equi_math::fourier::{AngularTransform, Harmonics};
use equi_types::geometry::FourierSurface;
use equi_types::modes::ModeTable;
use ndarray::Array1;

/// Which interface coefficient a Jacobian derivative is taken against.
/// Replaces the hidden global derivative flags of older implementations:
/// the request travels explicitly with the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivativeRequest {
    /// Perturbed mode, base-table index.
    pub mode: usize,
    pub rz: RzChannel,
    pub sym: SymmetryChannel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RzChannel {
    R,
    Z,
}

/// Symmetric selects the stellarator-symmetric coefficient family of the
/// channel (R cosine, Z sine); NonSymmetric the complementary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryChannel {
    Symmetric,
    NonSymmetric,
}

/// θ-derivative and s̄-derivative fields of R and Z at s̄ = 1.
struct TwoPointFields {
    r_theta: Array1<f64>,
    z_theta: Array1<f64>,
    r_sbar: Array1<f64>,
    z_sbar: Array1<f64>,
}

fn two_point_fields(
    interface: &FourierSurface,
    axis: &FourierSurface,
    modes: &ModeTable,
    transform: &AngularTransform,
) -> TwoPointFields {
    let mn = modes.len();
    let mut rt = Harmonics::zeros(mn);
    let mut zt = Harmonics::zeros(mn);
    let mut rs = Harmonics::zeros(mn);
    let mut zs = Harmonics::zeros(mn);

    for k in 0..mn {
        let m = modes.m(k);
        let mf = m as f64;
        rt.cos[k] = mf * interface.r_sin[k];
        rt.sin[k] = -mf * interface.r_cos[k];
        zt.cos[k] = mf * interface.z_sin[k];
        zt.sin[k] = -mf * interface.z_cos[k];

        if m == 0 {
            rs.cos[k] = interface.r_cos[k] - axis.r_cos[k];
            rs.sin[k] = interface.r_sin[k] - axis.r_sin[k];
            zs.cos[k] = interface.z_cos[k] - axis.z_cos[k];
            zs.sin[k] = interface.z_sin[k] - axis.z_sin[k];
        } else {
            let slope = 0.5 * mf;
            rs.cos[k] = slope * interface.r_cos[k];
            rs.sin[k] = slope * interface.r_sin[k];
            zs.cos[k] = slope * interface.z_cos[k];
            zs.sin[k] = slope * interface.z_sin[k];
        }
    }

    TwoPointFields {
        r_theta: transform.synthesize(&rt),
        z_theta: transform.synthesize(&zt),
        r_sbar: transform.synthesize(&rs),
        z_sbar: transform.synthesize(&zs),
    }
}

/// J = R_θ Z_s̄ − Z_θ R_s̄ on the angular grid.
pub fn interface_jacobian(
    interface: &FourierSurface,
    axis: &FourierSurface,
    modes: &ModeTable,
    transform: &AngularTransform,
) -> Array1<f64> {
    let f = two_point_fields(interface, axis, modes, transform);
    let ntz = transform.grid_len();
    Array1::from_shape_fn(ntz, |p| {
        f.r_theta[p] * f.z_sbar[p] - f.z_theta[p] * f.r_sbar[p]
    })
}

/// ∂J/∂(one interface Fourier coefficient), axis held fixed.
///
/// For m = 0 modes the trial axis tracks the interface harmonic one to
/// one, so the total derivative vanishes identically and the field is
/// returned as zero without evaluation.
pub fn interface_jacobian_derivative(
    interface: &FourierSurface,
    axis: &FourierSurface,
    modes: &ModeTable,
    transform: &AngularTransform,
    request: &DerivativeRequest,
) -> Array1<f64> {
    let ntz = transform.grid_len();
    let m = modes.m(request.mode);
    if m == 0 {
        return Array1::zeros(ntz);
    }

    let f = two_point_fields(interface, axis, modes, transform);
    let ck = transform.mode_cos(request.mode);
    let sk = transform.mode_sin(request.mode);
    let mf = m as f64;
    let slope = 0.5 * mf;

    Array1::from_shape_fn(ntz, |p| match (request.rz, request.sym) {
        // ∂/∂ r_cos: R_θ gains −m sin α, R_s̄ gains (m/2) cos α
        (RzChannel::R, SymmetryChannel::Symmetric) => {
            -mf * sk[p] * f.z_sbar[p] - f.z_theta[p] * slope * ck[p]
        }
        // ∂/∂ r_sin
        (RzChannel::R, SymmetryChannel::NonSymmetric) => {
            mf * ck[p] * f.z_sbar[p] - f.z_theta[p] * slope * sk[p]
        }
        // ∂/∂ z_sin: Z_θ gains m cos α, Z_s̄ gains (m/2) sin α
        (RzChannel::Z, SymmetryChannel::Symmetric) => {
            f.r_theta[p] * slope * sk[p] - mf * ck[p] * f.r_sbar[p]
        }
        // ∂/∂ z_cos
        (RzChannel::Z, SymmetryChannel::NonSymmetric) => {
            f.r_theta[p] * slope * ck[p] + mf * sk[p] * f.r_sbar[p]
        }
    })
}
