// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Coordinate Axis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coordinate-axis construction from a bounding interface.
//!
//! The axis is not an independent degree of freedom: it is derived from
//! the geometry of one interface, either as its arc-length-weighted
//! poloidal centroid or by eliminating the m = 1 poloidal harmonic of
//! the two-point surface Jacobian with a small dense solve. Both
//! methods optionally propagate the sensitivity of the axis harmonics
//! to every interface Fourier coefficient; the Jacobian method reuses
//! one LU factorization across all perturbed right-hand sides.

use equi_math::fourier::{AngularTransform, Harmonics};
use equi_math::linalg::LuFactors;
use equi_types::config::{AxisMethod, GeometryKind};
use equi_types::error::{EquiError, EquiResult};
use equi_types::geometry::{FourierSurface, SurfaceGeometry};
use equi_types::modes::ModeTable;
use ndarray::{Array1, Array2, Array3, Array4};
use tracing::{debug, warn};

use crate::coords::{
    interface_jacobian, interface_jacobian_derivative, DerivativeRequest, RzChannel,
    SymmetryChannel,
};

/// Everything the axis constructor needs besides the geometry itself.
#[derive(Debug, Clone, Copy)]
pub struct AxisContext<'a> {
    pub modes: &'a ModeTable,
    pub transform: &'a AngularTransform,
    pub geometry: GeometryKind,
    pub method: AxisMethod,
    pub stellarator_symmetric: bool,
}

/// Sensitivity of the axis geometry to a unit perturbation of one
/// interface Fourier coefficient. Harmonic tables are indexed
/// (axis harmonic, axis cos/sin channel, perturbation cos/sin channel,
/// perturbed mode); real-space tables (grid point, perturbation channel,
/// perturbed mode). Rebuilt from scratch on every request.
#[derive(Debug, Clone)]
pub struct AxisDerivatives {
    pub dr_axis_dr: Array4<f64>,
    pub dr_axis_dz: Array4<f64>,
    pub dz_axis_dr: Array4<f64>,
    pub dz_axis_dz: Array4<f64>,
    pub dr0_dr: Array3<f64>,
    pub dr0_dz: Array3<f64>,
    pub dz0_dr: Array3<f64>,
    pub dz0_dz: Array3<f64>,
}

impl AxisDerivatives {
    fn zeros(mn: usize, ntz: usize) -> Self {
        AxisDerivatives {
            dr_axis_dr: Array4::zeros((mn, 2, 2, mn)),
            dr_axis_dz: Array4::zeros((mn, 2, 2, mn)),
            dz_axis_dr: Array4::zeros((mn, 2, 2, mn)),
            dz_axis_dz: Array4::zeros((mn, 2, 2, mn)),
            dr0_dr: Array3::zeros((ntz, 2, mn)),
            dr0_dz: Array3::zeros((ntz, 2, mn)),
            dz0_dr: Array3::zeros((ntz, 2, mn)),
            dz0_dz: Array3::zeros((ntz, 2, mn)),
        }
    }
}

/// Derive the axis from interface `ivol` and write its harmonics into
/// the reserved column 0 of `geom`. Returns the derivative tables when
/// requested (and the geometry supports them).
pub fn construct_axis(
    geom: &mut SurfaceGeometry,
    ivol: usize,
    compute_derivatives: bool,
    ctx: &AxisContext<'_>,
) -> EquiResult<Option<AxisDerivatives>> {
    debug_assert!(
        ivol >= 1 && ivol <= geom.nvol,
        "axis reference volume {ivol} out of range (nvol = {})",
        geom.nvol
    );
    debug_assert_eq!(geom.mn, ctx.modes.len());

    match ctx.geometry {
        GeometryKind::Slab | GeometryKind::Cylindrical => {
            // no toroidal curvature: the axis degenerates to the origin
            geom.set_surface(0, &FourierSurface::zeros(geom.mn));
            Ok(None)
        }
        GeometryKind::Toroidal => match ctx.method {
            AxisMethod::Centroid => centroid_axis(geom, ivol, compute_derivatives, ctx),
            AxisMethod::JacobianElimination => {
                jacobian_axis(geom, ivol, compute_derivatives, ctx)
            }
        },
    }
}

/// Harmonics of the θ-derivative of a (cos, sin) coefficient pair.
fn theta_derivative(modes: &ModeTable, cos: &Array1<f64>, sin: &Array1<f64>) -> Harmonics {
    let mn = modes.len();
    let mut h = Harmonics::zeros(mn);
    for k in 0..mn {
        let mf = modes.m(k) as f64;
        h.cos[k] = mf * sin[k];
        h.sin[k] = -mf * cos[k];
    }
    h
}

/// Poloidal integral of `field` (m = 0 extraction scaled by 2π),
/// broadcast back to the grid and normalized by the arc length.
fn poloidal_average(
    transform: &AngularTransform,
    ajk: &Array1<f64>,
    field: &Array1<f64>,
    total_length: &Array1<f64>,
) -> Array1<f64> {
    let mut h = transform.analyze(field);
    h.cos *= ajk;
    h.sin *= ajk;
    let mut out = transform.synthesize(&h);
    out.zip_mut_with(total_length, |v, &l| *v /= l);
    out
}

fn centroid_axis(
    geom: &mut SurfaceGeometry,
    ivol: usize,
    compute_derivatives: bool,
    ctx: &AxisContext<'_>,
) -> EquiResult<Option<AxisDerivatives>> {
    let modes = ctx.modes;
    let transform = ctx.transform;
    let mn = modes.len();
    let ntz = transform.grid_len();
    let ajk = modes.poloidal_weights();
    let interface = geom.surface(ivol);

    // differential poloidal arc length dl = |(R_θ, Z_θ)|
    let r_theta = transform.synthesize(&theta_derivative(modes, &interface.r_cos, &interface.r_sin));
    let z_theta = transform.synthesize(&theta_derivative(modes, &interface.z_cos, &interface.z_sin));
    let dl = Array1::from_shape_fn(ntz, |p| (r_theta[p] * r_theta[p] + z_theta[p] * z_theta[p]).sqrt());

    // L(ζ): poloidal integral of dl, broadcast over the grid
    let mut lh = transform.analyze(&dl);
    lh.cos *= &ajk;
    lh.sin *= &ajk;
    let total_length = transform.synthesize(&lh);

    let r1 = transform.synthesize(&Harmonics {
        cos: interface.r_cos.clone(),
        sin: interface.r_sin.clone(),
    });
    let z1 = transform.synthesize(&Harmonics {
        cos: interface.z_cos.clone(),
        sin: interface.z_sin.clone(),
    });

    let r0 = poloidal_average(transform, &ajk, &(&r1 * &dl), &total_length);
    let z0 = poloidal_average(transform, &ajk, &(&z1 * &dl), &total_length);

    let hr = transform.analyze(&r0);
    let hz = transform.analyze(&z0);
    geom.set_surface(
        0,
        &FourierSurface {
            r_cos: hr.cos.clone(),
            r_sin: hr.sin.clone(),
            z_cos: hz.cos.clone(),
            z_sin: hz.sin.clone(),
        },
    );
    debug!(
        ivol,
        r_axis = hr.cos[0],
        z_axis = hz.cos[0],
        "centroid axis derived"
    );

    if !compute_derivatives {
        return Ok(None);
    }

    // closed-form product-rule integrands, one per coefficient family
    let delta_r = &r1 - &r0;
    let delta_z = &z1 - &z0;
    let mut deriv = AxisDerivatives::zeros(mn, ntz);

    for k in 0..mn {
        let mf = modes.m(k) as f64;
        let ck = transform.mode_cos(k);
        let sk = transform.mode_sin(k);

        // (field, channel) destination selectors are resolved below; the
        // integrands pair the angular basis with the arc length and the
        // displacement-weighted θ-derivative
        let fields: [(usize, usize, Array1<f64>); 8] = [
            // (target table 0..3, perturbation channel, integrand)
            (0, 0, Array1::from_shape_fn(ntz, |p| {
                ck[p] * dl[p] - delta_r[p] * r_theta[p] * mf * sk[p] / dl[p]
            })),
            (0, 1, Array1::from_shape_fn(ntz, |p| {
                sk[p] * dl[p] + delta_r[p] * r_theta[p] * mf * ck[p] / dl[p]
            })),
            (1, 0, Array1::from_shape_fn(ntz, |p| {
                -delta_r[p] * z_theta[p] * mf * sk[p] / dl[p]
            })),
            (1, 1, Array1::from_shape_fn(ntz, |p| {
                delta_r[p] * z_theta[p] * mf * ck[p] / dl[p]
            })),
            (2, 0, Array1::from_shape_fn(ntz, |p| {
                -delta_z[p] * r_theta[p] * mf * sk[p] / dl[p]
            })),
            (2, 1, Array1::from_shape_fn(ntz, |p| {
                delta_z[p] * r_theta[p] * mf * ck[p] / dl[p]
            })),
            (3, 0, Array1::from_shape_fn(ntz, |p| {
                ck[p] * dl[p] - delta_z[p] * z_theta[p] * mf * sk[p] / dl[p]
            })),
            (3, 1, Array1::from_shape_fn(ntz, |p| {
                sk[p] * dl[p] + delta_z[p] * z_theta[p] * mf * ck[p] / dl[p]
            })),
        ];

        for (table, channel, integrand) in fields {
            let averaged = poloidal_average(transform, &ajk, &integrand, &total_length);
            let h = transform.analyze(&averaged);
            let (fourier, real) = match table {
                0 => (&mut deriv.dr_axis_dr, &mut deriv.dr0_dr),
                1 => (&mut deriv.dr_axis_dz, &mut deriv.dr0_dz),
                2 => (&mut deriv.dz_axis_dr, &mut deriv.dz0_dr),
                _ => (&mut deriv.dz_axis_dz, &mut deriv.dz0_dz),
            };
            for p in 0..ntz {
                real[[p, channel, k]] = averaged[p];
            }
            for kk in 0..mn {
                fourier[[kk, 0, channel, k]] = h.cos[kk];
                fourier[[kk, 1, channel, k]] = h.sin[kk];
            }
        }
    }

    Ok(Some(deriv))
}

fn jacobian_axis(
    geom: &mut SurfaceGeometry,
    ivol: usize,
    compute_derivatives: bool,
    ctx: &AxisContext<'_>,
) -> EquiResult<Option<AxisDerivatives>> {
    if !ctx.stellarator_symmetric {
        // the non-symmetric matrix fill has not been derived; refusing is
        // safer than extrapolating the symmetric structure
        return Err(EquiError::ConfigError(
            "Jacobian-elimination axis requires stellarator symmetry; use the centroid method"
                .to_string(),
        ));
    }

    let modes = ctx.modes;
    let transform = ctx.transform;
    let mn = modes.len();
    let ntz = transform.grid_len();
    let ntor = modes.ntor;
    // only the low-order toroidal harmonics are eliminated; higher ones
    // are left unconstrained
    let ntoraxis = ntor.min(3);
    let njac = 2 * ntoraxis + 1;
    let interface = geom.surface(ivol);

    // trial axis: the m = 0 family of the interface
    let mut trial_axis = FourierSurface::zeros(mn);
    for n in 0..=ntor as i64 {
        let k = modes.index_of(0, n).expect("m=0 family");
        trial_axis.r_cos[k] = interface.r_cos[k];
        trial_axis.r_sin[k] = interface.r_sin[k];
        trial_axis.z_cos[k] = interface.z_cos[k];
        trial_axis.z_sin[k] = interface.z_sin[k];
    }

    let jac = interface_jacobian(&interface, &trial_axis, modes, transform);
    let hj = transform.analyze(&jac);

    let m1 = |n: i64| modes.index_of(1, n).expect("m=1 family");
    let mut rhs = Array1::zeros(njac);
    for i in -(ntoraxis as i64)..=ntoraxis as i64 {
        rhs[(i + ntoraxis as i64) as usize] = -hj.cos[m1(i)];
    }

    // sensitivity of the m = 1 Jacobian harmonics to the axis unknowns
    // [ΔR_0, ΔR_1..ΔR_Nta, ΔZ_1..ΔZ_Nta], from the convolution structure
    let mut a = Array2::zeros((njac, njac));
    for i in -(ntoraxis as i64)..=ntoraxis as i64 {
        let row = (i + ntoraxis as i64) as usize;
        for j in 1..=ntoraxis {
            let ji = j as i64;
            if i - ji >= -(ntor as i64) {
                let id = m1(i - ji);
                a[[row, j]] -= interface.z_sin[id];
                a[[row, ntoraxis + j]] += interface.r_cos[id];
            }
            if i + ji <= ntor as i64 {
                let id = m1(i + ji);
                a[[row, j]] -= interface.z_sin[id];
                a[[row, ntoraxis + j]] -= interface.r_cos[id];
            }
        }
        a[[row, 0]] = -2.0 * interface.z_sin[m1(i)];
    }
    // half-domain radial parametrization
    a.mapv_inplace(|v| v * 0.5);

    let lu = LuFactors::factor(&a)?;
    if lu.is_singular() {
        warn!(
            ivol,
            status = ?lu.status,
            "singular axis Jacobian system; continuing with best-effort solve"
        );
    }
    let solution = lu.solve(&rhs);

    let mut axis = FourierSurface::zeros(mn);
    for n in 0..=ntoraxis as i64 {
        let k = modes.index_of(0, n).expect("m=0 family");
        axis.r_cos[k] = interface.r_cos[k] - solution[n as usize];
        if n > 0 {
            axis.z_sin[k] = interface.z_sin[k] - solution[ntoraxis + n as usize];
        }
    }
    geom.set_surface(0, &axis);
    debug!(
        ivol,
        r_axis = axis.r_cos[0],
        "Jacobian-elimination axis derived"
    );

    if !compute_derivatives {
        return Ok(None);
    }

    let mut deriv = AxisDerivatives::zeros(mn, ntz);

    for imn in 0..mn {
        let m = modes.m(imn);
        for irz in 0..2usize {
            for issym in 0..2usize {
                if issym == 1 && ctx.stellarator_symmetric {
                    continue;
                }
                if imn == 0 && irz != issym {
                    continue; // no m = n = 0 sine coefficient
                }

                let mut drhs = Array1::zeros(njac);
                if m != 0 {
                    let request = DerivativeRequest {
                        mode: imn,
                        rz: if irz == 0 { RzChannel::R } else { RzChannel::Z },
                        sym: if issym == 0 {
                            SymmetryChannel::Symmetric
                        } else {
                            SymmetryChannel::NonSymmetric
                        },
                    };
                    let djac = interface_jacobian_derivative(
                        &interface,
                        &trial_axis,
                        modes,
                        transform,
                        &request,
                    );
                    let hd = transform.analyze(&djac);
                    for i in -(ntoraxis as i64)..=ntoraxis as i64 {
                        drhs[(i + ntoraxis as i64) as usize] = -hd.cos[m1(i)];
                    }
                }

                if m == 1 {
                    // the matrix itself depends on the m = 1 amplitudes:
                    // matrix-perturbation correction −(∂A) · solution
                    let mut da = Array2::zeros((njac, njac));
                    for i in -(ntoraxis as i64)..=ntoraxis as i64 {
                        let row = (i + ntoraxis as i64) as usize;
                        for j in 1..=ntoraxis {
                            let ji = j as i64;
                            if i - ji >= -(ntor as i64) && m1(i - ji) == imn {
                                if irz == 1 {
                                    da[[row, j]] -= 1.0;
                                }
                                if irz == 0 {
                                    da[[row, ntoraxis + j]] += 1.0;
                                }
                            }
                            if i + ji <= ntor as i64 && m1(i + ji) == imn {
                                if irz == 1 {
                                    da[[row, j]] -= 1.0;
                                }
                                if irz == 0 {
                                    da[[row, ntoraxis + j]] -= 1.0;
                                }
                            }
                        }
                        if m1(i) == imn && irz == 1 {
                            da[[row, 0]] = -2.0;
                        }
                    }
                    da.mapv_inplace(|v| v * 0.5);
                    let correction = da.dot(&solution);
                    drhs -= &correction;
                }

                let y = lu.solve(&drhs);

                let channel = if irz == 0 { issym } else { 1 - issym };
                let (table_r, table_z) = if irz == 0 {
                    (&mut deriv.dr_axis_dr, &mut deriv.dz_axis_dr)
                } else {
                    (&mut deriv.dr_axis_dz, &mut deriv.dz_axis_dz)
                };
                for n in 0..=ntoraxis {
                    table_r[[n, 0, channel, imn]] = -y[n];
                }
                for n in 1..=ntoraxis {
                    table_z[[n, 1, channel, imn]] = -y[ntoraxis + n];
                }
                if m == 0 {
                    // the axis copies its own m = 0 coefficient
                    if irz == 0 {
                        deriv.dr_axis_dr[[imn, 0, channel, imn]] += 1.0;
                    } else {
                        deriv.dz_axis_dz[[imn, 1, channel, imn]] += 1.0;
                    }
                }
            }
        }

        // real-space counterparts of this mode's derivative tables
        for channel in 0..2usize {
            for (fourier, real) in [
                (&deriv.dr_axis_dr, &mut deriv.dr0_dr),
                (&deriv.dr_axis_dz, &mut deriv.dr0_dz),
                (&deriv.dz_axis_dr, &mut deriv.dz0_dr),
                (&deriv.dz_axis_dz, &mut deriv.dz0_dz),
            ] {
                let h = Harmonics {
                    cos: Array1::from_shape_fn(mn, |kk| fourier[[kk, 0, channel, imn]]),
                    sin: Array1::from_shape_fn(mn, |kk| fourier[[kk, 1, channel, imn]]),
                };
                let field = transform.synthesize(&h);
                for p in 0..ntz {
                    real[[p, channel, imn]] = field[p];
                }
            }
        }
    }

    Ok(Some(deriv))
}
