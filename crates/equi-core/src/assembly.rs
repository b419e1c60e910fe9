// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Basis-Interaction Integrals
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Volume integrals of radial-basis products against metric harmonics.
//!
//! For one sub-volume, every ordered pair of Fourier modes and radial
//! degrees contributes to a family of 4-index tensors, one per
//! (metric component, trigonometric channel) pair. The angular integral
//! is reduced to the sum/difference metric harmonics by the double-angle
//! identities; the radial integral is Gauss-Legendre quadrature.
//!
//! The quadrature loop is data-parallel: each worker accumulates into a
//! private tensor set and the partials are merged afterwards, so the
//! result is reproducible up to floating-point association.

use equi_math::basis::{chebyshev, zernike};
use equi_types::constants::angle_integral_norm;
use equi_types::modes::{ConvolutionTable, ModeTable};
use ndarray::{Array1, Array4};
use rayon::prelude::*;

use equi_types::error::EquiResult;

use crate::metric::{MetricCache, MetricComponent, MetricHarmonics};

/// Trigonometric product channel of the (i, j) mode pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigChannel {
    CosCos,
    CosSin,
    SinCos,
    SinSin,
}

impl TrigChannel {
    pub const ALL: [TrigChannel; 4] = [
        TrigChannel::CosCos,
        TrigChannel::CosSin,
        TrigChannel::SinCos,
        TrigChannel::SinSin,
    ];

    pub fn index(self) -> usize {
        match self {
            TrigChannel::CosCos => 0,
            TrigChannel::CosSin => 1,
            TrigChannel::SinCos => 2,
            TrigChannel::SinSin => 3,
        }
    }
}

/// Which value/derivative combination of the two radial factors a
/// component contracts: the volume element couples through one radial
/// derivative, g_ss through plain values, g_st/g_sz mixed, and the
/// angular block g_tt/g_tz/g_zz through both derivatives.
#[derive(Debug, Clone, Copy)]
enum BasisProduct {
    DerivValue,
    ValueValue,
    ValueDeriv,
    DerivDeriv,
}

fn basis_product(c: MetricComponent) -> BasisProduct {
    match c {
        MetricComponent::VolumeElement => BasisProduct::DerivValue,
        MetricComponent::Gss => BasisProduct::ValueValue,
        MetricComponent::Gst | MetricComponent::Gsz => BasisProduct::ValueDeriv,
        MetricComponent::Gtt | MetricComponent::Gtz | MetricComponent::Gzz => {
            BasisProduct::DerivDeriv
        }
    }
}

/// The (component, channel) pairs that survive stellarator symmetry.
pub const STELLARATOR_SYMMETRIC_PAIRS: [(MetricComponent, TrigChannel); 7] = [
    (MetricComponent::VolumeElement, TrigChannel::CosCos),
    (MetricComponent::Gss, TrigChannel::SinSin),
    (MetricComponent::Gst, TrigChannel::SinCos),
    (MetricComponent::Gsz, TrigChannel::SinCos),
    (MetricComponent::Gtt, TrigChannel::CosCos),
    (MetricComponent::Gtz, TrigChannel::CosCos),
    (MetricComponent::Gzz, TrigChannel::CosCos),
];

fn active_pairs(stellarator_symmetric: bool) -> Vec<(MetricComponent, TrigChannel)> {
    if stellarator_symmetric {
        STELLARATOR_SYMMETRIC_PAIRS.to_vec()
    } else {
        let mut pairs = Vec::with_capacity(28);
        for c in MetricComponent::ALL {
            for ch in TrigChannel::ALL {
                pairs.push((c, ch));
            }
        }
        pairs
    }
}

/// One tensor per active (component, channel) pair, indexed
/// (radial degree l, radial degree p, mode i, mode j). In a volume with
/// the coordinate singularity only the parity-compacted radial prefix is
/// populated.
#[derive(Debug, Clone)]
pub struct InteractionTensors {
    pub lrad: usize,
    pub mn: usize,
    pub stellarator_symmetric: bool,
    slots: Vec<Option<Array4<f64>>>,
}

impl InteractionTensors {
    pub fn zeros(lrad: usize, mn: usize, stellarator_symmetric: bool) -> Self {
        let mut slots: Vec<Option<Array4<f64>>> = (0..28).map(|_| None).collect();
        for (c, ch) in active_pairs(stellarator_symmetric) {
            slots[c.index() * 4 + ch.index()] =
                Some(Array4::zeros((lrad + 1, lrad + 1, mn, mn)));
        }
        InteractionTensors {
            lrad,
            mn,
            stellarator_symmetric,
            slots,
        }
    }

    /// Tensor for one (component, channel) pair; `None` for channels
    /// dropped by stellarator symmetry.
    pub fn get(&self, c: MetricComponent, ch: TrigChannel) -> Option<&Array4<f64>> {
        self.slots[c.index() * 4 + ch.index()].as_ref()
    }

    fn slot_mut(&mut self, c: MetricComponent, ch: TrigChannel) -> &mut Array4<f64> {
        self.slots[c.index() * 4 + ch.index()]
            .as_mut()
            .expect("accumulation into an inactive channel")
    }

    fn merge(&mut self, other: &InteractionTensors) {
        for (mine, theirs) in self.slots.iter_mut().zip(other.slots.iter()) {
            if let (Some(a), Some(b)) = (mine.as_mut(), theirs.as_ref()) {
                *a += b;
            }
        }
    }

    fn scale(&mut self, factor: f64) {
        for slot in self.slots.iter_mut().flatten() {
            slot.mapv_inplace(|v| v * factor);
        }
    }
}

/// Radial discretization of the target volume.
#[derive(Debug, Clone, Copy)]
pub struct VolumeDiscretization {
    pub lrad: usize,
    /// True only for the innermost volume, which touches the coordinate
    /// singularity and uses the Zernike basis.
    pub coordinate_singularity: bool,
}

/// Assembles the interaction tensors of one sub-volume.
#[derive(Debug, Clone, Copy)]
pub struct TensorAssembler<'a> {
    pub modes: &'a ModeTable,
    pub conv: &'a ConvolutionTable,
    pub nvol: usize,
    pub nfp: usize,
    pub stellarator_symmetric: bool,
}

impl TensorAssembler<'_> {
    /// Rebuild all tensors of volume `lvol` (1-based). The metric
    /// harmonics must already belong to this volume; see
    /// [`crate::metric::MetricCache::ensure`].
    pub fn assemble(
        &self,
        lvol: usize,
        disc: &VolumeDiscretization,
        nodes: &Array1<f64>,
        weights: &Array1<f64>,
        metric: &MetricHarmonics,
    ) -> InteractionTensors {
        debug_assert!(
            lvol >= 1 && lvol <= self.nvol,
            "illegal volume label {lvol} (nvol = {})",
            self.nvol
        );
        debug_assert_eq!(nodes.len(), weights.len());
        debug_assert_eq!(metric.lquad, nodes.len());

        let mn = self.modes.len();
        let lrad = disc.lrad;
        let active = active_pairs(self.stellarator_symmetric);
        let lquad = nodes.len();

        let mut tensors = (0..lquad)
            .into_par_iter()
            .fold(
                || InteractionTensors::zeros(lrad, mn, self.stellarator_symmetric),
                |mut acc, jq| {
                    self.accumulate_point(jq, nodes[jq], weights[jq], disc, metric, &active, &mut acc);
                    acc
                },
            )
            .reduce(
                || InteractionTensors::zeros(lrad, mn, self.stellarator_symmetric),
                |mut a, b| {
                    a.merge(&b);
                    a
                },
            );

        tensors.scale(angle_integral_norm(self.nfp));
        tensors
    }

    /// Like [`assemble`](Self::assemble), refreshing the volume's metric
    /// harmonics through `supplier` first if the cache is stale.
    pub fn assemble_cached<F>(
        &self,
        lvol: usize,
        disc: &VolumeDiscretization,
        nodes: &Array1<f64>,
        weights: &Array1<f64>,
        cache: &mut MetricCache,
        supplier: F,
    ) -> EquiResult<InteractionTensors>
    where
        F: FnOnce() -> EquiResult<MetricHarmonics>,
    {
        let metric = cache.ensure(lvol, supplier)?;
        Ok(self.assemble(lvol, disc, nodes, weights, metric))
    }

    /// Contribution of a single quadrature point. Writes only into `out`,
    /// which is private to the calling worker.
    #[allow(clippy::too_many_arguments)]
    fn accumulate_point(
        &self,
        jq: usize,
        lss: f64,
        weight: f64,
        disc: &VolumeDiscretization,
        metric: &MetricHarmonics,
        active: &[(MetricComponent, TrigChannel)],
        out: &mut InteractionTensors,
    ) {
        let mn = self.modes.len();
        let lrad = disc.lrad;
        let sbar = (lss + 1.0) * 0.5;

        let singular = disc.coordinate_singularity;
        let basis_zernike = singular.then(|| zernike(sbar, lrad, self.modes.mpol));
        let basis_cheby = (!singular).then(|| chebyshev(lss, lrad));

        let mut coeff = [[0.0f64; 4]; 7];

        for ii in 0..mn {
            let mi = self.modes.m(ii);
            for jj in 0..mn {
                let mj = self.modes.m(jj);

                let kd = self.conv.diff_index[[ii, jj]];
                let ka = self.conv.sum_index[[ii, jj]];
                let ws = weight / self.conv.diff_norm[[ii, jj]];
                let wa = weight / self.conv.sum_norm[[ii, jj]];

                for &(c, ch) in active {
                    let e = metric.even(c);
                    let o = metric.odd(c);
                    coeff[c.index()][ch.index()] = match ch {
                        TrigChannel::CosCos => e[[kd, jq]] * ws.abs() + e[[ka, jq]] * wa.abs(),
                        TrigChannel::SinSin => e[[kd, jq]] * ws.abs() - e[[ka, jq]] * wa.abs(),
                        TrigChannel::SinCos => o[[kd, jq]] * ws + o[[ka, jq]] * wa,
                        TrigChannel::CosSin => -o[[kd, jq]] * ws + o[[ka, jq]] * wa,
                    };
                }

                for ll in 0..=lrad {
                    for pp in 0..=lrad {
                        let (tl, dl, tp, dp, l1, p1) = if singular {
                            // Zernike non-vanishing constraints: structural
                            // zeros, skipped silently
                            if ll < mi || pp < mj {
                                continue;
                            }
                            if (ll + mi) % 2 != 0 || (pp + mj) % 2 != 0 {
                                continue;
                            }
                            let z = basis_zernike.as_ref().unwrap();
                            (
                                z[[ll, mi, 0]],
                                z[[ll, mi, 1]] * 0.5,
                                z[[pp, mj, 0]],
                                z[[pp, mj, 1]] * 0.5,
                                ll / 2,
                                pp / 2,
                            )
                        } else {
                            let b = basis_cheby.as_ref().unwrap();
                            (b[[ll, 0]], b[[ll, 1]], b[[pp, 0]], b[[pp, 1]], ll, pp)
                        };

                        let tltp = tl * tp;
                        let tldp = tl * dp;
                        let dltp = dl * tp;
                        let dldp = dl * dp;

                        for &(c, ch) in active {
                            let f = coeff[c.index()][ch.index()];
                            let prod = match basis_product(c) {
                                BasisProduct::DerivValue => dltp,
                                BasisProduct::ValueValue => tltp,
                                BasisProduct::ValueDeriv => tldp,
                                BasisProduct::DerivDeriv => dldp,
                            };
                            out.slot_mut(c, ch)[[l1, p1, ii, jj]] += prod * f;
                        }
                    }
                }
            }
        }
    }
}
