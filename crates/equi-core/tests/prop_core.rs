// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Property-Based Tests (proptest) for equi-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for equi-core using proptest.
//!
//! The safety-critical invariant of the assembler is that quadrature
//! accumulation is a commutative reduction: permuting the quadrature
//! points (together with their metric columns) must not change any
//! tensor entry beyond floating-point association error.

use equi_core::assembly::{
    InteractionTensors, TensorAssembler, VolumeDiscretization, STELLARATOR_SYMMETRIC_PAIRS,
};
use equi_core::metric::{MetricComponent, MetricHarmonics};
use equi_math::quadrature::gauss_legendre;
use equi_types::modes::{ConvolutionTable, ModeTable};
use ndarray::Array1;
use proptest::prelude::*;

const LQUAD: usize = 7;

fn filled_metric(ext: &ModeTable) -> MetricHarmonics {
    let mut metric = MetricHarmonics::zeros(ext.len(), LQUAD);
    for c in MetricComponent::ALL {
        for k in 0..ext.len() {
            for q in 0..LQUAD {
                let phase = (c.index() + 1) as f64 + 0.37 * k as f64 + 0.91 * q as f64;
                metric.even_mut(c)[[k, q]] = phase.sin();
                metric.odd_mut(c)[[k, q]] = (0.5 * phase).cos();
            }
        }
    }
    metric
}

fn permuted_metric(metric: &MetricHarmonics, perm: &[usize]) -> MetricHarmonics {
    let mut out = MetricHarmonics::zeros(metric.mne, metric.lquad);
    for c in MetricComponent::ALL {
        for k in 0..metric.mne {
            for (q_new, &q_old) in perm.iter().enumerate() {
                out.even_mut(c)[[k, q_new]] = metric.even(c)[[k, q_old]];
                out.odd_mut(c)[[k, q_new]] = metric.odd(c)[[k, q_old]];
            }
        }
    }
    out
}

fn max_deviation(a: &InteractionTensors, b: &InteractionTensors) -> f64 {
    let mut worst = 0.0f64;
    for (c, ch) in STELLARATOR_SYMMETRIC_PAIRS {
        for (x, y) in a.get(c, ch).unwrap().iter().zip(b.get(c, ch).unwrap()) {
            let scale = x.abs().max(1.0);
            worst = worst.max((x - y).abs() / scale);
        }
    }
    worst
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Accumulation order independence: any permutation of the
    /// quadrature axis reproduces the reference tensors.
    #[test]
    fn assembly_is_order_independent(
        perm in Just((0..LQUAD).collect::<Vec<usize>>()).prop_shuffle(),
        singular in any::<bool>(),
    ) {
        let modes = ModeTable::new(2, 1);
        let ext = modes.extended();
        let conv = ConvolutionTable::build(&modes, &ext).unwrap();
        let (nodes, weights) = gauss_legendre(LQUAD);
        let metric = filled_metric(&ext);

        let assembler = TensorAssembler {
            modes: &modes,
            conv: &conv,
            nvol: 1,
            nfp: 2,
            stellarator_symmetric: true,
        };
        let disc = VolumeDiscretization {
            lrad: if singular { 4 } else { 3 },
            coordinate_singularity: singular,
        };

        let reference = assembler.assemble(1, &disc, &nodes, &weights, &metric);

        let nodes_p = Array1::from_iter(perm.iter().map(|&q| nodes[q]));
        let weights_p = Array1::from_iter(perm.iter().map(|&q| weights[q]));
        let metric_p = permuted_metric(&metric, &perm);
        let shuffled = assembler.assemble(1, &disc, &nodes_p, &weights_p, &metric_p);

        let dev = max_deviation(&reference, &shuffled);
        prop_assert!(dev < 1e-11, "max relative deviation {dev}");
    }

    /// Repeated assembly from identical inputs is reproducible.
    #[test]
    fn assembly_is_idempotent_under_repetition(reps in 2usize..5) {
        let modes = ModeTable::new(1, 1);
        let ext = modes.extended();
        let conv = ConvolutionTable::build(&modes, &ext).unwrap();
        let (nodes, weights) = gauss_legendre(LQUAD);
        let metric = filled_metric(&ext);

        let assembler = TensorAssembler {
            modes: &modes,
            conv: &conv,
            nvol: 1,
            nfp: 1,
            stellarator_symmetric: true,
        };
        let disc = VolumeDiscretization {
            lrad: 2,
            coordinate_singularity: false,
        };

        let first = assembler.assemble(1, &disc, &nodes, &weights, &metric);
        for _ in 1..reps {
            let again = assembler.assemble(1, &disc, &nodes, &weights, &metric);
            prop_assert!(max_deviation(&first, &again) < 1e-12);
        }
    }
}
