use criterion::{criterion_group, criterion_main, Criterion};
use equi_core::assembly::{TensorAssembler, VolumeDiscretization};
use equi_core::metric::{MetricComponent, MetricHarmonics};
use equi_math::quadrature::gauss_legendre;
use equi_types::modes::{ConvolutionTable, ModeTable};
use std::hint::black_box;

fn bench_assembly(c: &mut Criterion) {
    let modes = ModeTable::new(4, 3);
    let ext = modes.extended();
    let conv = ConvolutionTable::build(&modes, &ext).unwrap();
    let lquad = 8;
    let (nodes, weights) = gauss_legendre(lquad);

    let mut metric = MetricHarmonics::zeros(ext.len(), lquad);
    for comp in MetricComponent::ALL {
        for k in 0..ext.len() {
            for q in 0..lquad {
                metric.even_mut(comp)[[k, q]] = ((k + q) as f64 * 0.1).sin();
            }
        }
    }

    let assembler = TensorAssembler {
        modes: &modes,
        conv: &conv,
        nvol: 2,
        nfp: 3,
        stellarator_symmetric: true,
    };

    let mut group = c.benchmark_group("tensor_assembly");
    group.sample_size(20);

    group.bench_function("regular_lrad8_mpol4_ntor3", |b| {
        let disc = VolumeDiscretization {
            lrad: 8,
            coordinate_singularity: false,
        };
        b.iter(|| black_box(assembler.assemble(2, &disc, &nodes, &weights, &metric)))
    });

    group.bench_function("singular_lrad8_mpol4_ntor3", |b| {
        let disc = VolumeDiscretization {
            lrad: 8,
            coordinate_singularity: true,
        };
        b.iter(|| black_box(assembler.assemble(1, &disc, &nodes, &weights, &metric)))
    });

    group.finish();
}

criterion_group!(benches, bench_assembly);
criterion_main!(benches);
