//! Engine Benchmarks
//!
//! Benchmarks for similarity scoring, compositing and resampling.
//!
//! Run with: `cargo bench --bench engine_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use imgcompare::{compose, normalize, resample, similarity, CompositeSpec, PixelBuffer, SplitAxis};

fn noise(size: u32, seed: u8) -> PixelBuffer {
    let data = (0..size * size * 4)
        .map(|i| (i as u8).wrapping_mul(37).wrapping_add(seed))
        .collect();
    PixelBuffer::new(size, size, data).unwrap()
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    for size in [64u32, 256, 1024] {
        let a = noise(size, 1);
        let b = noise(size, 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}x{size}")),
            &(a, b),
            |bench, (a, b)| {
                bench.iter(|| black_box(similarity(black_box(a), black_box(b)).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let a = noise(512, 3);
    let b = noise(512, 4);

    let specs = [
        ("overlay", CompositeSpec::overlay(0.5)),
        ("split_vertical", CompositeSpec::split(SplitAxis::Vertical)),
        ("split_horizontal", CompositeSpec::split(SplitAxis::Horizontal)),
    ];
    for (name, spec) in specs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &spec, |bench, spec| {
            bench.iter(|| black_box(compose(&a, &b, spec).unwrap()));
        });
    }

    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    let src = noise(256, 5);

    for target in [128u32, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(target), &target, |bench, &t| {
            bench.iter(|| black_box(resample(&src, t, t).unwrap()));
        });
    }

    let small = noise(200, 6);
    let large = noise(640, 7);
    group.bench_function("normalize_200_to_640", |bench| {
        bench.iter(|| black_box(normalize(&small, &large).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_compose, bench_resample);
criterion_main!(benches);
