//! Benchmarks for the CPU physics step.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use logofield::integrator::{step, ForceParams};
use logofield::{ParticleStore, Sample, Vec2};

/// A grid of particles roughly the size of a sampled logo.
fn grid(count: usize) -> ParticleStore {
    let side = (count as f32).sqrt().ceil() as usize;
    let samples: Vec<Sample> = (0..count)
        .map(|i| {
            let x = (i % side) as f32 * 7.0;
            let y = (i / side) as f32 * 2.0;
            Sample::new(x, y, 1.0, 1.0, 1.0, 1.0)
        })
        .collect();
    ParticleStore::from_samples(&samples).expect("non-empty grid")
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrator_step");
    let params = ForceParams::default();

    for count in [1_000usize, 7_000, 15_000] {
        group.bench_with_input(BenchmarkId::new("pointer_inside", count), &count, |b, &count| {
            let mut store = grid(count);
            let pointer = Vec2::new(100.0, 50.0);
            b.iter(|| step(black_box(&mut store), black_box(pointer), &params))
        });

        group.bench_with_input(BenchmarkId::new("pointer_far", count), &count, |b, &count| {
            let mut store = grid(count);
            let pointer = Vec2::new(1e6, 1e6);
            b.iter(|| step(black_box(&mut store), black_box(pointer), &params))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
