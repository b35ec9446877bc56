//! Benchmarks for key chain generation and the evaluators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keymix::params::{KeyParams, DEFAULT_P, DEFAULT_Q, DEFAULT_SEED};
use keymix::{mixer, stats};

/// Benchmarks one scramble, generate and mutate step.
fn bench_mixer(c: &mut Criterion) {
    c.bench_function("mixer_step", |b| {
        let mut seed = DEFAULT_SEED;
        b.iter(|| {
            let key = mixer::generate(mixer::scramble(black_box(seed), DEFAULT_P), DEFAULT_Q);
            seed = mixer::mutate(seed, DEFAULT_Q);
            key
        });
    });
}

/// Benchmarks `generate_batch` across batch sizes.
fn bench_generate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_batch");
    for n in [100u32, 1000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| keymix::generate_batch(DEFAULT_P, DEFAULT_Q, black_box(DEFAULT_SEED), n));
        });
    }
    group.finish();
}

/// Benchmarks the evaluators on a 10k key batch.
fn bench_evaluators(c: &mut Criterion) {
    let keys = KeyParams::default().batch(DEFAULT_SEED, 10_000);
    let neighbour = KeyParams::default().batch(DEFAULT_SEED + 1, 10_000);

    let mut group = c.benchmark_group("evaluators");
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("bit_distribution", |b| {
        b.iter(|| stats::bit_distribution(black_box(&keys), stats::DEFAULT_BIAS_THRESHOLD_PCT))
    });
    group.bench_function("collisions", |b| {
        b.iter(|| stats::collisions(black_box(&keys)))
    });
    group.bench_function("cross_seed_divergence", |b| {
        b.iter(|| stats::cross_seed_divergence(black_box(&keys), black_box(&neighbour)))
    });
    group.finish();
}

criterion_group!(benches, bench_mixer, bench_generate_batch, bench_evaluators);
criterion_main!(benches);
