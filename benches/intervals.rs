use credible::{credible_intervals, ChainSummary, Posterior};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn normal_draws(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(10.0, 5.0).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

fn bench_posterior_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("posterior_construction");

    for n in [500, 2_000, 10_000] {
        let draws = normal_draws(n, 42);
        group.bench_with_input(BenchmarkId::new("draws", n), &draws, |b, draws| {
            b.iter(|| Posterior::from_samples(draws).unwrap());
        });
    }
    group.finish();
}

fn bench_two_level_intervals(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_level_intervals");
    group.sample_size(10);

    for n in [500, 2_000] {
        let posterior = Posterior::from_samples(&normal_draws(n, 42)).unwrap();
        group.bench_with_input(BenchmarkId::new("draws", n), &posterior, |b, posterior| {
            b.iter(|| credible_intervals(posterior, &[0.95, 0.68]).unwrap());
        });
    }
    group.finish();
}

fn bench_chain_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_summary");
    group.sample_size(10);

    for dims in [1, 4] {
        let columns: Vec<Vec<f64>> = (0..dims)
            .map(|i| normal_draws(1_000, 42 + i as u64))
            .collect();
        group.bench_with_input(BenchmarkId::new("dims", dims), &columns, |b, columns| {
            b.iter(|| ChainSummary::from_columns(columns, &[0.95, 0.68]).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_posterior_construction,
    bench_two_level_intervals,
    bench_chain_summary
);
criterion_main!(benches);
