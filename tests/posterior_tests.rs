use credible::{Error, Posterior};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn normal_draws(n: usize, mean: f64, sd: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(mean, sd).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

#[test]
fn summary_statistics_of_normal_draws() {
    let draws = normal_draws(10_000, 10.0, 5.0, 20_180_131);
    let posterior = Posterior::from_samples(&draws).unwrap();

    // Sample statistics, not density-estimate moments.
    assert!(
        (posterior.mean() - 10.0).abs() < 0.25,
        "mean = {}",
        posterior.mean()
    );
    assert!(
        (posterior.std_dev() - 5.0).abs() < 0.25,
        "std = {}",
        posterior.std_dev()
    );
    // The KDE mode of a unimodal symmetric sample tracks its center.
    assert!(
        (posterior.mode() - 10.0).abs() < 1.0,
        "mode = {}",
        posterior.mode()
    );
    assert!(posterior.peak_density() > 0.0);
}

#[test]
fn evaluation_domain_extends_half_the_sample_range() {
    let draws = normal_draws(5_000, 0.0, 1.0, 7);
    let posterior = Posterior::from_samples(&draws).unwrap();

    let min = draws.iter().copied().fold(f64::INFINITY, f64::min);
    let max = draws.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let extra = 0.5 * (max - min);

    let (lo, hi) = posterior.support();
    assert!((lo - (min - extra)).abs() < 1e-12);
    assert!((hi - (max + extra)).abs() < 1e-12);
}

#[test]
fn density_evaluation_is_pure_and_repeatable() {
    let draws = normal_draws(2_000, 3.0, 1.5, 11);
    let posterior = Posterior::from_samples(&draws).unwrap();

    let first: Vec<f64> = (0..50).map(|i| posterior.density(f64::from(i) * 0.2)).collect();
    let second: Vec<f64> = (0..50).map(|i| posterior.density(f64::from(i) * 0.2)).collect();
    assert_eq!(first, second);
    assert!(first.iter().all(|d| d.is_finite() && *d >= 0.0));
}

#[test]
fn zero_variance_draws_fail_construction() {
    let draws = vec![1.0; 100];
    assert!(matches!(
        Posterior::from_samples(&draws),
        Err(Error::DegenerateDensity(_))
    ));
}
