//! Smoothing integration tests for dwtviz-gp.

use dwtviz_gp::{GpRegressor, Kernel, Observations, RbfComponent, SmoothConfig, fit_gps};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Irregularly sampled sine with Gaussian noise.
fn noisy_signal(n: usize, span: f64, seed: u64) -> Observations {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.05).unwrap();
    let mut x: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..span)).collect();
    x.sort_by(f64::total_cmp);
    let y = x
        .iter()
        .map(|v| (v / span * std::f64::consts::TAU).sin() + noise.sample(&mut rng))
        .collect();
    Observations::new(x, y).unwrap()
}

fn config() -> SmoothConfig {
    let kernel = Kernel::new(vec![
        RbfComponent::new(1.0, 20.0, (5.0, 200.0)).unwrap(),
        RbfComponent::new(0.01, 5.0, (1.0, 50.0)).unwrap(),
    ]);
    SmoothConfig::new()
        .with_samples(6)
        .with_regressor(
            GpRegressor::new(kernel)
                .with_alpha(0.0025)
                .with_n_restarts(2)
                .with_seed(1),
        )
        .with_threads(2)
}

#[test]
fn smoothed_curve_tracks_the_signal() {
    let obs = noisy_signal(60, 100.0, 7);
    let out = fit_gps(&[obs], &config().with_length(100.0)).unwrap();
    let s = &out[0];
    assert_eq!(s.len(), 64);

    let max_err = s
        .x()
        .iter()
        .zip(s.y())
        .filter(|(x, _)| **x > 5.0 && **x < 95.0)
        .map(|(x, y)| (y - (x / 100.0 * std::f64::consts::TAU).sin()).abs())
        .fold(0.0_f64, f64::max);
    assert!(max_err < 0.3, "max error {max_err}");
}

#[test]
fn shorter_signals_are_truncated_to_their_span() {
    let long = noisy_signal(50, 100.0, 1);
    let short = noisy_signal(30, 20.0, 2);
    let out = fit_gps(&[long, short], &config().with_truncate(true).with_length(100.0)).unwrap();

    assert_eq!(out[0].exponent(), 0);
    assert_eq!(out[0].len(), 64);
    // span < 20 of 100 -> at least i = 2
    assert!(out[1].exponent() >= 2);
    assert_eq!(out[1].len(), 64 >> out[1].exponent());
    let cutoff = 100.0 / f64::from(1u32 << out[1].exponent());
    assert!(out[1].observations().unwrap().x().iter().all(|&x| x <= cutoff));
    assert!(out[1].x().last().unwrap() <= &cutoff);
}

#[test]
fn parallel_batch_matches_sequential_fits() {
    let signals: Vec<Observations> = (0..4).map(|i| noisy_signal(25, 50.0, 100 + i)).collect();
    let parallel = fit_gps(&signals, &config().with_threads(3)).unwrap();
    let sequential = fit_gps(&signals, &config().with_threads(1)).unwrap();
    assert_eq!(parallel, sequential);
}
