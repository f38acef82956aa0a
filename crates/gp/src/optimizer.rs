//! Nelder-Mead search over log-space kernel hyperparameters.
//!
//! Minimizes the negative log marginal likelihood from the kernel's
//! initial hyperparameters and from `n_restarts` further starts drawn
//! log-uniformly within the bounds. The best run wins.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::GpError;
use crate::kernel::Kernel;
use crate::observations::Observations;
use crate::regressor::posterior;

const MAX_ITERS: u64 = 500;
const SD_TOLERANCE: f64 = 1e-6;
/// Initial simplex edge, as a fraction of each log-bound width.
const SIMPLEX_STEP: f64 = 0.1;

/// Returns `kernel` with the hyperparameters that maximize the log
/// marginal likelihood of `obs`.
pub(crate) fn optimize_kernel(
    kernel: &Kernel,
    obs: &Observations,
    alpha: f64,
    n_restarts: usize,
    seed: u64,
) -> Result<Kernel, GpError> {
    let bounds = kernel.log_bounds();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut starts = Vec::with_capacity(n_restarts + 1);
    starts.push(kernel.theta());
    for _ in 0..n_restarts {
        starts.push(
            bounds
                .iter()
                .map(|&(lo, hi)| rng.random_range(lo..=hi))
                .collect::<Vec<f64>>(),
        );
    }

    let mut best: Option<(f64, Vec<f64>)> = None;
    for (run, start) in starts.into_iter().enumerate() {
        let Some((cost, theta)) = minimize(kernel, obs, alpha, &bounds, start) else {
            debug!(run, "optimizer run failed");
            continue;
        };
        debug!(run, cost, "optimizer run finished");
        if best.as_ref().is_none_or(|(c, _)| cost < *c) {
            best = Some((cost, theta));
        }
    }

    let (cost, theta) = best.ok_or(GpError::OptimizationFailed)?;
    info!(neg_lml = cost, "kernel hyperparameters optimised");
    Ok(kernel.with_theta(&theta))
}

/// One Nelder-Mead run; `None` when the solver fails or never leaves the
/// penalty region.
fn minimize(
    kernel: &Kernel,
    obs: &Observations,
    alpha: f64,
    bounds: &[(f64, f64)],
    start: Vec<f64>,
) -> Option<(f64, Vec<f64>)> {
    let simplex = initial_simplex(start, bounds);
    let cost = LmlCost {
        kernel,
        x: obs.x(),
        y: obs.y(),
        alpha,
        bounds,
    };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(SD_TOLERANCE)
        .ok()?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .ok()?;

    let state = result.state();
    let theta = state.best_param.clone()?;
    let best_cost = state.best_cost;
    (best_cost.is_finite() && best_cost < f64::MAX).then_some((best_cost, theta))
}

/// Start vertex plus one vertex per dimension, stepped inward from the
/// nearest bound.
fn initial_simplex(start: Vec<f64>, bounds: &[(f64, f64)]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(start.len() + 1);
    for (i, &(lo, hi)) in bounds.iter().enumerate() {
        let step = SIMPLEX_STEP * (hi - lo);
        let mut vertex = start.clone();
        vertex[i] = if start[i] + step <= hi {
            start[i] + step
        } else {
            start[i] - step
        };
        simplex.push(vertex);
    }
    simplex.insert(0, start);
    simplex
}

/// Cost function for argmin: negative log marginal likelihood.
struct LmlCost<'a> {
    kernel: &'a Kernel,
    x: &'a [f64],
    y: &'a [f64],
    alpha: f64,
    bounds: &'a [(f64, f64)],
}

impl CostFunction for LmlCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let inside = theta
            .iter()
            .zip(self.bounds)
            .all(|(t, &(lo, hi))| *t >= lo && *t <= hi);
        if !inside {
            return Ok(f64::MAX);
        }
        match posterior(&self.kernel.with_theta(theta), self.x, self.y, self.alpha) {
            Ok((_, lml)) if lml.is_finite() => Ok(-lml),
            _ => Ok(f64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::RbfComponent;
    use rand_distr::{Distribution, Normal};

    fn noisy_sine(n: usize, seed: u64) -> Observations {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 0.1).unwrap();
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.25).collect();
        let y = x.iter().map(|v| v.sin() + noise.sample(&mut rng)).collect();
        Observations::new(x, y).unwrap()
    }

    fn kernel() -> Kernel {
        Kernel::new(vec![RbfComponent::new(1.0, 5.0, (0.1, 20.0)).unwrap()])
    }

    #[test]
    fn simplex_stays_inside_bounds() {
        let bounds = [(0.0, 1.0), (-2.0, 2.0)];
        let simplex = initial_simplex(vec![0.95, 0.0], &bounds);
        assert_eq!(simplex.len(), 3);
        assert_eq!(simplex[0], vec![0.95, 0.0]);
        assert!((simplex[1][0] - 0.85).abs() < 1e-12);
        assert!((simplex[2][1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn out_of_bounds_is_penalized() {
        let obs = noisy_sine(10, 1);
        let k = kernel();
        let bounds = k.log_bounds();
        let cost = LmlCost {
            kernel: &k,
            x: obs.x(),
            y: obs.y(),
            alpha: 0.01,
            bounds: &bounds,
        };
        assert_eq!(cost.cost(&vec![0.0, 10.0]).unwrap(), f64::MAX);
        assert!(cost.cost(&k.theta()).unwrap() < f64::MAX);
    }

    #[test]
    fn optimised_kernel_is_within_bounds() {
        let obs = noisy_sine(40, 3);
        let k = kernel();
        let tuned = optimize_kernel(&k, &obs, 0.01, 4, 11).unwrap();
        for (t, (lo, hi)) in tuned.theta().iter().zip(k.log_bounds()) {
            assert!(*t >= lo - 1e-12 && *t <= hi + 1e-12);
        }
    }

    #[test]
    fn optimisation_improves_on_a_poor_start() {
        let obs = noisy_sine(40, 5);
        let k = kernel();
        let start = -posterior(&k, obs.x(), obs.y(), 0.01).unwrap().1;
        let tuned = optimize_kernel(&k, &obs, 0.01, 0, 0).unwrap();
        let end = -posterior(&tuned, obs.x(), obs.y(), 0.01).unwrap().1;
        assert!(end < start);
    }

    #[test]
    fn same_seed_same_result() {
        let obs = noisy_sine(30, 9);
        let a = optimize_kernel(&kernel(), &obs, 0.01, 3, 42).unwrap();
        let b = optimize_kernel(&kernel(), &obs, 0.01, 3, 42).unwrap();
        assert_eq!(a, b);
    }
}
