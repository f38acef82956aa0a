//! Gaussian-process regression with a zero prior mean and additive noise.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::GpError;
use crate::kernel::Kernel;
use crate::observations::Observations;
use crate::optimizer;

/// Default noise variance added to the kernel diagonal.
pub const DEFAULT_ALPHA: f64 = 5.0;

/// Default number of optimizer restarts after the initial run.
pub const DEFAULT_RESTARTS: usize = 12;

/// Unfitted regressor: kernel template plus fitting options.
///
/// # Example
///
/// ```
/// use dwtviz_gp::{GpRegressor, Kernel, Observations, RbfComponent};
///
/// let kernel = Kernel::new(vec![RbfComponent::new(1.0, 2.0, (0.5, 10.0)).unwrap()]);
/// let obs = Observations::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 0.5, -0.5]).unwrap();
/// let gp = GpRegressor::new(kernel).with_alpha(0.1).with_n_restarts(2).fit(&obs).unwrap();
/// assert_eq!(gp.predict(&[0.5, 1.5]).len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GpRegressor {
    kernel: Kernel,
    alpha: f64,
    n_restarts: usize,
    seed: u64,
    optimize: bool,
}

impl Default for GpRegressor {
    fn default() -> Self {
        Self::new(Kernel::default_multiscale())
    }
}

impl GpRegressor {
    /// Creates a regressor with default noise, restarts, and seed 0.
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            alpha: DEFAULT_ALPHA,
            n_restarts: DEFAULT_RESTARTS,
            seed: 0,
            optimize: true,
        }
    }

    /// Sets the noise variance added to the diagonal.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the number of random restarts.
    pub fn with_n_restarts(mut self, n_restarts: usize) -> Self {
        self.n_restarts = n_restarts;
        self
    }

    /// Sets the seed of the restart sampler.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables hyperparameter optimization.
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Returns the kernel template.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Returns the noise variance.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the number of random restarts.
    pub fn n_restarts(&self) -> usize {
        self.n_restarts
    }

    /// Returns the restart seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns whether hyperparameters are optimized.
    pub fn optimize(&self) -> bool {
        self.optimize
    }

    /// Fits the regressor, maximizing the log marginal likelihood over the
    /// kernel hyperparameters unless optimization is disabled.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GpError::InvalidNoise`] | `alpha` negative or non-finite |
    /// | [`GpError::OptimizationFailed`] | no start reached a finite likelihood |
    /// | [`GpError::NotPositiveDefinite`] | final kernel matrix not factorizable |
    pub fn fit(&self, obs: &Observations) -> Result<FittedGp, GpError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(GpError::InvalidNoise(self.alpha));
        }
        let kernel = if self.optimize && self.kernel.n_params() > 0 {
            optimizer::optimize_kernel(
                &self.kernel,
                obs,
                self.alpha,
                self.n_restarts,
                self.seed,
            )?
        } else {
            self.kernel.clone()
        };

        let (weights, lml) = posterior(&kernel, obs.x(), obs.y(), self.alpha)?;
        debug!(n = obs.len(), lml, "gaussian process fitted");
        Ok(FittedGp {
            kernel,
            x_train: obs.x().to_vec(),
            weights,
            log_marginal_likelihood: lml,
        })
    }
}

/// A fitted Gaussian process.
#[derive(Clone, Debug)]
pub struct FittedGp {
    kernel: Kernel,
    x_train: Vec<f64>,
    weights: DVector<f64>,
    log_marginal_likelihood: f64,
}

impl FittedGp {
    /// Returns the kernel with fitted hyperparameters.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Returns the log marginal likelihood of the training data.
    pub fn log_marginal_likelihood(&self) -> f64 {
        self.log_marginal_likelihood
    }

    /// Posterior mean at each point of `x`.
    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        let k_star = self.kernel.cross(x, &self.x_train);
        (k_star * &self.weights).iter().copied().collect()
    }
}

/// Solves `(K + alpha I) w = y` and returns `w` with the log marginal
/// likelihood.
pub(crate) fn posterior(
    kernel: &Kernel,
    x: &[f64],
    y: &[f64],
    alpha: f64,
) -> Result<(DVector<f64>, f64), GpError> {
    let n = x.len();
    let k: DMatrix<f64> = kernel.gram(x) + DMatrix::identity(n, n) * alpha;
    let chol = k.cholesky().ok_or(GpError::NotPositiveDefinite)?;
    let y = DVector::from_column_slice(y);
    let weights = chol.solve(&y);

    let log_det_half: f64 = chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum();
    let lml = -0.5 * y.dot(&weights) - log_det_half - 0.5 * n as f64 * (2.0 * PI).ln();
    Ok((weights, lml))
}
