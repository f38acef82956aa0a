//! Sum-of-RBF covariance kernels with bounded hyperparameters.
//!
//! Hyperparameters are optimized in log space: [`Kernel::theta`] returns
//! `ln` of every constant and length scale, component by component.

use nalgebra::DMatrix;

use crate::error::GpError;

/// A positive hyperparameter with its search bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hyperparameter {
    value: f64,
    lower: f64,
    upper: f64,
}

impl Hyperparameter {
    /// Creates a bounded hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns [`GpError::InvalidBounds`] unless `0 < lower <= value <= upper`
    /// and all three are finite.
    pub fn new(name: &'static str, value: f64, (lower, upper): (f64, f64)) -> Result<Self, GpError> {
        let ok = [value, lower, upper].iter().all(|v| v.is_finite())
            && lower > 0.0
            && lower <= value
            && value <= upper;
        if !ok {
            return Err(GpError::InvalidBounds {
                name,
                value,
                lower,
                upper,
            });
        }
        Ok(Self {
            value,
            lower,
            upper,
        })
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// `(lower, upper)` bounds.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    fn with_log_value(self, log_value: f64) -> Self {
        Self {
            value: log_value.exp(),
            ..self
        }
    }
}

/// Default bounds of a constant (amplitude) hyperparameter.
pub const CONSTANT_BOUNDS: (f64, f64) = (1e-5, 1e5);

/// One `c * exp(-d^2 / (2 l^2))` term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RbfComponent {
    constant: Hyperparameter,
    length_scale: Hyperparameter,
}

impl RbfComponent {
    /// Creates a component with the default constant bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GpError::InvalidBounds`] for inconsistent values or bounds.
    pub fn new(constant: f64, length_scale: f64, length_bounds: (f64, f64)) -> Result<Self, GpError> {
        Ok(Self {
            constant: Hyperparameter::new("constant", constant, CONSTANT_BOUNDS)?,
            length_scale: Hyperparameter::new("length_scale", length_scale, length_bounds)?,
        })
    }

    /// Creates a component from two fully specified hyperparameters.
    pub fn from_parts(constant: Hyperparameter, length_scale: Hyperparameter) -> Self {
        Self {
            constant,
            length_scale,
        }
    }

    /// Returns the amplitude.
    pub fn constant(&self) -> Hyperparameter {
        self.constant
    }

    /// Returns the length scale.
    pub fn length_scale(&self) -> Hyperparameter {
        self.length_scale
    }

    fn eval(&self, a: f64, b: f64) -> f64 {
        let l = self.length_scale.value;
        let d = a - b;
        self.constant.value * (-0.5 * d * d / (l * l)).exp()
    }
}

/// Sum of RBF components.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    components: Vec<RbfComponent>,
}

impl Kernel {
    /// Creates a kernel from its components.
    pub fn new(components: Vec<RbfComponent>) -> Self {
        Self { components }
    }

    /// Three-scale kernel for signals sampled in seconds:
    /// `C(1)*RBF(1e7) + C(1)*RBF(1.5e6) + C(1e-4)*RBF(1.5e4)`.
    pub fn default_multiscale() -> Self {
        let component = |c: f64, l: f64, lower: f64, upper: f64| {
            RbfComponent::from_parts(
                Hyperparameter {
                    value: c,
                    lower: CONSTANT_BOUNDS.0,
                    upper: CONSTANT_BOUNDS.1,
                },
                Hyperparameter {
                    value: l,
                    lower,
                    upper,
                },
            )
        };
        Self::new(vec![
            component(1.0, 1e7, 1e6, 1e8),
            component(1.0, 1.5e6, 1e6, 1e7),
            component(1e-4, 1.5e4, 1e4, 1e5),
        ])
    }

    /// Returns the components.
    pub fn components(&self) -> &[RbfComponent] {
        &self.components
    }

    /// Returns the number of free hyperparameters.
    pub fn n_params(&self) -> usize {
        2 * self.components.len()
    }

    /// Returns the log-space hyperparameter vector.
    pub fn theta(&self) -> Vec<f64> {
        self.components
            .iter()
            .flat_map(|c| [c.constant.value.ln(), c.length_scale.value.ln()])
            .collect()
    }

    /// Returns the log-space bounds, aligned with [`Kernel::theta`].
    pub fn log_bounds(&self) -> Vec<(f64, f64)> {
        self.components
            .iter()
            .flat_map(|c| [c.constant, c.length_scale])
            .map(|h| (h.lower.ln(), h.upper.ln()))
            .collect()
    }

    /// Returns a copy with the hyperparameters set from a log-space vector.
    pub fn with_theta(&self, theta: &[f64]) -> Self {
        let components = self
            .components
            .iter()
            .zip(theta.chunks_exact(2))
            .map(|(c, t)| RbfComponent {
                constant: c.constant.with_log_value(t[0]),
                length_scale: c.length_scale.with_log_value(t[1]),
            })
            .collect();
        Self { components }
    }

    /// Evaluates `k(a, b)`.
    pub fn eval(&self, a: f64, b: f64) -> f64 {
        self.components.iter().map(|c| c.eval(a, b)).sum()
    }

    /// Gram matrix `K[i, j] = k(x_i, x_j)`.
    pub fn gram(&self, x: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(x.len(), x.len(), |i, j| self.eval(x[i], x[j]))
    }

    /// Cross-covariance `K[i, j] = k(a_i, b_j)`.
    pub fn cross(&self, a: &[f64], b: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(a.len(), b.len(), |i, j| self.eval(a[i], b[j]))
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::default_multiscale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hyperparameter_validation() {
        assert!(Hyperparameter::new("c", 1.0, (0.1, 10.0)).is_ok());
        assert!(Hyperparameter::new("c", 100.0, (0.1, 10.0)).is_err());
        assert!(Hyperparameter::new("c", 1.0, (0.0, 10.0)).is_err());
        assert!(matches!(
            Hyperparameter::new("c", 1.0, (5.0, 2.0)),
            Err(GpError::InvalidBounds { name: "c", .. })
        ));
    }

    #[test]
    fn default_kernel_layout() {
        let k = Kernel::default_multiscale();
        assert_eq!(k.components().len(), 3);
        assert_eq!(k.n_params(), 6);
        let theta = k.theta();
        assert_relative_eq!(theta[0], 0.0);
        assert_relative_eq!(theta[1], 1e7_f64.ln());
        assert_relative_eq!(theta[4], 1e-4_f64.ln());
        let bounds = k.log_bounds();
        assert_relative_eq!(bounds[0].0, 1e-5_f64.ln());
        assert_relative_eq!(bounds[5].1, 1e5_f64.ln());
    }

    #[test]
    fn theta_round_trips() {
        let k = Kernel::default_multiscale();
        let moved: Vec<f64> = k.theta().iter().map(|t| t + 0.25).collect();
        let k2 = k.with_theta(&moved);
        for (a, b) in k2.theta().iter().zip(&moved) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        // bounds are unaffected
        assert_eq!(k2.log_bounds(), k.log_bounds());
    }

    #[test]
    fn eval_sums_components() {
        let k = Kernel::new(vec![
            RbfComponent::new(2.0, 1.0, (0.1, 10.0)).unwrap(),
            RbfComponent::new(0.5, 3.0, (0.1, 10.0)).unwrap(),
        ]);
        assert_relative_eq!(k.eval(1.0, 1.0), 2.5);
        let expected = 2.0 * (-0.5_f64 * 4.0).exp() + 0.5 * (-0.5_f64 * 4.0 / 9.0).exp();
        assert_relative_eq!(k.eval(0.0, 2.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn gram_is_symmetric() {
        let k = Kernel::new(vec![RbfComponent::new(1.0, 2.0, (0.1, 10.0)).unwrap()]);
        let x = [0.0, 0.7, 3.1, 4.0];
        let g = k.gram(&x);
        assert_eq!(g.nrows(), 4);
        for i in 0..4 {
            assert_relative_eq!(g[(i, i)], 1.0);
            for j in 0..4 {
                assert_relative_eq!(g[(i, j)], g[(j, i)]);
            }
        }
        let c = k.cross(&[0.0, 1.0], &x);
        assert_eq!((c.nrows(), c.ncols()), (2, 4));
        assert_relative_eq!(c[(0, 1)], g[(0, 1)]);
    }
}
