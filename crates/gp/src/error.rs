//! Error types for the dwtviz-gp crate.

/// Error type for all fallible operations in the dwtviz-gp crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GpError {
    /// Returned when a signal has no observations.
    #[error("observations are empty")]
    EmptyData,

    /// Returned when x and y differ in length.
    #[error("length mismatch: {x} x values but {y} y values")]
    LengthMismatch {
        /// Number of x values.
        x: usize,
        /// Number of y values.
        y: usize,
    },

    /// Returned when observations contain NaN or infinity.
    #[error("observations contain non-finite values")]
    NonFiniteData,

    /// Returned when a hyperparameter or its bounds are not positive and
    /// ordered.
    #[error("invalid bounds for {name}: value {value} not in [{lower}, {upper}]")]
    InvalidBounds {
        /// Hyperparameter name.
        name: &'static str,
        /// Initial value.
        value: f64,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// Returned when the noise level is negative or non-finite.
    #[error("invalid noise level: {0}")]
    InvalidNoise(f64),

    /// Returned when the kernel matrix has no Cholesky factor.
    #[error("kernel matrix is not positive definite")]
    NotPositiveDefinite,

    /// Returned when no optimizer run produced a finite likelihood.
    #[error("hyperparameter optimisation failed")]
    OptimizationFailed,

    /// Returned when the worker pool cannot be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// Returned when the prediction grid exponent is out of range.
    #[error("invalid sample exponent: {0} (expected 1..={max})", max = crate::smooth::MAX_SAMPLES)]
    InvalidSamples(u32),

    /// Returned when the target length is not positive and finite.
    #[error("invalid target length: {0}")]
    InvalidLength(f64),
}
