//! # dwtviz-gp
//!
//! Gaussian-process smoothing of irregularly sampled signals, producing
//! evenly spaced dyadic-length series ready for wavelet decomposition.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Observations::new(x, y)?"] --> B["fit_gps(&signals, &config)?"]
//!     B -->|"rayon pool"| C["GpRegressor::fit"]
//!     C -->|"argmin Nelder-Mead"| D["FittedGp"]
//!     D -->|"predict(linspace)"| E["SmoothedSignal"]
//! ```
//!
//! ## Default Kernel
//!
//! | Component | Constant | Length scale | Length bounds |
//! |-----------|----------|--------------|---------------|
//! | long | 1 | 1e7 | [1e6, 1e8] |
//! | medium | 1 | 1.5e6 | [1e6, 1e7] |
//! | short | 1e-4 | 1.5e4 | [1e4, 1e5] |
//!
//! Constants are bounded by [`CONSTANT_BOUNDS`]. The noise variance
//! defaults to [`DEFAULT_ALPHA`] with [`DEFAULT_RESTARTS`] optimizer
//! restarts.

mod error;
mod kernel;
mod observations;
mod optimizer;
mod regressor;
mod smooth;

pub use error::GpError;
pub use kernel::{CONSTANT_BOUNDS, Hyperparameter, Kernel, RbfComponent};
pub use observations::Observations;
pub use regressor::{DEFAULT_ALPHA, DEFAULT_RESTARTS, FittedGp, GpRegressor};
pub use smooth::{
    DEFAULT_MIN_POINTS, DEFAULT_SAMPLES, MAX_SAMPLES, SmoothConfig, SmoothedSignal, fit_gp, fit_gps, linspace,
    truncation_exponent,
};
