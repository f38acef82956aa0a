//! Batch smoothing: fit one GP per signal and resample it on a dyadic grid.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::GpError;
use crate::observations::Observations;
use crate::regressor::GpRegressor;

/// Default prediction grid exponent: `2^8` points.
pub const DEFAULT_SAMPLES: u32 = 8;

/// Largest accepted prediction grid exponent.
pub const MAX_SAMPLES: u32 = 20;

/// Default floor on the grid points kept by truncation.
pub const DEFAULT_MIN_POINTS: usize = 2;

/// Options for [`fit_gps`].
///
/// # Example
///
/// ```
/// use dwtviz_gp::SmoothConfig;
///
/// let config = SmoothConfig::new().with_samples(6).with_truncate(true);
/// assert_eq!(config.n_points(), 64);
/// assert_eq!(config.length(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothConfig {
    length: Option<f64>,
    samples: u32,
    truncate: bool,
    min_points: usize,
    regressor: GpRegressor,
    threads: Option<usize>,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            length: None,
            samples: DEFAULT_SAMPLES,
            truncate: false,
            min_points: DEFAULT_MIN_POINTS,
            regressor: GpRegressor::default(),
            threads: None,
        }
    }
}

impl SmoothConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target length; by default the largest coordinate of all
    /// signals.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the target length, `None` meaning the default.
    pub fn with_length_opt(mut self, length: Option<f64>) -> Self {
        self.length = length;
        self
    }

    /// Sets the prediction grid exponent.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Enables truncation of the prediction grid to the signal span.
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Sets the fewest grid points truncation may leave. The exponent stops
    /// growing before the kept grid drops below this count.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Sets the regressor template.
    pub fn with_regressor(mut self, regressor: GpRegressor) -> Self {
        self.regressor = regressor;
        self
    }

    /// Sets the worker count; by default one less than the available
    /// parallelism, at least 1.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Returns the explicit target length.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Returns the grid exponent.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Returns the number of prediction points, `2^samples`, with the
    /// exponent capped at [`MAX_SAMPLES`].
    pub fn n_points(&self) -> usize {
        1usize << self.samples.min(MAX_SAMPLES)
    }

    /// Returns whether truncation is enabled.
    pub fn truncate(&self) -> bool {
        self.truncate
    }

    /// Returns the floor on grid points kept by truncation.
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Largest truncation exponent that keeps at least
    /// [`min_points`](Self::min_points) of the grid, at most `samples`.
    pub fn max_exponent(&self) -> u32 {
        let n = self.n_points();
        let samples = self.samples.min(MAX_SAMPLES);
        (0..=samples)
            .take_while(|&i| i == 0 || n >> i >= self.min_points)
            .last()
            .unwrap_or(0)
    }

    /// Returns the regressor template.
    pub fn regressor(&self) -> &GpRegressor {
        &self.regressor
    }

    /// Returns the resolved worker count.
    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(default_threads).max(1)
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// A GP-smoothed signal with the raw observations it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothedSignal {
    x: Vec<f64>,
    y: Vec<f64>,
    observations: Option<Observations>,
    exponent: u32,
}

impl SmoothedSignal {
    /// Grid coordinates, starting at 0.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Posterior mean at each grid coordinate.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Raw observations within the kept grid range; `None` when none fall
    /// inside it.
    pub fn observations(&self) -> Option<&Observations> {
        self.observations.as_ref()
    }

    /// Truncation exponent `i`: the grid was cut to `1 / 2^i` of its length.
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Fits every signal in parallel, keeping input order.
///
/// The first failing fit fails the batch.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GpError::EmptyData`] | `signals` is empty |
/// | [`GpError::InvalidSamples`] | exponent outside `1..=MAX_SAMPLES` |
/// | [`GpError::InvalidLength`] | target length not positive and finite |
/// | [`GpError::ThreadPool`] | the worker pool cannot be built |
/// | any [`GpRegressor::fit`] error | a fit failed |
pub fn fit_gps(
    signals: &[Observations],
    config: &SmoothConfig,
) -> Result<Vec<SmoothedSignal>, GpError> {
    if signals.is_empty() {
        return Err(GpError::EmptyData);
    }
    let length = config.length().unwrap_or_else(|| {
        signals
            .iter()
            .map(Observations::max_x)
            .fold(f64::NEG_INFINITY, f64::max)
    });
    validate(config.samples(), length)?;

    let threads = config.threads();
    info!(
        n_signals = signals.len(),
        threads,
        length,
        points = config.n_points(),
        "fitting gaussian processes"
    );
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| GpError::ThreadPool(e.to_string()))?;
    pool.install(|| {
        signals
            .par_iter()
            .map(|obs| fit_gp(obs, length, config))
            .collect()
    })
}

/// Fits one signal and predicts on `linspace(0, length, 2^samples)`,
/// truncated when the configuration asks for it.
///
/// # Errors
///
/// See [`fit_gps`].
pub fn fit_gp(
    obs: &Observations,
    length: f64,
    config: &SmoothConfig,
) -> Result<SmoothedSignal, GpError> {
    validate(config.samples(), length)?;

    let fitted = config.regressor().fit(obs)?;
    let exponent = if config.truncate() {
        truncation_exponent(obs.span() / length, config.max_exponent())
    } else {
        0
    };

    let n = config.n_points();
    let end = n >> exponent;
    let x: Vec<f64> = linspace(0.0, length, n).into_iter().take(end).collect();
    let y = fitted.predict(&x);
    let cutoff = length / f64::from(1u32 << exponent);
    let observations = obs.truncated(cutoff);

    debug!(exponent, points = x.len(), cutoff, "signal smoothed");
    Ok(SmoothedSignal {
        x,
        y,
        observations,
        exponent,
    })
}

fn validate(samples: u32, length: f64) -> Result<(), GpError> {
    if samples == 0 || samples > MAX_SAMPLES {
        return Err(GpError::InvalidSamples(samples));
    }
    if !length.is_finite() || length <= 0.0 {
        return Err(GpError::InvalidLength(length));
    }
    Ok(())
}

/// Largest `i <= max_exponent` such that `1 / 2^i` of the grid still
/// covers a span of `prop` of the target length: `floor(log2(1 / prop))`.
pub fn truncation_exponent(prop: f64, max_exponent: u32) -> u32 {
    if prop.is_nan() || prop <= 0.0 {
        return max_exponent;
    }
    let i = (1.0 / prop).log2().floor();
    if i <= 0.0 {
        0
    } else {
        (i as u32).min(max_exponent)
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}
