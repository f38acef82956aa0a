//! Multi-level discrete wavelet transform (DWT).

use tracing::debug;

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::series::TimeSeries;

/// Computes the maximum useful DWT decomposition level for a given series
/// length and filter.
///
/// `J = floor(log2(N / (L - 1)))` with integer division, where `L` is the
/// filter length. Returns 0 when the series is shorter than `L - 1`.
///
/// # Example
///
/// ```
/// use dwtviz_wavelet::{WaveletFilter, dwt_max_level};
///
/// assert_eq!(dwt_max_level(8, &WaveletFilter::Haar), 3);
/// assert_eq!(dwt_max_level(256, &WaveletFilter::Db4), 5);
/// ```
pub fn dwt_max_level(n: usize, filter: &WaveletFilter) -> usize {
    let l = filter.length();
    if l < 2 || n < l - 1 {
        return 0;
    }
    (n / (l - 1)).ilog2() as usize
}

/// Configuration for a DWT decomposition.
///
/// When no level is set the transform runs to [`dwt_max_level`].
///
/// # Example
///
/// ```
/// use dwtviz_wavelet::{DwtConfig, WaveletFilter};
///
/// let config = DwtConfig::new(WaveletFilter::Db2).with_level(3);
/// assert_eq!(config.level(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DwtConfig {
    filter: WaveletFilter,
    level: Option<usize>,
}

impl DwtConfig {
    /// Creates a new configuration running to the maximum level.
    pub fn new(filter: WaveletFilter) -> Self {
        Self {
            filter,
            level: None,
        }
    }

    /// Sets the decomposition level explicitly.
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Returns the wavelet filter.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Returns the explicit level, if set.
    pub fn level(&self) -> Option<usize> {
        self.level
    }
}

/// DWT decomposition coefficients.
///
/// Details are stored coarsest first, so `details()[0]` is the band of
/// the deepest level and the last entry is level 1.
#[derive(Clone, Debug)]
pub struct DwtCoeffs {
    approx: Vec<f64>,
    details: Vec<Vec<f64>>,
    filter: WaveletFilter,
}

impl DwtCoeffs {
    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the approximation coefficients of the deepest level.
    pub fn approx(&self) -> &[f64] {
        &self.approx
    }

    /// Returns all detail bands, coarsest first.
    pub fn details(&self) -> &[Vec<f64>] {
        &self.details
    }

    /// Returns the detail band of filter level `level` (1 = finest).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        if level == 0 || level > self.details.len() {
            return None;
        }
        self.details
            .get(self.details.len() - level)
            .map(|v| v.as_slice())
    }

    /// Returns the wavelet filter used.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Flattens the bands into `[approx?, detail_J, ..., detail_1]`.
    pub fn into_levels(self, include_approx: bool) -> Vec<Vec<f64>> {
        let mut levels = Vec::with_capacity(self.details.len() + 1);
        if include_approx {
            levels.push(self.approx);
        }
        levels.extend(self.details);
        levels
    }
}

/// Computes the multi-level DWT of a series.
///
/// Uses half-sample symmetric boundary extension, so each step maps a
/// band of length `n` onto `floor((n + L - 1) / 2)` coefficients.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::LevelTooHigh`] | requested level exceeds [`dwt_max_level`] |
pub fn wavedec(series: &TimeSeries, config: &DwtConfig) -> Result<DwtCoeffs, WaveletError> {
    let n = series.len();
    let filter = config.filter();
    let max_level = dwt_max_level(n, &filter);
    let level = config.level().unwrap_or(max_level);
    if level > max_level {
        return Err(WaveletError::LevelTooHigh {
            requested: level,
            max: max_level,
            len: n,
        });
    }

    let lo = filter.dec_lo();
    let hi = filter.dec_hi();

    let mut approx = series.as_slice().to_vec();
    let mut details = Vec::with_capacity(level);
    for j in 1..=level {
        let (a, d) = dwt_step(&approx, &lo, &hi);
        debug!(level = j, len = d.len(), "dwt level computed");
        details.push(d);
        approx = a;
    }
    details.reverse();

    Ok(DwtCoeffs {
        approx,
        details,
        filter,
    })
}

/// Single analysis step: convolve with both filters and keep odd samples.
fn dwt_step(x: &[f64], lo: &[f64], hi: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len();
    let f = lo.len();
    let out_len = (n + f - 1) / 2;
    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);
    for o in 0..out_len {
        let i = (2 * o + 1) as isize;
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..f {
            let v = x[symmetric_index(i - j as isize, n)];
            a += lo[j] * v;
            d += hi[j] * v;
        }
        approx.push(a);
        detail.push(d);
    }
    (approx, detail)
}

/// Maps an out-of-range index back into `[0, n)` by half-sample reflection
/// (`x[-1] = x[0]`, `x[n] = x[n - 1]`), repeating for long filters.
fn symmetric_index(idx: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = idx.rem_euclid(period) as usize;
    if m < n { m } else { 2 * n - 1 - m }
}
