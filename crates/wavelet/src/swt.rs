//! Stationary (undecimated) wavelet transform (SWT).

use tracing::debug;

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::series::TimeSeries;

/// Computes the maximum SWT decomposition level for a series length.
///
/// Level `J` requires `N` to be divisible by `2^J`, so the maximum is the
/// number of trailing zero bits of `N`.
///
/// # Example
///
/// ```
/// use dwtviz_wavelet::swt_max_level;
///
/// assert_eq!(swt_max_level(256), 8);
/// assert_eq!(swt_max_level(96), 5);
/// assert_eq!(swt_max_level(7), 0);
/// ```
pub fn swt_max_level(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    n.trailing_zeros() as usize
}

/// Configuration for an SWT decomposition.
///
/// # Example
///
/// ```
/// use dwtviz_wavelet::{SwtConfig, WaveletFilter};
///
/// let config = SwtConfig::new(WaveletFilter::Haar, 4);
/// assert_eq!(config.n_levels(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwtConfig {
    filter: WaveletFilter,
    n_levels: usize,
}

impl SwtConfig {
    /// Creates a new SWT configuration.
    pub fn new(filter: WaveletFilter, n_levels: usize) -> Self {
        Self { filter, n_levels }
    }

    /// Returns the wavelet filter.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }
}

/// SWT decomposition coefficients.
///
/// Every band has the length of the input series. Details are stored
/// coarsest first; `approx` is the approximation of the deepest level.
#[derive(Clone, Debug)]
pub struct SwtCoeffs {
    details: Vec<Vec<f64>>,
    approx: Vec<f64>,
    filter: WaveletFilter,
}

impl SwtCoeffs {
    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.details.len()
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

    /// Returns the approximation coefficients of the deepest level.
    pub fn approx(&self) -> &[f64] {
        &self.approx
    }

    /// Returns the length of the original series.
    pub fn series_len(&self) -> usize {
        self.approx.len()
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

/// Computes the SWT decomposition of a series.
///
/// Level `j` applies the decomposition filters dilated by `2^(j-1)` to the
/// previous approximation with periodic extension, without downsampling.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::LevelTooHigh`] | `config.n_levels()` exceeds [`swt_max_level`] |
pub fn swt(series: &TimeSeries, config: &SwtConfig) -> Result<SwtCoeffs, WaveletError> {
    let n = series.len();
    let level = config.n_levels();
    let max_level = swt_max_level(n);
    if level > max_level {
        return Err(WaveletError::LevelTooHigh {
            requested: level,
            max: max_level,
            len: n,
        });
    }

    let filter = config.filter();
    let lo = filter.dec_lo();
    let hi = filter.dec_hi();

    let mut approx = series.as_slice().to_vec();
    let mut details = Vec::with_capacity(level);
    for j in 1..=level {
        let step = 1usize << (j - 1);
        let (a, d) = swt_step(&approx, &lo, &hi, step);
        debug!(level = j, dilation = step, "swt level computed");
        details.push(d);
        approx = a;
    }
    details.reverse();

    Ok(SwtCoeffs {
        details,
        approx,
        filter,
    })
}

/// One undecimated analysis step with filters dilated by `step`.
fn swt_step(x: &[f64], lo: &[f64], hi: &[f64], step: usize) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() as isize;
    let shift = (lo.len() * step / 2) as isize;
    let mut approx = Vec::with_capacity(x.len());
    let mut detail = Vec::with_capacity(x.len());
    for o in 0..n {
        let mut a = 0.0;
        let mut d = 0.0;
        for (k, (l, h)) in lo.iter().zip(hi).enumerate() {
            let idx = (o + shift - (k * step) as isize).rem_euclid(n) as usize;
            a += l * x[idx];
            d += h * x[idx];
        }
        approx.push(a);
        detail.push(d);
    }
    (approx, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::SQRT_2;

    #[test]
    fn max_level_powers_of_two() {
        assert_eq!(swt_max_level(8), 3);
        assert_eq!(swt_max_level(256), 8);
        assert_eq!(swt_max_level(12), 2);
    }

    #[test]
    fn max_level_odd_and_empty() {
        assert_eq!(swt_max_level(9), 0);
        assert_eq!(swt_max_level(0), 0);
    }

    #[test]
    fn config_accessors() {
        let config = SwtConfig::new(WaveletFilter::Db2, 3);
        assert_eq!(config.filter(), WaveletFilter::Db2);
        assert_eq!(config.n_levels(), 3);
    }

    #[test]
    fn haar_level_one_values() {
        let ts = TimeSeries::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let coeffs = swt(&ts, &SwtConfig::new(WaveletFilter::Haar, 1)).unwrap();
        let expected_a = [3.0, 5.0, 7.0, 5.0].map(|v| v / SQRT_2);
        let expected_d = [-1.0, -1.0, -1.0, 3.0].map(|v| v / SQRT_2);
        for (got, want) in coeffs.approx().iter().zip(expected_a) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        for (got, want) in coeffs.detail(1).unwrap().iter().zip(expected_d) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn all_bands_have_input_length() {
        let data: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
        let ts = TimeSeries::new(data).unwrap();
        let coeffs = swt(&ts, &SwtConfig::new(WaveletFilter::Db4, 4)).unwrap();
        assert_eq!(coeffs.n_levels(), 4);
        assert_eq!(coeffs.series_len(), 64);
        for d in coeffs.details() {
            assert_eq!(d.len(), 64);
        }
    }

    #[test]
    fn level_one_doubles_energy() {
        let data = vec![3.0, -1.0, 4.0, 1.0, -5.0, 9.0, 2.0, -6.0];
        let input: f64 = data.iter().map(|v| v * v).sum();
        let ts = TimeSeries::new(data).unwrap();
        for filter in [WaveletFilter::Haar, WaveletFilter::Db2] {
            let coeffs = swt(&ts, &SwtConfig::new(filter, 1)).unwrap();
            let output: f64 = coeffs
                .approx()
                .iter()
                .chain(coeffs.detail(1).unwrap())
                .map(|v| v * v)
                .sum();
            assert_relative_eq!(output, 2.0 * input, epsilon = 1e-9);
        }
    }

    #[test]
    fn constant_signal_has_zero_details() {
        let ts = TimeSeries::new(vec![-1.5; 32]).unwrap();
        let coeffs = swt(&ts, &SwtConfig::new(WaveletFilter::Sym4, 3)).unwrap();
        for d in coeffs.details().iter().flatten() {
            assert!(d.abs() < 1e-10, "{d}");
        }
    }

    #[test]
    fn level_too_high() {
        let ts = TimeSeries::new(vec![1.0; 12]).unwrap();
        let err = swt(&ts, &SwtConfig::new(WaveletFilter::Haar, 3)).unwrap_err();
        assert_eq!(
            err,
            WaveletError::LevelTooHigh {
                requested: 3,
                max: 2,
                len: 12
            }
        );
    }

    #[test]
    fn into_levels_orders_approx_first() {
        let ts = TimeSeries::new((0..16).map(|v| v as f64).collect()).unwrap();
        let coeffs = swt(&ts, &SwtConfig::new(WaveletFilter::Haar, 2)).unwrap();
        let finest = coeffs.detail(1).unwrap().to_vec();
        let levels = coeffs.into_levels(true);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[2], finest);
    }

    #[test]
    fn coeffs_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SwtCoeffs>();
    }
}
