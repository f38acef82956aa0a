//! Validated transform input.

use crate::error::WaveletError;

/// Samples accepted by [`wavedec`](crate::wavedec) and [`swt`](crate::swt):
/// at least one value, all finite.
///
/// # Example
///
/// ```
/// use dwtviz_wavelet::TimeSeries;
///
/// let ts = TimeSeries::new(vec![3.0, 4.0]).unwrap();
/// assert_eq!(ts.energy(), 25.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    data: Vec<f64>,
}

impl TimeSeries {
    /// Validates and wraps `data`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptySeries`] | `data` is empty |
    /// | [`WaveletError::NonFiniteData`] | a sample is NaN or infinite |
    pub fn new(data: Vec<f64>) -> Result<Self, WaveletError> {
        if data.is_empty() {
            return Err(WaveletError::EmptySeries);
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(WaveletError::NonFiniteData);
        }
        Ok(Self { data })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of squared samples. Orthogonal DWTs of dyadic-length input
    /// preserve it.
    pub fn energy(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }
}
