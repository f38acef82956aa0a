//! Input signals, optionally paired with sample coordinates.

use crate::error::HeatmapError;

/// An ordered sequence of samples, optionally with one coordinate per
/// sample for irregularly sampled input.
///
/// Only the values are transformed; coordinates position the signal plot.
///
/// # Example
///
/// ```
/// use dwtviz_heatmap::Signal;
///
/// let s = Signal::with_coords(vec![0.0, 0.5, 2.0], vec![1.0, 3.0, 2.0]).unwrap();
/// assert_eq!(s.x_range(), Some((0.0, 2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    values: Vec<f64>,
    coords: Option<Vec<f64>>,
}

impl Signal {
    /// Creates a signal sampled at the implicit positions `0..len`.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            coords: None,
        }
    }

    /// Creates a signal from coordinate/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::CoordinateMismatch`] when the lengths differ.
    pub fn with_coords(coords: Vec<f64>, values: Vec<f64>) -> Result<Self, HeatmapError> {
        if coords.len() != values.len() {
            return Err(HeatmapError::CoordinateMismatch {
                values: values.len(),
                coords: coords.len(),
            });
        }
        Ok(Self {
            values,
            coords: Some(coords),
        })
    }

    /// Returns the sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the coordinates, if the signal carries them.
    pub fn coords(&self) -> Option<&[f64]> {
        self.coords.as_deref()
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the x-extent of the signal plot: `[min x, max x]` with
    /// coordinates, `[0, len - 1]` without. `None` for an empty signal.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        match &self.coords {
            Some(xs) => {
                let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                Some((lo, hi))
            }
            None => Some((0.0, (self.values.len() - 1) as f64)),
        }
    }

    /// Returns `(x, y)` plot points.
    pub fn points(&self) -> Vec<(f64, f64)> {
        match &self.coords {
            Some(xs) => xs.iter().copied().zip(self.values.iter().copied()).collect(),
            None => self
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect(),
        }
    }
}

impl From<Vec<f64>> for Signal {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
