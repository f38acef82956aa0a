//! Irregularly sampled `(x, y)` observations.

use crate::error::GpError;

/// Validated observations of one signal: equal-length, finite, non-empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Observations {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Observations {
    /// Creates observations from coordinate and value vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GpError::EmptyData`] | no observations |
    /// | [`GpError::LengthMismatch`] | `x.len() != y.len()` |
    /// | [`GpError::NonFiniteData`] | any NaN or infinity |
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, GpError> {
        if x.len() != y.len() {
            return Err(GpError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(GpError::EmptyData);
        }
        if x.iter().chain(&y).any(|v| !v.is_finite()) {
            return Err(GpError::NonFiniteData);
        }
        Ok(Self { x, y })
    }

    /// Returns the coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the values.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the largest coordinate.
    pub fn max_x(&self) -> f64 {
        self.x.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns the smallest coordinate.
    pub fn min_x(&self) -> f64 {
        self.x.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Returns `max_x - min_x`.
    pub fn span(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    /// Keeps the observations with `x <= cutoff`, preserving order.
    ///
    /// Returns `None` when nothing survives.
    pub fn truncated(&self, cutoff: f64) -> Option<Self> {
        let (x, y): (Vec<f64>, Vec<f64>) = self
            .x
            .iter()
            .zip(&self.y)
            .filter(|(x, _)| **x <= cutoff)
            .map(|(&x, &y)| (x, y))
            .unzip();
        if x.is_empty() {
            None
        } else {
            Some(Self { x, y })
        }
    }
}
