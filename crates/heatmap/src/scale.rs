//! Color normalization domain shared by the panels of one figure.

use serde::Serialize;
use tracing::warn;

use crate::decompose::Decomposition;
use crate::error::HeatmapError;

/// Numeric range mapped onto a colormap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Creates a scale from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::InvalidColorScale`] when a bound is not
    /// finite or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, HeatmapError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(HeatmapError::InvalidColorScale { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates the scale `[-limit, limit]`.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::InvalidColorScale`] for a negative or
    /// non-finite limit.
    pub fn symmetric(limit: f64) -> Result<Self, HeatmapError> {
        Self::new(-limit, limit)
    }

    /// Derives `[-L, L]` with `L` the largest absolute coefficient across
    /// all decompositions.
    pub fn from_decompositions<'a, I>(decompositions: I) -> Self
    where
        I: IntoIterator<Item = &'a Decomposition>,
    {
        let limit = decompositions
            .into_iter()
            .map(Decomposition::max_abs)
            .fold(0.0_f64, f64::max);
        if limit == 0.0 {
            warn!("all coefficients are zero, color scale is degenerate");
        }
        Self {
            min: -limit,
            max: limit,
        }
    }

    /// Uses `cbar_limit` when given, otherwise derives the scale from the
    /// decompositions.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::InvalidColorScale`] for an invalid limit.
    pub fn resolve<'a, I>(cbar_limit: Option<f64>, decompositions: I) -> Result<Self, HeatmapError>
    where
        I: IntoIterator<Item = &'a Decomposition>,
    {
        match cbar_limit {
            Some(limit) => Self::symmetric(limit),
            None => Ok(Self::from_decompositions(decompositions)),
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps a value to `[0, 1]`, clamping out-of-range values. A degenerate
    /// scale maps everything to 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}
