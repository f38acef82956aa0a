//! Decomposition adapter: signal -> ordered coefficient levels.

use dwtviz_wavelet::{
    DwtConfig, SwtConfig, TimeSeries, WaveletFilter, dwt_max_level, swt, swt_max_level, wavedec,
};
use tracing::debug;

use crate::error::HeatmapError;
use crate::signal::Signal;

/// Transform variant used to decompose a signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecompositionMode {
    /// Multi-level DWT; level lengths shrink by about half per level.
    #[default]
    Plain,
    /// Stationary (undecimated) transform; every level has the input length.
    Stationary,
    /// Stationary transform with the edge-affected tail of each level
    /// overwritten by a sentinel value.
    StationaryTruncated,
}

impl DecompositionMode {
    /// Parses a mode from its short or long name.
    ///
    /// | Input | Mode |
    /// |-------|------|
    /// | `"dwt"`, `"plain"` | [`DecompositionMode::Plain`] |
    /// | `"swt"`, `"stationary"` | [`DecompositionMode::Stationary`] |
    /// | `"sdwt"`, `"stationary-truncated"` | [`DecompositionMode::StationaryTruncated`] |
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::UnknownDecomposition`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, HeatmapError> {
        match name.trim().to_lowercase().as_str() {
            "dwt" | "plain" => Ok(Self::Plain),
            "swt" | "stationary" => Ok(Self::Stationary),
            "sdwt" | "stationary-truncated" => Ok(Self::StationaryTruncated),
            _ => Err(HeatmapError::UnknownDecomposition(name.to_string())),
        }
    }

    /// Returns the short name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "dwt",
            Self::Stationary => "swt",
            Self::StationaryTruncated => "sdwt",
        }
    }

    /// Returns `true` for the undecimated variants.
    pub fn is_stationary(&self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// Configuration for [`decompose`].
///
/// The approximation band defaults to hidden when no level is given and
/// shown when one is.
///
/// # Example
///
/// ```
/// use dwtviz_heatmap::{DecomposeConfig, DecompositionMode};
/// use dwtviz_wavelet::WaveletFilter;
///
/// let config = DecomposeConfig::new(WaveletFilter::Haar)
///     .with_level(2)
///     .with_mode(DecompositionMode::Stationary);
/// assert!(config.include_approx());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecomposeConfig {
    wavelet: WaveletFilter,
    level: Option<usize>,
    approx: Option<bool>,
    mode: DecompositionMode,
}

impl DecomposeConfig {
    /// Creates a configuration with the given filter, maximum depth,
    /// default approximation policy, and the plain DWT.
    pub fn new(wavelet: WaveletFilter) -> Self {
        Self {
            wavelet,
            ..Self::default()
        }
    }

    /// Creates a configuration from a wavelet name such as `"db2"` or
    /// `"la8"`.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::InvalidWavelet`] for an unknown name.
    pub fn from_wavelet_name(name: &str) -> Result<Self, HeatmapError> {
        Ok(Self::new(WaveletFilter::from_name(name)?))
    }

    /// Sets the decomposition depth explicitly.
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the decomposition depth, `None` meaning the maximum.
    pub fn with_level_opt(mut self, level: Option<usize>) -> Self {
        self.level = level;
        self
    }

    /// Forces the approximation band on or off.
    pub fn with_approx(mut self, approx: bool) -> Self {
        self.approx = Some(approx);
        self
    }

    /// Sets the approximation policy, `None` meaning the default.
    pub fn with_approx_opt(mut self, approx: Option<bool>) -> Self {
        self.approx = approx;
        self
    }

    /// Sets the transform variant.
    pub fn with_mode(mut self, mode: DecompositionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the wavelet filter.
    pub fn wavelet(&self) -> WaveletFilter {
        self.wavelet
    }

    /// Returns the explicit level, if set.
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    /// Returns the transform variant.
    pub fn mode(&self) -> DecompositionMode {
        self.mode
    }

    /// Resolves whether the approximation band is included.
    pub fn include_approx(&self) -> bool {
        self.approx.unwrap_or(self.level.is_some())
    }
}

/// Ordered coefficient levels of one signal.
///
/// Index 0 is the approximation band when present, otherwise the coarsest
/// detail band; higher indices are finer detail. Never empty, and no level
/// is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Decomposition {
    levels: Vec<Vec<f64>>,
    approx: bool,
    max_level: usize,
}

impl Decomposition {
    /// Wraps precomputed levels, checking the non-empty invariants.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`HeatmapError::EmptyDecomposition`] | `levels` is empty |
    /// | [`HeatmapError::EmptyLevel`] | any level is empty |
    pub fn from_levels(
        levels: Vec<Vec<f64>>,
        approx: bool,
        max_level: usize,
    ) -> Result<Self, HeatmapError> {
        validate_levels(&levels)?;
        Ok(Self {
            levels,
            approx,
            max_level,
        })
    }

    /// Returns the levels, top row first.
    pub fn levels(&self) -> &[Vec<f64>] {
        &self.levels
    }

    /// Returns the number of levels (rows).
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` when row 0 is the approximation band.
    pub fn has_approx(&self) -> bool {
        self.approx
    }

    /// Returns the filter's maximum DWT depth for the signal length.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Returns the number of detail bands.
    pub fn depth(&self) -> usize {
        self.levels.len() - usize::from(self.approx)
    }

    /// Returns the total number of coefficients across levels.
    pub fn total_len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Returns the largest absolute coefficient.
    pub fn max_abs(&self) -> f64 {
        max_abs(&self.levels)
    }

    /// Returns the smallest and largest coefficient.
    pub fn value_range(&self) -> (f64, f64) {
        self.levels
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Consumes the decomposition, returning its levels.
    pub fn into_levels(self) -> Vec<Vec<f64>> {
        self.levels
    }
}

/// Decomposes a signal into heatmap rows.
///
/// Only the value half of a coordinate signal is transformed. The returned
/// [`Decomposition`] records the filter's maximum DWT depth for labeling;
/// it never limits the computation.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`HeatmapError::EmptySignal`] | the signal has no samples |
/// | [`HeatmapError::LevelTooDeep`] | explicit level above the mode's maximum |
/// | [`HeatmapError::EmptyDecomposition`] | depth 0 with the approximation hidden |
/// | [`HeatmapError::Wavelet`] | non-finite samples |
pub fn decompose(signal: &Signal, config: &DecomposeConfig) -> Result<Decomposition, HeatmapError> {
    if signal.is_empty() {
        return Err(HeatmapError::EmptySignal);
    }
    let series = TimeSeries::new(signal.values().to_vec())?;
    let n = series.len();
    let filter = config.wavelet();
    let approx = config.include_approx();
    let max_level = dwt_max_level(n, &filter);

    let levels = match config.mode() {
        DecompositionMode::Plain => {
            let mut dwt_config = DwtConfig::new(filter);
            if let Some(level) = config.level() {
                dwt_config = dwt_config.with_level(level);
            }
            wavedec(&series, &dwt_config)?.into_levels(approx)
        }
        mode => {
            let depth = config.level().unwrap_or_else(|| swt_max_level(n));
            let mut levels = swt(&series, &SwtConfig::new(filter, depth))?.into_levels(approx);
            if mode == DecompositionMode::StationaryTruncated {
                truncate_tails(&mut levels, approx, depth);
            }
            levels
        }
    };

    debug!(
        mode = config.mode().name(),
        filter = filter.name(),
        n_levels = levels.len(),
        max_level,
        approx,
        "signal decomposed"
    );
    Decomposition::from_levels(levels, approx, max_level)
}

/// Checks the non-empty invariants shared by [`Decomposition`] and the
/// layout engine.
pub(crate) fn validate_levels(levels: &[Vec<f64>]) -> Result<(), HeatmapError> {
    if levels.is_empty() {
        return Err(HeatmapError::EmptyDecomposition);
    }
    if let Some(level) = levels.iter().position(Vec::is_empty) {
        return Err(HeatmapError::EmptyLevel { level });
    }
    Ok(())
}

pub(crate) fn max_abs(levels: &[Vec<f64>]) -> f64 {
    levels
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Tail length overwritten in a truncated stationary level.
///
/// `2^depth - 1` for the approximation band, `2^(depth - l) - 1` for detail
/// band `l` (0 = coarsest).
fn tail_len(depth: usize, detail_index: Option<usize>) -> usize {
    match detail_index {
        None => (1usize << depth) - 1,
        Some(l) => (1usize << (depth - l)) - 1,
    }
}

/// Overwrites the tail of every level with `-max|c|` so that edge-affected
/// coefficients read as out of range.
fn truncate_tails(levels: &mut [Vec<f64>], approx: bool, depth: usize) {
    let sentinel = -max_abs(levels);
    let mut bands = levels.iter_mut();
    if approx {
        if let Some(band) = bands.next() {
            fill_tail(band, tail_len(depth, None), sentinel);
        }
    }
    for (l, band) in bands.enumerate() {
        fill_tail(band, tail_len(depth, Some(l)), sentinel);
    }
}

fn fill_tail(band: &mut [f64], tail: usize, sentinel: f64) {
    let keep = band.len().saturating_sub(tail);
    band[keep..].fill(sentinel);
}
