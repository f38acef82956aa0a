//! Error types for the dwtviz-heatmap crate.

use dwtviz_wavelet::WaveletError;

/// Error type for all fallible operations in the dwtviz-heatmap crate.
///
/// Wavelet errors that correspond to a caller mistake (empty input,
/// unknown filter, too-deep level) are mapped onto the dedicated variants
/// below; anything else is carried through as [`HeatmapError::Wavelet`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HeatmapError {
    /// Returned when the signal has no samples.
    #[error("signal is empty")]
    EmptySignal,

    /// Returned when the wavelet name cannot be resolved.
    #[error("invalid wavelet: {0}")]
    InvalidWavelet(String),

    /// Returned when the requested level exceeds what the filter and
    /// signal length support.
    #[error("level too deep: requested {requested}, max for length {len} is {max}")]
    LevelTooDeep {
        /// Level that was requested.
        requested: usize,
        /// Maximum supported level.
        max: usize,
        /// Length of the signal.
        len: usize,
    },

    /// Returned when a decomposition has no levels to lay out.
    #[error("decomposition has no levels")]
    EmptyDecomposition,

    /// Returned when a decomposition level holds no coefficients.
    #[error("decomposition level {level} is empty")]
    EmptyLevel {
        /// Row index of the empty level.
        level: usize,
    },

    /// Returned when coordinates and values differ in length.
    #[error("coordinate mismatch: {values} values but {coords} coordinates")]
    CoordinateMismatch {
        /// Number of values.
        values: usize,
        /// Number of coordinates.
        coords: usize,
    },

    /// Returned when the decomposition mode name is not recognized.
    #[error("unknown decomposition: {0}")]
    UnknownDecomposition(String),

    /// Returned when the colormap name is not recognized.
    #[error("unknown colormap: {0}")]
    UnknownColormap(String),

    /// Returned when a color scale is non-finite or inverted.
    #[error("invalid color scale: [{min}, {max}]")]
    InvalidColorScale {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Any other wavelet transform failure.
    #[error(transparent)]
    Wavelet(WaveletError),
}

impl From<WaveletError> for HeatmapError {
    fn from(err: WaveletError) -> Self {
        match err {
            WaveletError::EmptySeries => Self::EmptySignal,
            WaveletError::UnsupportedFilter(name) => Self::InvalidWavelet(name),
            WaveletError::LevelTooHigh {
                requested,
                max,
                len,
            } => Self::LevelTooDeep {
                requested,
                max,
                len,
            },
            other => Self::Wavelet(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_signal() {
        assert_eq!(HeatmapError::EmptySignal.to_string(), "signal is empty");
    }

    #[test]
    fn error_invalid_wavelet() {
        let err = HeatmapError::InvalidWavelet("coif4".into());
        assert_eq!(err.to_string(), "invalid wavelet: coif4");
    }

    #[test]
    fn error_level_too_deep() {
        let err = HeatmapError::LevelTooDeep {
            requested: 5,
            max: 3,
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            "level too deep: requested 5, max for length 8 is 3"
        );
    }

    #[test]
    fn error_empty_decomposition() {
        assert_eq!(
            HeatmapError::EmptyDecomposition.to_string(),
            "decomposition has no levels"
        );
    }

    #[test]
    fn error_empty_level() {
        let err = HeatmapError::EmptyLevel { level: 2 };
        assert_eq!(err.to_string(), "decomposition level 2 is empty");
    }

    #[test]
    fn error_coordinate_mismatch() {
        let err = HeatmapError::CoordinateMismatch {
            values: 4,
            coords: 3,
        };
        assert_eq!(
            err.to_string(),
            "coordinate mismatch: 4 values but 3 coordinates"
        );
    }

    #[test]
    fn error_unknown_names() {
        let err = HeatmapError::UnknownDecomposition("fft".into());
        assert_eq!(err.to_string(), "unknown decomposition: fft");
        let err = HeatmapError::UnknownColormap("jet".into());
        assert_eq!(err.to_string(), "unknown colormap: jet");
    }

    #[test]
    fn error_invalid_color_scale() {
        let err = HeatmapError::InvalidColorScale { min: 2.0, max: 1.0 };
        assert_eq!(err.to_string(), "invalid color scale: [2, 1]");
    }

    #[test]
    fn wavelet_errors_map_to_named_variants() {
        assert_eq!(
            HeatmapError::from(WaveletError::EmptySeries),
            HeatmapError::EmptySignal
        );
        assert_eq!(
            HeatmapError::from(WaveletError::UnsupportedFilter("x".into())),
            HeatmapError::InvalidWavelet("x".into())
        );
        assert_eq!(
            HeatmapError::from(WaveletError::LevelTooHigh {
                requested: 4,
                max: 3,
                len: 8
            }),
            HeatmapError::LevelTooDeep {
                requested: 4,
                max: 3,
                len: 8
            }
        );
    }

    #[test]
    fn other_wavelet_errors_are_transparent() {
        let err = HeatmapError::from(WaveletError::NonFiniteData);
        assert_eq!(err.to_string(), "series contains non-finite samples");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<HeatmapError>();
    }
}
