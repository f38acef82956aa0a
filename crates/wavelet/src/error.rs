//! Error types for the dwtviz-wavelet crate.

/// Error type for all fallible operations in the dwtviz-wavelet crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveletError {
    /// Returned when the transform input has no samples.
    #[error("series is empty")]
    EmptySeries,

    /// Returned when a sample is NaN or infinite.
    #[error("series contains non-finite samples")]
    NonFiniteData,

    /// Returned when a transform is asked for more levels than the input
    /// length supports.
    #[error("cannot decompose {len} samples to level {requested} (max {max})")]
    LevelTooHigh {
        requested: usize,
        max: usize,
        len: usize,
    },

    /// Returned by [`WaveletFilter::from_name`](crate::WaveletFilter::from_name)
    /// for an unknown name.
    #[error("unsupported wavelet filter: {0:?}")]
    UnsupportedFilter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(WaveletError::EmptySeries.to_string(), "series is empty");
        assert_eq!(
            WaveletError::NonFiniteData.to_string(),
            "series contains non-finite samples"
        );
        assert_eq!(
            WaveletError::LevelTooHigh {
                requested: 5,
                max: 3,
                len: 8
            }
            .to_string(),
            "cannot decompose 8 samples to level 5 (max 3)"
        );
        assert_eq!(
            WaveletError::UnsupportedFilter("coif4".into()).to_string(),
            "unsupported wavelet filter: \"coif4\""
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<WaveletError>();
    }
}
