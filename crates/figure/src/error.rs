//! Error types for the dwtviz-figure crate.

use std::path::PathBuf;

use dwtviz_gp::GpError;
use dwtviz_heatmap::HeatmapError;

/// Error type for all fallible operations in the dwtviz-figure crate.
#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    /// Returned when no signals are given.
    #[error("no signals to render")]
    NoSignals,

    /// Decomposition or layout failure.
    #[error(transparent)]
    Heatmap(#[from] HeatmapError),

    /// Gaussian-process smoothing failure.
    #[error(transparent)]
    Gp(#[from] GpError),

    /// Returned when the plotting backend fails.
    #[error("drawing failed: {0}")]
    Draw(String),

    /// Returned when the figure file cannot be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
