//! # dwtviz-heatmap
//!
//! Turns a signal into the pure description of a wavelet coefficient
//! heatmap: colored cells in the unit square plus labeled ticks.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Signal"] -->|"decompose(&signal, &config)?"| B["Decomposition"]
//!     B -->|"ColorScale::resolve(limit, ..)?"| C["ColorScale"]
//!     B --> D["layout(&d, &scale, &cmap, &opts)?"]
//!     C --> D
//!     D --> E["HeatmapLayout"]
//! ```
//!
//! ## Decomposition Modes
//!
//! | Mode | Name | Level lengths |
//! |------|------|---------------|
//! | [`DecompositionMode::Plain`] | `dwt` | about half per level |
//! | [`DecompositionMode::Stationary`] | `swt` | input length |
//! | [`DecompositionMode::StationaryTruncated`] | `sdwt` | input length, sentinel tails |
//!
//! ## Row Labels
//!
//! Rows are ordered top to bottom: the approximation band (when shown),
//! then detail bands from coarsest to finest. Numeric labels count down
//! from the filter's maximum DWT depth; see [`LabelRule`].
//!
//! ## Quick Start
//!
//! ```
//! use dwtviz_heatmap::{
//!     ColorScale, Colormap, DecomposeConfig, LayoutOptions, Signal, decompose, layout,
//! };
//! use dwtviz_wavelet::WaveletFilter;
//!
//! let signal = Signal::new((1..=8).map(f64::from).collect());
//! let d = decompose(&signal, &DecomposeConfig::new(WaveletFilter::Haar)).unwrap();
//! let scale = ColorScale::from_decompositions([&d]);
//! let heatmap = layout(&d, &scale, &Colormap::Seismic, &LayoutOptions::default()).unwrap();
//!
//! let labels: Vec<&str> = heatmap.y_ticks().iter().map(|t| t.label.as_str()).collect();
//! assert_eq!(labels, ["3", "2", "1"]);
//! ```

mod colormap;
mod decompose;
mod error;
mod labels;
mod layout;
mod scale;
mod signal;

pub use colormap::{Colormap, Rgb};
pub use decompose::{DecomposeConfig, Decomposition, DecompositionMode, decompose};
pub use error::HeatmapError;
pub use labels::{LabelRule, YLabel, y_labels};
pub use layout::{
    HeatmapLayout, LayoutCell, LayoutOptions, Tick, XTICK_STRIDE, layout, layout_levels,
};
pub use scale::ColorScale;
pub use signal::Signal;
