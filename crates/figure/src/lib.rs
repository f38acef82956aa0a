//! # dwtviz-figure
//!
//! Composes heatmap + signal panels into a figure and draws it with
//! plotters.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["&[Signal]"] -->|"render(&signals, &opts)?"| C["Figure"]
//!     B["&[Observations]"] -->|"render_smoothed(..)?"| C
//!     C -->|"draw_on(&area)?"| D["plotters backend"]
//!     C -->|"to_svg()? / save_svg(path)?"| E["SVG"]
//!     C -->|"serde"| F["JSON layout"]
//! ```
//!
//! ## Grid
//!
//! | Option | Rows | Columns | Signal `i` |
//! |--------|------|---------|------------|
//! | default | `ceil(n / 2)` | `min(2, n)` | `(i / 2, i % 2)` |
//! | `xyplot` | `n` | 2 | `(i, 0)`, coefficient lines at `(i, 1)` |
//!
//! Each grid cell is [`COLUMN_WIDTH`] x [`ROW_HEIGHT`] pixels. Every panel
//! shares one color scale and colorbar range.
//!
//! ## Quick Start
//!
//! ```
//! use dwtviz_figure::{RenderOptions, render};
//! use dwtviz_heatmap::Signal;
//!
//! let signals = vec![Signal::new((1..=16).map(f64::from).collect())];
//! let figure = render(&signals, &RenderOptions::default()).unwrap();
//! assert_eq!(figure.size(), (1000, 700));
//! assert!(figure.to_svg().unwrap().contains("<svg"));
//! ```

mod draw;
mod error;
mod figure;
mod format;
mod options;
mod smoothed;

pub use error::FigureError;
pub use figure::{
    COLUMN_WIDTH, CoefficientPlot, Figure, Panel, ROW_HEIGHT, SignalTrace, grid_shape, render,
};
pub use format::{format_number, format_seconds};
pub use options::RenderOptions;
pub use smoothed::{SMOOTHED_XTICKS, render_smoothed};
