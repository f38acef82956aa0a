//! # dwtviz-wavelet
//!
//! Discrete and stationary wavelet transforms feeding the dwtviz heatmaps.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries::new(data)?"] -->|"validate"| B["TimeSeries"]
//!     B -->|"wavedec(&ts, &config)?"| C["DwtCoeffs"]
//!     B -->|"swt(&ts, &config)?"| D["SwtCoeffs"]
//!     C --> E[".into_levels(approx)"]
//!     D --> E
//! ```
//!
//! ## Supported Filters
//!
//! | Filter | Length | Names |
//! |--------|--------|-------|
//! | [`WaveletFilter::Haar`] | 2 | `haar`, `db1` |
//! | [`WaveletFilter::Db2`] | 4 | `db2`, `d4` |
//! | [`WaveletFilter::Db3`] | 6 | `db3`, `d6` |
//! | [`WaveletFilter::Db4`] | 8 | `db4`, `d8` |
//! | [`WaveletFilter::Sym4`] | 8 | `sym4`, `la8` |
//!
//! ## Level Ordering
//!
//! Both coefficient types store detail bands coarsest first, which is the
//! top-to-bottom order of a heatmap. Filter level 1 (the finest band) is
//! always the last entry.
//!
//! ## Quick Start
//!
//! ```
//! use dwtviz_wavelet::{DwtConfig, TimeSeries, WaveletFilter, wavedec};
//!
//! let ts = TimeSeries::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
//! let coeffs = wavedec(&ts, &DwtConfig::new(WaveletFilter::Haar)).unwrap();
//! assert_eq!(coeffs.n_levels(), 3);
//! ```

mod dwt;
mod error;
mod filter;
mod series;
mod swt;

pub use dwt::{DwtCoeffs, DwtConfig, dwt_max_level, wavedec};
pub use error::WaveletError;
pub use filter::WaveletFilter;
pub use series::TimeSeries;
pub use swt::{SwtCoeffs, SwtConfig, swt, swt_max_level};
