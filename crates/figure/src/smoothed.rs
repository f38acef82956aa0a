//! Heatmaps of Gaussian-process smoothed signals.

use tracing::info;

use dwtviz_gp::{Observations, SmoothConfig, fit_gps, linspace};
use dwtviz_heatmap::{Signal, Tick};

use crate::error::FigureError;
use crate::figure::{Figure, render};
use crate::format::{format_number, format_seconds};
use crate::options::RenderOptions;

/// Number of x-ticks on a smoothed signal plot.
pub const SMOOTHED_XTICKS: usize = 4;

/// Smooths irregularly sampled signals onto a dyadic grid and renders them.
///
/// Each panel shows the smoothed curve with the raw observations (cut to
/// the truncated span) overlaid as points, and [`SMOOTHED_XTICKS`] evenly
/// spaced x-ticks from the first to the last grid point. With `xseconds`
/// the ticks read as durations. Truncation never cuts a curve below the
/// length one level of the chosen wavelet needs.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FigureError::NoSignals`] | `signals` is empty |
/// | [`FigureError::Gp`] | a fit failed or the configuration is invalid |
/// | [`FigureError::Heatmap`] | decomposition of a smoothed curve failed |
pub fn render_smoothed(
    signals: &[Observations],
    smooth: &SmoothConfig,
    options: &RenderOptions,
    xseconds: bool,
) -> Result<Figure, FigureError> {
    if signals.is_empty() {
        return Err(FigureError::NoSignals);
    }
    // one DWT level needs 2 * (L - 1) samples for a filter of length L
    let needed = 2 * options.wavelet().length().saturating_sub(1);
    let smooth = smooth
        .clone()
        .with_min_points(smooth.min_points().max(needed));
    let smoothed = fit_gps(signals, &smooth)?;
    let curves = smoothed
        .iter()
        .map(|s| Signal::with_coords(s.x().to_vec(), s.y().to_vec()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut figure = render(&curves, options)?;
    for (panel, s) in figure.panels_mut().iter_mut().zip(&smoothed) {
        let scatter = s
            .observations()
            .map(|obs| obs.x().iter().copied().zip(obs.y().iter().copied()).collect())
            .unwrap_or_default();
        let ticks = match (s.x().first(), s.x().last()) {
            (Some(&first), Some(&last)) => x_ticks(first, last, xseconds),
            _ => Vec::new(),
        };
        panel.signal_mut().overlay(scatter, ticks);
    }
    info!(n_signals = smoothed.len(), xseconds, "smoothed figure composed");
    Ok(figure)
}

fn x_ticks(first: f64, last: f64, xseconds: bool) -> Vec<Tick> {
    linspace(first, last, SMOOTHED_XTICKS)
        .into_iter()
        .map(|position| Tick {
            position,
            label: if xseconds {
                format_seconds(position)
            } else {
                format_number(position)
            },
        })
        .collect()
}
