//! Figure composition: grid placement, signal traces and shared color scale.

use serde::Serialize;
use tracing::{debug, info};

use dwtviz_heatmap::{
    ColorScale, Colormap, Decomposition, HeatmapLayout, Signal, Tick, decompose, layout,
};

use crate::error::FigureError;
use crate::options::RenderOptions;

/// Pixel width of one grid column.
pub const COLUMN_WIDTH: u32 = 1000;

/// Pixel height of one grid row.
pub const ROW_HEIGHT: u32 = 700;

/// Fraction of the y-extent added above and below a signal trace.
const Y_MARGIN: f64 = 0.05;

/// The line plot under a heatmap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignalTrace {
    points: Vec<(f64, f64)>,
    x_range: (f64, f64),
    y_range: (f64, f64),
    scatter: Vec<(f64, f64)>,
    x_ticks: Vec<Tick>,
}

impl SignalTrace {
    fn from_signal(signal: &Signal) -> Self {
        let points = signal.points();
        let (x0, x1) = signal.x_range().unwrap_or((0.0, 0.0));
        let y_range = padded_extent(points.iter().map(|p| p.1));
        Self {
            points,
            x_range: widen(x0, x1),
            y_range,
            scatter: Vec::new(),
            x_ticks: Vec::new(),
        }
    }

    /// Adds raw observations and custom x-ticks, widening the y-extent to
    /// cover the observations.
    pub(crate) fn overlay(&mut self, scatter: Vec<(f64, f64)>, x_ticks: Vec<Tick>) {
        if !scatter.is_empty() {
            let ys = self.points.iter().chain(&scatter).map(|p| p.1);
            self.y_range = padded_extent(ys);
        }
        self.scatter = scatter;
        self.x_ticks = x_ticks;
    }

    /// Returns the `(x, y)` points of the line.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Returns the x-extent: `[min x, max x]` or `[0, len - 1]`.
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Returns the padded y-extent.
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Returns overlaid raw observations. Empty unless smoothed.
    pub fn scatter(&self) -> &[(f64, f64)] {
        &self.scatter
    }

    /// Returns custom x-ticks in data coordinates. Empty unless smoothed.
    pub fn x_ticks(&self) -> &[Tick] {
        &self.x_ticks
    }
}

/// Per-level coefficient line plots drawn next to a panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoefficientPlot {
    grid_row: usize,
    grid_col: usize,
    lines: Vec<Vec<f64>>,
    y_range: (f64, f64),
    labels: Vec<String>,
}

impl CoefficientPlot {
    fn from_decomposition(decomposition: &Decomposition, grid_row: usize) -> Self {
        let (lo, hi) = decomposition.value_range();
        let lines = decomposition.levels().to_vec();
        let labels = (1..=lines.len()).map(|j| j.to_string()).collect();
        Self {
            grid_row,
            grid_col: 1,
            lines,
            y_range: (lo - 1.0, hi + 1.0),
            labels,
        }
    }

    /// Returns the `(row, col)` grid cell.
    pub fn grid(&self) -> (usize, usize) {
        (self.grid_row, self.grid_col)
    }

    /// Returns one coefficient line per level, top row first.
    pub fn lines(&self) -> &[Vec<f64>] {
        &self.lines
    }

    /// Returns the y-extent shared by every line.
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Returns the per-line labels `1..=n`.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// One heatmap + signal pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    index: usize,
    grid_row: usize,
    grid_col: usize,
    title: Option<String>,
    heatmap: HeatmapLayout,
    signal: SignalTrace,
    coefficients: Option<CoefficientPlot>,
}

impl Panel {
    /// Returns the index of the signal in the input.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the `(row, col)` grid cell.
    pub fn grid(&self) -> (usize, usize) {
        (self.grid_row, self.grid_col)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn heatmap(&self) -> &HeatmapLayout {
        &self.heatmap
    }

    pub fn signal(&self) -> &SignalTrace {
        &self.signal
    }

    pub(crate) fn signal_mut(&mut self) -> &mut SignalTrace {
        &mut self.signal
    }

    pub fn coefficients(&self) -> Option<&CoefficientPlot> {
        self.coefficients.as_ref()
    }
}

/// Description of a whole figure, ready to draw or serialize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
    nrows: usize,
    ncols: usize,
    width: u32,
    height: u32,
    color_scale: ColorScale,
    colormap: Colormap,
    panels: Vec<Panel>,
}

impl Figure {
    /// Returns the number of grid rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of grid columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the color scale shared by every panel.
    pub fn color_scale(&self) -> ColorScale {
        self.color_scale
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    /// Returns the panels in input order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub(crate) fn panels_mut(&mut self) -> &mut [Panel] {
        &mut self.panels
    }
}

/// Returns `(nrows, ncols)` for `n` signals.
pub fn grid_shape(n: usize, xyplot: bool) -> (usize, usize) {
    if xyplot {
        (n, 2)
    } else {
        (n.div_ceil(2), n.min(2))
    }
}

/// Decomposes every signal and composes the figure.
///
/// All panels share one [`ColorScale`]: the explicit `cbar_limit` or the
/// largest absolute coefficient over every signal.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FigureError::NoSignals`] | `signals` is empty |
/// | [`FigureError::Heatmap`] | decomposition, scale or layout failure |
pub fn render(signals: &[Signal], options: &RenderOptions) -> Result<Figure, FigureError> {
    if signals.is_empty() {
        return Err(FigureError::NoSignals);
    }

    let config = options.decompose_config();
    let decompositions = signals
        .iter()
        .map(|s| decompose(s, &config))
        .collect::<Result<Vec<_>, _>>()?;
    let color_scale = ColorScale::resolve(options.cbar_limit(), &decompositions)?;

    let (nrows, ncols) = grid_shape(signals.len(), options.xyplot());
    info!(
        n_signals = signals.len(),
        nrows,
        ncols,
        mode = options.decomposition().name(),
        min = color_scale.min(),
        max = color_scale.max(),
        "composing figure"
    );

    let cmap = options.cmap();
    let layout_options = options.layout_options();
    let mut panels = Vec::with_capacity(signals.len());
    for (index, (signal, decomposition)) in signals.iter().zip(&decompositions).enumerate() {
        let (grid_row, grid_col) = if options.xyplot() {
            (index, 0)
        } else {
            (index / 2, index % 2)
        };
        let heatmap = layout(decomposition, &color_scale, &cmap, &layout_options)?;
        debug!(index, rows = heatmap.n_rows(), cells = heatmap.cells().len(), "panel laid out");
        panels.push(Panel {
            index,
            grid_row,
            grid_col,
            title: options.index().then(|| index.to_string()),
            heatmap,
            signal: SignalTrace::from_signal(signal),
            coefficients: options
                .xyplot()
                .then(|| CoefficientPlot::from_decomposition(decomposition, grid_row)),
        });
    }

    Ok(Figure {
        nrows,
        ncols,
        width: COLUMN_WIDTH * ncols as u32,
        height: ROW_HEIGHT * nrows as u32,
        color_scale,
        colormap: cmap,
        panels,
    })
}

fn padded_extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = (hi - lo) * Y_MARGIN;
    widen(lo - pad, hi + pad)
}

/// Expands a zero-width extent by one unit on each side.
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo { (lo, hi) } else { (lo - 1.0, hi + 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(n: usize) -> Signal {
        Signal::new((1..=n).map(|v| v as f64).collect())
    }

    #[test]
    fn grid_shapes() {
        assert_eq!(grid_shape(1, false), (1, 1));
        assert_eq!(grid_shape(2, false), (1, 2));
        assert_eq!(grid_shape(3, false), (2, 2));
        assert_eq!(grid_shape(3, true), (3, 2));
    }

    #[test]
    fn trace_range_of_plain_signal() {
        let trace = SignalTrace::from_signal(&ramp(8));
        assert_eq!(trace.x_range(), (0.0, 7.0));
        let (lo, hi) = trace.y_range();
        assert_relative_eq!(lo, 1.0 - 0.35);
        assert_relative_eq!(hi, 8.0 + 0.35);
    }

    #[test]
    fn flat_signal_is_widened() {
        let trace = SignalTrace::from_signal(&Signal::new(vec![2.0]));
        assert_eq!(trace.x_range(), (-1.0, 1.0));
        assert_eq!(trace.y_range(), (1.0, 3.0));
    }

    #[test]
    fn overlay_widens_y_range() {
        let mut trace = SignalTrace::from_signal(&ramp(4));
        trace.overlay(vec![(1.0, 10.0)], Vec::new());
        assert!(trace.y_range().1 > 10.0);
        assert_eq!(trace.scatter(), &[(1.0, 10.0)]);
    }

    #[test]
    fn coefficient_plot_pads_by_one() {
        let d = Decomposition::from_levels(vec![vec![-2.0, 0.5], vec![3.0]], false, 2).unwrap();
        let plot = CoefficientPlot::from_decomposition(&d, 4);
        assert_eq!(plot.grid(), (4, 1));
        assert_eq!(plot.y_range(), (-3.0, 4.0));
        assert_eq!(plot.labels(), &["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn titles_follow_index_option() {
        let signals = [ramp(8), ramp(8)];
        let fig = render(&signals, &RenderOptions::new()).unwrap();
        assert_eq!(fig.panels()[1].title(), Some("1"));
        let fig = render(&signals, &RenderOptions::new().with_index(false)).unwrap();
        assert_eq!(fig.panels()[1].title(), None);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = render(&[], &RenderOptions::new()).unwrap_err();
        assert!(matches!(err, FigureError::NoSignals));
    }
}
