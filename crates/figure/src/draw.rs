//! Drawing a [`Figure`] through plotters.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use dwtviz_heatmap::{ColorScale, Colormap, Rgb};

use crate::error::FigureError;
use crate::figure::{CoefficientPlot, Figure, Panel, SignalTrace};

const FONT: &str = "sans-serif";
const COLORBAR_WIDTH: u32 = 100;
const COLORBAR_STEPS: usize = 64;
/// Share of a panel's height given to the heatmap.
const HEATMAP_SHARE: f64 = 0.6;
/// Normalized room left of and below the unit square for tick labels.
const HEATMAP_GUTTER: (f64, f64) = (0.08, 0.1);
/// Share of the signal y-extent reserved below the trace for x-ticks.
const TICK_GUTTER: f64 = 0.15;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

impl Figure {
    /// Draws the figure on `root`, splitting it into the figure's grid.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError::Draw`] when the backend fails.
    pub fn draw_on<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), FigureError> {
        draw_figure(self, root).map_err(|e| FigureError::Draw(e.to_string()))
    }

    /// Renders the figure as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError::Draw`] when drawing fails.
    pub fn to_svg(&self) -> Result<String, FigureError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            self.draw_on(&root)?;
            root.present().map_err(|e| FigureError::Draw(e.to_string()))?;
        }
        debug!(bytes = svg.len(), "svg rendered");
        Ok(svg)
    }

    /// Writes the figure to `path` as SVG.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FigureError::Draw`] | drawing fails |
    /// | [`FigureError::Io`] | the file cannot be written |
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<(), FigureError> {
        let path = path.as_ref();
        let svg = self.to_svg()?;
        std::fs::write(path, svg).map_err(|source| FigureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "figure written");
        Ok(())
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn draw_figure<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let ncols = figure.ncols();
    let areas = root.split_evenly((figure.nrows(), ncols));
    for panel in figure.panels() {
        let (row, col) = panel.grid();
        if let Some(area) = areas.get(row * ncols + col) {
            draw_panel(panel, figure.color_scale(), figure.colormap(), area)?;
        }
        if let Some(plot) = panel.coefficients() {
            let (row, col) = plot.grid();
            if let Some(area) = areas.get(row * ncols + col) {
                draw_coefficients(plot, area)?;
            }
        }
    }
    Ok(())
}

/// Heatmap on top, signal below, colorbar spanning both on the right.
fn draw_panel<DB: DrawingBackend>(
    panel: &Panel,
    scale: ColorScale,
    cmap: Colormap,
    area: &DrawingArea<DB, Shift>,
) -> DrawResult<DB> {
    let (width, height) = area.dim_in_pixel();
    let (main, bar) = area.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));
    let (heat, signal) = main.split_vertically((f64::from(height) * HEATMAP_SHARE) as u32);
    draw_heatmap(panel, &heat)?;
    draw_signal(panel.signal(), &signal)?;
    draw_colorbar(scale, cmap, &bar)
}

fn draw_heatmap<DB: DrawingBackend>(panel: &Panel, area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
    let layout = panel.heatmap();
    let (gx, gy) = HEATMAP_GUTTER;

    let mut builder = ChartBuilder::on(area);
    builder.margin(8);
    if let Some(title) = panel.title() {
        builder.caption(title, (FONT, 20));
    }
    let mut chart = builder.build_cartesian_2d(-gx..1.0, -gy..1.0)?;

    chart.draw_series(layout.cells().iter().map(|c| {
        Rectangle::new(
            [(c.x, c.y), (c.x + c.width, c.y + c.height)],
            rgb(c.color).filled(),
        )
    }))?;

    let y_style = TextStyle::from((FONT, 13).into_font()).pos(Pos::new(HPos::Right, VPos::Center));
    chart.draw_series(
        layout
            .y_ticks()
            .iter()
            .map(|t| Text::new(t.label.clone(), (-0.01, t.position), y_style.clone())),
    )?;

    let x_style = TextStyle::from((FONT, 13).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    chart.draw_series(
        layout
            .x_ticks()
            .iter()
            .map(|t| Text::new(t.label.clone(), (t.position, -0.02), x_style.clone())),
    )?;

    let caption = TextStyle::from((FONT, 14).into_font().transform(FontTransform::Rotate270))
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(std::iter::once(Text::new("levels", (-gx * 0.8, 0.5), caption)))?;
    Ok(())
}

fn draw_signal<DB: DrawingBackend>(
    trace: &SignalTrace,
    area: &DrawingArea<DB, Shift>,
) -> DrawResult<DB> {
    let (x0, x1) = trace.x_range();
    let (y0, y1) = trace.y_range();
    let gutter = if trace.x_ticks().is_empty() {
        0.0
    } else {
        (y1 - y0) * TICK_GUTTER
    };

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .y_label_area_size(56)
        .build_cartesian_2d(x0..x1, (y0 - gutter)..y1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(5)
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style((FONT, 12))
        .draw()?;

    chart.draw_series(LineSeries::new(trace.points().iter().copied(), &BLUE))?;
    chart.draw_series(trace.scatter().iter().map(|&p| Circle::new(p, 3, RED.filled())))?;

    let tick_style = TextStyle::from((FONT, 12).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    chart.draw_series(trace.x_ticks().iter().map(|t| {
        Text::new(t.label.clone(), (t.position, y0 - gutter * 0.2), tick_style.clone())
    }))?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    scale: ColorScale,
    cmap: Colormap,
    area: &DrawingArea<DB, Shift>,
) -> DrawResult<DB> {
    let (lo, hi) = if scale.max() > scale.min() {
        (scale.min(), scale.max())
    } else {
        (scale.min() - 1.0, scale.max() + 1.0)
    };

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(7)
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style((FONT, 12))
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|k| {
        let v0 = lo + step * k as f64;
        let t = (k as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], rgb(cmap.at(t)).filled())
    }))?;
    Ok(())
}

/// One line chart per level, stacked top to bottom.
fn draw_coefficients<DB: DrawingBackend>(
    plot: &CoefficientPlot,
    area: &DrawingArea<DB, Shift>,
) -> DrawResult<DB> {
    let (y0, y1) = plot.y_range();
    let rows = area.split_evenly((plot.lines().len().max(1), 1));
    for ((line, label), row) in plot.lines().iter().zip(plot.labels()).zip(&rows) {
        let x1 = line.len().saturating_sub(1).max(1) as f64;
        let mut chart = ChartBuilder::on(row)
            .margin(4)
            .y_label_area_size(56)
            .build_cartesian_2d(0.0..x1, y0..y1)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(0)
            .y_labels(3)
            .y_desc(label.as_str())
            .y_label_formatter(&|v| format!("{v:.1}"))
            .label_style((FONT, 11))
            .draw()?;
        chart.draw_series(LineSeries::new(
            line.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            &BLUE,
        ))?;
    }
    Ok(())
}
