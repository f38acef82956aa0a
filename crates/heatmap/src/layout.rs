//! Coefficient levels -> colored cells and ticks in the unit square.

use serde::Serialize;
use tracing::debug;

use crate::colormap::{Colormap, Rgb};
use crate::decompose::{Decomposition, validate_levels};
use crate::error::HeatmapError;
use crate::labels::LabelRule;
use crate::scale::ColorScale;

/// Spacing between x-ticks, in coefficient indices of the longest row.
pub const XTICK_STRIDE: usize = 5;

/// One heatmap rectangle, anchored at its bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutCell {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Coefficient value.
    pub value: f64,
    /// Color of the value under the layout's scale.
    pub color: Rgb,
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

/// An axis tick in normalized coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Which tick sets the layout produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    xticks: bool,
    yticks: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            xticks: true,
            yticks: true,
        }
    }
}

impl LayoutOptions {
    /// Creates options with both tick sets enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables x-ticks.
    pub fn with_xticks(mut self, xticks: bool) -> Self {
        self.xticks = xticks;
        self
    }

    /// Enables or disables y-ticks.
    pub fn with_yticks(mut self, yticks: bool) -> Self {
        self.yticks = yticks;
        self
    }

    /// Returns whether x-ticks are produced.
    pub fn xticks(&self) -> bool {
        self.xticks
    }

    /// Returns whether y-ticks are produced.
    pub fn yticks(&self) -> bool {
        self.yticks
    }
}

/// Pure description of one heatmap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatmapLayout {
    cells: Vec<LayoutCell>,
    y_ticks: Vec<Tick>,
    x_ticks: Vec<Tick>,
    color_scale: ColorScale,
    label_rule: LabelRule,
    n_rows: usize,
}

impl HeatmapLayout {
    /// Returns the cells, row by row from the top.
    pub fn cells(&self) -> &[LayoutCell] {
        &self.cells
    }

    /// Returns the y-ticks, top row first. Empty when disabled.
    pub fn y_ticks(&self) -> &[Tick] {
        &self.y_ticks
    }

    /// Returns the x-ticks. Empty when disabled.
    pub fn x_ticks(&self) -> &[Tick] {
        &self.x_ticks
    }

    /// Returns the color scale the cells were painted with.
    pub fn color_scale(&self) -> ColorScale {
        self.color_scale
    }

    /// Returns the labeling rule that produced the y-ticks.
    pub fn label_rule(&self) -> LabelRule {
        self.label_rule
    }

    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the cells of row `row`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &LayoutCell> {
        self.cells.iter().filter(move |c| c.row == row)
    }
}

/// Lays out a decomposition.
///
/// # Errors
///
/// Never fails for a [`Decomposition`] built through this crate; the
/// `Result` mirrors [`layout_levels`].
pub fn layout(
    decomposition: &Decomposition,
    scale: &ColorScale,
    cmap: &Colormap,
    options: &LayoutOptions,
) -> Result<HeatmapLayout, HeatmapError> {
    layout_levels(
        decomposition.levels(),
        decomposition.max_level(),
        decomposition.has_approx(),
        scale,
        cmap,
        options,
    )
}

/// Lays out raw coefficient levels, row 0 on top.
///
/// Each row is `1 / n` tall and split into equal-width cells, one per
/// coefficient. Y-ticks sit at row centers and are labeled through
/// [`LabelRule`]. X-ticks mark every [`XTICK_STRIDE`]th index of the
/// longest row.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`HeatmapError::EmptyDecomposition`] | `levels` is empty |
/// | [`HeatmapError::EmptyLevel`] | any level is empty |
pub fn layout_levels(
    levels: &[Vec<f64>],
    max_level: usize,
    approx: bool,
    scale: &ColorScale,
    cmap: &Colormap,
    options: &LayoutOptions,
) -> Result<HeatmapLayout, HeatmapError> {
    validate_levels(levels)?;
    let n_rows = levels.len();
    let height = 1.0 / n_rows as f64;

    let mut cells = Vec::with_capacity(levels.iter().map(Vec::len).sum());
    for (row, level) in levels.iter().enumerate() {
        let width = 1.0 / level.len() as f64;
        let y = 1.0 - (row + 1) as f64 * height;
        for (col, &value) in level.iter().enumerate() {
            cells.push(LayoutCell {
                x: col as f64 * width,
                y,
                width,
                height,
                value,
                color: cmap.at(scale.normalize(value)),
                row,
                col,
            });
        }
    }

    let label_rule = LabelRule::select(approx, n_rows, max_level);
    let y_ticks = if options.yticks() {
        label_rule
            .labels(n_rows, max_level)
            .iter()
            .enumerate()
            .map(|(row, label)| Tick {
                position: 1.0 - (row as f64 + 0.5) / n_rows as f64,
                label: label.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let x_ticks = if options.xticks() {
        x_ticks(levels)
    } else {
        Vec::new()
    };

    debug!(
        n_rows,
        n_cells = cells.len(),
        rule = ?label_rule,
        "heatmap laid out"
    );
    Ok(HeatmapLayout {
        cells,
        y_ticks,
        x_ticks,
        color_scale: *scale,
        label_rule,
        n_rows,
    })
}

fn x_ticks(levels: &[Vec<f64>]) -> Vec<Tick> {
    let len = levels.iter().map(Vec::len).max().unwrap_or(0);
    (0..len)
        .step_by(XTICK_STRIDE)
        .map(|k| Tick {
            position: k as f64 / len as f64,
            label: k.to_string(),
        })
        .collect()
}
