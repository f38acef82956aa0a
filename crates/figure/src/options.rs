//! Rendering options.

use dwtviz_heatmap::{Colormap, DecomposeConfig, DecompositionMode, LayoutOptions};
use dwtviz_wavelet::WaveletFilter;

/// Options for [`render`](crate::render).
///
/// | Option | Default |
/// |--------|---------|
/// | wavelet | `db1` (Haar) |
/// | level | maximum depth |
/// | approx | shown only with an explicit level |
/// | colormap | `seismic` |
/// | decomposition | `dwt` |
/// | cbar_limit | largest absolute coefficient |
/// | xyplot | off |
/// | xticks, yticks, index | on |
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    wavelet: WaveletFilter,
    level: Option<usize>,
    approx: Option<bool>,
    cmap: Colormap,
    decomposition: DecompositionMode,
    cbar_limit: Option<f64>,
    xyplot: bool,
    xticks: bool,
    yticks: bool,
    index: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wavelet: WaveletFilter::Haar,
            level: None,
            approx: None,
            cmap: Colormap::Seismic,
            decomposition: DecompositionMode::Plain,
            cbar_limit: None,
            xyplot: false,
            xticks: true,
            yticks: true,
            index: true,
        }
    }
}

impl RenderOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wavelet filter.
    pub fn with_wavelet(mut self, wavelet: WaveletFilter) -> Self {
        self.wavelet = wavelet;
        self
    }

    /// Sets the decomposition depth, `None` meaning the maximum.
    pub fn with_level(mut self, level: Option<usize>) -> Self {
        self.level = level;
        self
    }

    /// Forces the approximation band on or off, `None` meaning the default.
    pub fn with_approx(mut self, approx: Option<bool>) -> Self {
        self.approx = approx;
        self
    }

    /// Sets the colormap.
    pub fn with_cmap(mut self, cmap: Colormap) -> Self {
        self.cmap = cmap;
        self
    }

    /// Sets the decomposition mode.
    pub fn with_decomposition(mut self, decomposition: DecompositionMode) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Fixes the color scale to `[-limit, limit]`.
    pub fn with_cbar_limit(mut self, limit: Option<f64>) -> Self {
        self.cbar_limit = limit;
        self
    }

    /// Adds per-level coefficient line plots next to each heatmap.
    pub fn with_xyplot(mut self, xyplot: bool) -> Self {
        self.xyplot = xyplot;
        self
    }

    /// Enables or disables heatmap x-ticks.
    pub fn with_xticks(mut self, xticks: bool) -> Self {
        self.xticks = xticks;
        self
    }

    /// Enables or disables heatmap y-ticks.
    pub fn with_yticks(mut self, yticks: bool) -> Self {
        self.yticks = yticks;
        self
    }

    /// Enables or disables the signal-index panel titles.
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    pub fn wavelet(&self) -> WaveletFilter {
        self.wavelet
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn approx(&self) -> Option<bool> {
        self.approx
    }

    pub fn cmap(&self) -> Colormap {
        self.cmap
    }

    pub fn decomposition(&self) -> DecompositionMode {
        self.decomposition
    }

    pub fn cbar_limit(&self) -> Option<f64> {
        self.cbar_limit
    }

    pub fn xyplot(&self) -> bool {
        self.xyplot
    }

    pub fn xticks(&self) -> bool {
        self.xticks
    }

    pub fn yticks(&self) -> bool {
        self.yticks
    }

    pub fn index(&self) -> bool {
        self.index
    }

    /// Decomposition settings for every signal.
    pub fn decompose_config(&self) -> DecomposeConfig {
        DecomposeConfig::new(self.wavelet)
            .with_level_opt(self.level)
            .with_approx_opt(self.approx)
            .with_mode(self.decomposition)
    }

    /// Tick settings for every heatmap.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::new()
            .with_xticks(self.xticks)
            .with_yticks(self.yticks)
    }
}
