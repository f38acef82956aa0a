//! Figure composition and SVG output for dwtviz-figure.

use approx::assert_relative_eq;
use dwtviz_figure::{FigureError, RenderOptions, render};
use dwtviz_heatmap::{Colormap, DecompositionMode, HeatmapError, Signal};
use dwtviz_wavelet::WaveletFilter;

fn sine(n: usize, amplitude: f64) -> Signal {
    Signal::new(
        (0..n)
            .map(|i| amplitude * (i as f64 * 0.4).sin())
            .collect(),
    )
}

#[test]
fn three_signals_fill_a_two_by_two_grid() {
    let signals = [sine(32, 1.0), sine(32, 2.0), sine(32, 3.0)];
    let fig = render(&signals, &RenderOptions::new()).unwrap();

    assert_eq!((fig.nrows(), fig.ncols()), (2, 2));
    assert_eq!(fig.size(), (2000, 1400));
    let grid: Vec<(usize, usize)> = fig.panels().iter().map(|p| p.grid()).collect();
    assert_eq!(grid, vec![(0, 0), (0, 1), (1, 0)]);
    assert!(fig.panels().iter().all(|p| p.coefficients().is_none()));
}

#[test]
fn color_scale_is_shared_across_panels() {
    let signals = [sine(64, 1.0), sine(64, 10.0)];
    let fig = render(&signals, &RenderOptions::new()).unwrap();

    let scale = fig.color_scale();
    assert_relative_eq!(scale.min(), -scale.max());
    for panel in fig.panels() {
        assert_eq!(panel.heatmap().color_scale(), scale);
    }
    // the large signal defines the scale
    let small = render(&signals[..1], &RenderOptions::new()).unwrap();
    assert!(scale.max() > small.color_scale().max());
}

#[test]
fn cbar_limit_fixes_the_scale() {
    let fig = render(&[sine(16, 5.0)], &RenderOptions::new().with_cbar_limit(Some(2.0))).unwrap();
    assert_eq!(fig.color_scale().min(), -2.0);
    assert_eq!(fig.color_scale().max(), 2.0);
}

#[test]
fn xyplot_adds_a_coefficient_column() {
    let signals = [sine(16, 1.0), sine(16, 1.0)];
    let opts = RenderOptions::new().with_xyplot(true);
    let fig = render(&signals, &opts).unwrap();

    assert_eq!((fig.nrows(), fig.ncols()), (2, 2));
    let panel = &fig.panels()[1];
    assert_eq!(panel.grid(), (1, 0));
    let plot = panel.coefficients().unwrap();
    assert_eq!(plot.grid(), (1, 1));
    assert_eq!(plot.lines().len(), panel.heatmap().n_rows());
    assert_eq!(plot.labels().first().map(String::as_str), Some("1"));
}

#[test]
fn stationary_heatmap_rows_span_the_signal() {
    let opts = RenderOptions::new()
        .with_decomposition(DecompositionMode::Stationary)
        .with_wavelet(WaveletFilter::Db2)
        .with_level(Some(2));
    let fig = render(&[sine(16, 1.0)], &opts).unwrap();
    let heatmap = fig.panels()[0].heatmap();
    assert_eq!(heatmap.n_rows(), 3);
    assert_eq!(heatmap.cells().len(), 48);
    assert_eq!(heatmap.y_ticks()[0].label, "approx");
}

#[test]
fn failures_propagate_from_the_decomposition() {
    let err = render(&[sine(8, 1.0), Signal::new(Vec::new())], &RenderOptions::new())
        .unwrap_err();
    assert!(matches!(err, FigureError::Heatmap(HeatmapError::EmptySignal)));

    let too_deep = RenderOptions::new().with_level(Some(10));
    let err = render(&[sine(8, 1.0)], &too_deep).unwrap_err();
    assert!(matches!(
        err,
        FigureError::Heatmap(HeatmapError::LevelTooDeep { .. })
    ));
}

#[test]
fn svg_output_draws_every_panel() {
    let signals = [sine(32, 1.0), sine(32, -1.0)];
    let opts = RenderOptions::new().with_cmap(Colormap::Viridis);
    let svg = render(&signals, &opts).unwrap().to_svg().unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("levels"));
    assert!(svg.contains(">0<"));
    assert!(svg.contains(">1<"));
}

#[test]
fn xyplot_svg_renders() {
    let opts = RenderOptions::new().with_xyplot(true).with_level(Some(2));
    let svg = render(&[sine(32, 1.0)], &opts).unwrap().to_svg().unwrap();
    assert!(svg.contains("<polyline"));
}

#[test]
fn save_svg_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.svg");
    render(&[sine(16, 1.0)], &RenderOptions::new())
        .unwrap()
        .save_svg(&path)
        .unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("</svg>"));
}

#[test]
fn save_svg_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("figure.svg");
    let err = render(&[sine(16, 1.0)], &RenderOptions::new())
        .unwrap()
        .save_svg(&path)
        .unwrap_err();
    assert!(matches!(err, FigureError::Io { .. }));
    assert!(err.to_string().contains("figure.svg"));
}

#[test]
fn figure_serializes_to_json() {
    let fig = render(&[sine(8, 1.0)], &RenderOptions::new()).unwrap();
    let json = serde_json::to_value(&fig).unwrap();
    assert_eq!(json["nrows"], 1);
    assert_eq!(json["colormap"], "seismic");
    let panel = &json["panels"][0];
    assert_eq!(panel["title"], "0");
    assert!(panel["heatmap"]["cells"].as_array().unwrap().len() >= 7);
}
