//! Render command: decompose signals and write their heatmap figure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use dwtviz_figure::{Figure, render};

use crate::cli::RenderArgs;
use crate::config::DwtvizConfig;
use crate::convert;
use crate::input;

/// Run the render pipeline.
pub fn run(args: RenderArgs) -> Result<()> {
    let _cmd = info_span!("render").entered();

    let mut config = DwtvizConfig::load(args.config.as_deref())?;
    convert::apply_heatmap_args(&mut config.render, &args.heatmap);
    let options = convert::build_render_options(&config.render)?;

    info!(path = %args.input.display(), "reading signals");
    let signals = input::read_signals(&args.input)?;
    info!(n_signals = signals.len(), "signals loaded");

    let figure = render(&signals, &options).context("failed to render figure")?;
    let output = output_path(&args.input, args.output);
    write_figure(&figure, &output, args.layout_json.as_deref())
}

/// Defaults the figure path to the input path with an `.svg` extension.
pub fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| input.with_extension("svg"))
}

/// Writes the SVG figure and, when requested, its JSON layout.
pub fn write_figure(figure: &Figure, output: &Path, layout_json: Option<&Path>) -> Result<()> {
    figure.save_svg(output)?;
    if let Some(path) = layout_json {
        let json = serde_json::to_string_pretty(figure).context("failed to serialize layout")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write layout: {}", path.display()))?;
        info!(path = %path.display(), "layout written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::HeatmapArgs;

    fn args(dir: &Path, input: &str) -> RenderArgs {
        let path = dir.join("signals.json");
        std::fs::write(&path, input).unwrap();
        RenderArgs {
            input: path,
            config: None,
            output: None,
            layout_json: Some(dir.join("layout.json")),
            heatmap: HeatmapArgs::default(),
        }
    }

    #[test]
    fn output_defaults_to_svg_next_to_input() {
        let out = output_path(Path::new("data/run.json"), None);
        assert_eq!(out, PathBuf::from("data/run.svg"));
        let out = output_path(Path::new("run.json"), Some(PathBuf::from("fig.svg")));
        assert_eq!(out, PathBuf::from("fig.svg"));
    }

    #[test]
    fn writes_svg_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        run(args(dir.path(), "[[1, 2, 3, 4, 5, 6, 7, 8], [8, 7, 6, 5, 4, 3, 2, 1]]")).unwrap();

        let svg = std::fs::read_to_string(dir.path().join("signals.svg")).unwrap();
        assert!(svg.contains("<svg"));
        let layout: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("layout.json")).unwrap())
                .unwrap();
        assert_eq!(layout["panels"].as_array().unwrap().len(), 2);
        assert_eq!(layout["panels"][0]["heatmap"]["y_ticks"][0]["label"], "3");
    }

    #[test]
    fn config_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("dwtviz.toml");
        std::fs::write(&config, "[render]\nlevel = 1\n").unwrap();
        let mut a = args(dir.path(), "[1, 2, 3, 4, 5, 6, 7, 8]");
        a.config = Some(config);
        run(a).unwrap();

        let layout: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("layout.json")).unwrap())
                .unwrap();
        assert_eq!(layout["panels"][0]["heatmap"]["y_ticks"][0]["label"], "approx");
    }

    #[test]
    fn empty_signal_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path(), "[[1, 2], []]")).unwrap_err();
        assert!(format!("{err:#}").contains("signal is empty"));
        assert!(!dir.path().join("signals.svg").exists());
    }

    #[test]
    fn bare_empty_array_reports_empty_signal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path(), "[]")).unwrap_err();
        assert!(format!("{err:#}").contains("signal is empty"));
        assert!(!dir.path().join("signals.svg").exists());
    }
}
