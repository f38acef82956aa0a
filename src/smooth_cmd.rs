//! Smooth command: Gaussian-process smoothing followed by heatmap rendering.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use dwtviz_figure::render_smoothed;

use crate::cli::SmoothArgs;
use crate::config::DwtvizConfig;
use crate::render_cmd::{output_path, write_figure};
use crate::{convert, input};

/// Run the smoothing pipeline.
pub fn run(args: SmoothArgs) -> Result<()> {
    let _cmd = info_span!("smooth").entered();

    let mut config = DwtvizConfig::load(args.config.as_deref())?;
    convert::apply_heatmap_args(&mut config.render, &args.heatmap);
    convert::apply_smooth_args(&mut config.smooth, &args);
    let options = convert::build_render_options(&config.render)?;
    let smooth = convert::build_smooth_config(&config.smooth)?;

    info!(path = %args.input.display(), "reading observations");
    let signals = input::read_observations(&args.input)?;
    info!(
        n_signals = signals.len(),
        samples = smooth.samples(),
        truncate = smooth.truncate(),
        "observations loaded"
    );

    let figure = render_smoothed(&signals, &smooth, &options, config.smooth.xseconds)
        .context("failed to render smoothed figure")?;
    let output = output_path(&args.input, args.output);
    write_figure(&figure, &output, args.layout_json.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::HeatmapArgs;

    fn args(dir: &std::path::Path, input: &str) -> SmoothArgs {
        let path = dir.join("obs.json");
        std::fs::write(&path, input).unwrap();
        let config = dir.join("dwtviz.toml");
        std::fs::write(
            &config,
            "[smooth]\nn_restarts = 1\nthreads = 1\n\n\
             [[smooth.kernel]]\nconstant = 1.0\nlength_scale = 2.0\nlength_bounds = [0.5, 20.0]\n",
        )
        .unwrap();
        SmoothArgs {
            input: path,
            config: Some(config),
            output: Some(dir.join("smoothed.svg")),
            length: None,
            samples: Some(4),
            truncate: false,
            xseconds: true,
            seed: Some(7),
            layout_json: None,
            heatmap: HeatmapArgs::default(),
        }
    }

    #[test]
    fn writes_the_smoothed_figure() {
        let dir = tempfile::tempdir().unwrap();
        let input = r#"{"x": [0, 1, 2.5, 4, 5, 7, 8, 10], "y": [0, 0.8, 0.6, -0.7, -1, 0.6, 1, -0.5]}"#;
        run(args(dir.path(), input)).unwrap();
        let svg = std::fs::read_to_string(dir.path().join("smoothed.svg")).unwrap();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("0:00:10"));
    }

    #[test]
    fn plain_arrays_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path(), "[1, 2, 3]")).unwrap_err();
        assert!(err.to_string().contains("no x coordinates"));
    }
}
