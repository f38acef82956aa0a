use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dwtviz wavelet coefficient heatmaps.
#[derive(Parser)]
#[command(
    name = "dwtviz",
    version,
    about = "Wavelet coefficient heatmaps for one or more signals"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Decompose signals and draw their coefficient heatmaps.
    Render(RenderArgs),
    /// Smooth irregularly sampled signals with Gaussian processes, then render.
    Smooth(SmoothArgs),
}

/// Heatmap options shared by both subcommands. Unset flags fall back to
/// the `[render]` section of the config file.
#[derive(clap::Args, Debug, Default)]
pub struct HeatmapArgs {
    /// Wavelet filter name (haar, db1..db4, sym4, d4, d6, d8, la8).
    #[arg(long)]
    pub wavelet: Option<String>,

    /// Decomposition depth; the maximum when omitted.
    #[arg(long)]
    pub level: Option<usize>,

    /// Show the approximation band.
    #[arg(long, conflicts_with = "no_approx")]
    pub approx: bool,

    /// Hide the approximation band.
    #[arg(long = "no-approx")]
    pub no_approx: bool,

    /// Colormap name (seismic, bwr, coolwarm, blues, greys, viridis).
    #[arg(long)]
    pub cmap: Option<String>,

    /// Decomposition mode (dwt, swt, sdwt).
    #[arg(long)]
    pub decomposition: Option<String>,

    /// Fix the color scale to [-limit, limit].
    #[arg(long = "cbar-limit")]
    pub cbar_limit: Option<f64>,

    /// Draw per-level coefficient line plots.
    #[arg(long)]
    pub xyplot: bool,

    /// Hide heatmap x-ticks.
    #[arg(long = "no-xticks")]
    pub no_xticks: bool,

    /// Hide heatmap y-ticks.
    #[arg(long = "no-yticks")]
    pub no_yticks: bool,

    /// Hide the signal-index titles.
    #[arg(long = "no-index")]
    pub no_index: bool,
}

impl HeatmapArgs {
    /// Returns the approximation override, if either flag was given.
    pub fn approx_override(&self) -> Option<bool> {
        match (self.approx, self.no_approx) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Arguments for the `render` subcommand.
#[derive(clap::Args)]
pub struct RenderArgs {
    /// Path to the signals JSON file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output SVG path; defaults to the input path with an .svg extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the figure layout as JSON.
    #[arg(long = "layout-json")]
    pub layout_json: Option<PathBuf>,

    #[command(flatten)]
    pub heatmap: HeatmapArgs,
}

/// Arguments for the `smooth` subcommand.
#[derive(clap::Args)]
pub struct SmoothArgs {
    /// Path to the signals JSON file; every signal needs x coordinates.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output SVG path; defaults to the input path with an .svg extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target length of the prediction grid; the largest x when omitted.
    #[arg(long)]
    pub length: Option<f64>,

    /// Prediction grid exponent: 2^samples points.
    #[arg(long)]
    pub samples: Option<u32>,

    /// Truncate each prediction to the span of its observations.
    #[arg(long)]
    pub truncate: bool,

    /// Label x-ticks as durations in seconds.
    #[arg(long)]
    pub xseconds: bool,

    /// Override the optimizer restart seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Also write the figure layout as JSON.
    #[arg(long = "layout-json")]
    pub layout_json: Option<PathBuf>,

    #[command(flatten)]
    pub heatmap: HeatmapArgs,
}
