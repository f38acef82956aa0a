use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "dwtviz",
    "dwtviz_figure",
    "dwtviz_gp",
    "dwtviz_heatmap",
    "dwtviz_wavelet",
];

/// Maps `-v` occurrences to a level: none -> warn, `-v` -> info,
/// `-vv` -> debug, `-vvv` and above -> trace.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `target=level` directives for every workspace crate.
fn directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber, logging to stderr.
///
/// `RUST_LOG` overrides the verbosity flag when set.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
