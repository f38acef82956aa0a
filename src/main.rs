mod cli;
mod config;
mod convert;
mod input;
mod logging;
mod render_cmd;
mod smooth_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render(args) => render_cmd::run(args),
        Command::Smooth(args) => smooth_cmd::run(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::try_parse_from([
            "dwtviz",
            "-vv",
            "render",
            "--input",
            "s.json",
            "--level",
            "2",
            "--no-approx",
            "--cbar-limit",
            "3.5",
            "--no-xticks",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.heatmap.level, Some(2));
        assert_eq!(args.heatmap.approx_override(), Some(false));
        assert_eq!(args.heatmap.cbar_limit, Some(3.5));
        assert!(args.heatmap.no_xticks);
    }

    #[test]
    fn approx_flags_conflict() {
        let result = Cli::try_parse_from([
            "dwtviz", "render", "--input", "s.json", "--approx", "--no-approx",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn smooth_flags_parse() {
        let cli = Cli::try_parse_from([
            "dwtviz",
            "smooth",
            "-i",
            "obs.json",
            "--samples",
            "6",
            "--truncate",
            "--xseconds",
            "--decomposition",
            "swt",
        ])
        .unwrap();
        let Command::Smooth(args) = cli.command else {
            panic!("expected smooth");
        };
        assert_eq!(args.samples, Some(6));
        assert!(args.truncate && args.xseconds);
        assert_eq!(args.heatmap.decomposition.as_deref(), Some("swt"));
    }
}
