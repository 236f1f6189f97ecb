use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::{Cli, Command};
use config::FileConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let file_config = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Distances {
            svg,
            format,
            network,
        } => commands::distances::run(&svg, format, &file_config, &network),
        Command::Inspect { svg, network } => commands::inspect::run(&svg, &file_config, &network),
        Command::Export {
            svg,
            output,
            network,
        } => commands::export::run(&svg, output.as_deref(), &file_config, &network),
        Command::Route {
            svg,
            from,
            to,
            output,
            network,
        } => commands::route::run(&svg, &from, &to, output.as_deref(), &file_config, &network),
    }
}

/// Logs go to stderr so reports on stdout stay machine readable.
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
