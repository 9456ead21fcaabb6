// logscrub/src/main.rs
//! logscrub entry point.
//!
//! Parses the CLI, initializes logging, and dispatches to the subcommand
//! implementations in `commands`.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use logscrub::cli::{Cli, Commands};
use logscrub::{commands, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level_override = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level_override);

    match &cli.command {
        Commands::Sanitize(args) => commands::sanitize::run(args, cli.quiet),
        Commands::Scan(args) => commands::scan::run(args, cli.quiet),
    }
}
