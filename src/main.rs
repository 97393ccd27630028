//! Lintel CLI entry point

use clap::Parser;
use lintel::cli::check::{CheckOptions, run_check};
use lintel::cli::init::{InitOutcome, run_init};
use lintel::cli::list::run_list;
use lintel::cli::{Cli, Command};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "LINTEL_LOG";

fn init_logging(verbose: u8) {
    // -v > LINTEL_LOG > default "warn"
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("lintel=debug"),
        _ => EnvFilter::new("lintel=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Init { force } => match run_init(force) {
            Ok(InitOutcome::Created) => {
                println!("Created lintel.toml.");
                0
            }
            Ok(InitOutcome::Overwritten) => {
                println!("Overwrote lintel.toml.");
                0
            }
            Ok(InitOutcome::Skipped) => {
                println!("lintel.toml already exists. Use --force to overwrite it.");
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
        Command::Check {
            paths,
            include_linter,
            exclude_linter,
            format,
            config,
            parallel,
        } => run_check(&CheckOptions {
            paths,
            include_linters: include_linter,
            exclude_linters: exclude_linter,
            format,
            config,
            parallel,
            color: cli.color,
        }),
        Command::List { format, config } => run_list(format, config),
    };

    process::exit(exit_code);
}
