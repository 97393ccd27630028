//! Check command implementation
//!
//! This module implements the `lintel check` command, which:
//! - Loads configuration from lintel.toml (or `--config`)
//! - Builds the linter registry and applies the linter selection
//! - Discovers files to lint
//! - Runs every active linter on every file
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    self, CommandError, EXIT_ERROR, EXIT_LINTER_CRASH, EXIT_LINTS, EXIT_SUCCESS,
};
use crate::error::{LinterError, RunnerError};
use crate::linters::LinterRegistry;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::runner::{RunReport, Runner};
use std::path::PathBuf;

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub paths: Vec<PathBuf>,
    pub include_linters: Vec<String>,
    pub exclude_linters: Vec<String>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub parallel: bool,
    pub color: ColorChoice,
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: no lints
/// - 1: at least one lint was reported
/// - 2: error (I/O, no files, no linters)
/// - 3: invalid configuration
/// - 4: a linter crashed
pub fn run_check(options: &CheckOptions) -> i32 {
    match run_check_inner(options) {
        Ok(report) => {
            if let Err(e) = print_report(options, &report) {
                eprintln!("Error: {}", e);
                return EXIT_ERROR;
            }

            if report.is_clean() {
                EXIT_SUCCESS
            } else {
                EXIT_LINTS
            }
        }
        Err(CommandError::Runner(RunnerError::Linter(error))) => {
            print_linter_error(options, &error);
            EXIT_LINTER_CRASH
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_check_inner(options: &CheckOptions) -> Result<RunReport, CommandError> {
    let config = common::load_config(options.config.as_deref())?;
    let runner_config = common::runner_config(
        &config,
        &options.include_linters,
        &options.exclude_linters,
    )?;
    let registry = LinterRegistry::from_config(&config)?;

    for name in options.include_linters.iter().chain(&options.exclude_linters) {
        if !registry.names().any(|registered| registered.as_str() == name) {
            tracing::warn!(linter = %name, "no linter with this name is registered");
        }
    }

    let files = common::collect_files(&options.paths, &config)?;
    let runner = Runner::new(&registry, &runner_config);

    tracing::info!(
        files = files.len(),
        linters = runner.linter_count(),
        parallel = options.parallel,
        "checking"
    );

    let report = if options.parallel {
        runner.run_parallel(&files)?
    } else {
        runner.run(&files)?
    };

    Ok(report)
}

fn print_report(options: &CheckOptions, report: &RunReport) -> std::io::Result<()> {
    match options.format {
        OutputFormat::Human => {
            HumanFormatter::new(common::stdout_color(options.color)).write_to_stdout(report)
        }
        OutputFormat::Jsonl => {
            JsonlFormatter::new().write_to_stdout(report);
            Ok(())
        }
    }
}

fn print_linter_error(options: &CheckOptions, error: &LinterError) {
    match options.format {
        OutputFormat::Human => {
            let formatter = HumanFormatter::new(common::stderr_color(options.color));
            if formatter.write_error_to_stderr(error).is_err() {
                eprintln!("Error: {}", error);
            }
        }
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format_linter_error(error)),
    }
}
