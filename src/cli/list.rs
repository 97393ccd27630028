//! List command implementation
//!
//! This module implements the `lintel list` command, which shows every
//! registered linter in execution order, where it was registered from, and
//! whether the configured linter selection runs it.

use crate::cli::args::OutputFormat;
use crate::cli::common::{self, CommandError, EXIT_SUCCESS};
use crate::config::Config;
use crate::linters::LinterRegistry;
use crate::output::{LinterListHumanFormatter, LinterListJsonlFormatter, LinterSource, LinterStatus};
use crate::runner::{Runner, RunnerConfig};
use std::collections::HashSet;
use std::path::PathBuf;

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Invalid configuration
pub fn run_list(format: OutputFormat, config: Option<PathBuf>) -> i32 {
    match run_list_inner(config) {
        Ok(statuses) => {
            match format {
                OutputFormat::Human => LinterListHumanFormatter::new().write_to_stdout(&statuses),
                OutputFormat::Jsonl => LinterListJsonlFormatter::new().write_to_stdout(&statuses),
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_list_inner(config_path: Option<PathBuf>) -> Result<Vec<LinterStatus>, CommandError> {
    let config = common::load_config(config_path.as_deref())?;
    let registry = LinterRegistry::from_config(&config)?;
    Ok(build_linter_statuses(&registry, &config, &config.runner_config()))
}

/// Describe every registered linter, in registration order
fn build_linter_statuses(
    registry: &LinterRegistry,
    config: &Config,
    runner_config: &RunnerConfig,
) -> Vec<LinterStatus> {
    let runner = Runner::new(registry, runner_config);
    let enabled: HashSet<_> = runner.linter_names().into_iter().cloned().collect();
    let patterns: HashSet<_> = config.patterns.iter().map(|p| &p.name).collect();

    registry
        .descriptors()
        .iter()
        .map(|descriptor| LinterStatus {
            name: descriptor.name().to_string(),
            description: descriptor.description().to_string(),
            source: if patterns.contains(descriptor.name()) {
                LinterSource::Pattern
            } else {
                LinterSource::Builtin
            },
            enabled: enabled.contains(descriptor.name()),
        })
        .collect()
}
