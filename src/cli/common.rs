//! Common helper functions shared across CLI commands
//!
//! Loading configuration, applying command-line overrides, and mapping
//! failures to exit codes.

use crate::cli::args::ColorChoice;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::engine::file_walker::{FileFilter, FileWalkerError, discover_files};
use crate::error::{ConfigError, RegistryError, RunnerError};
use crate::runner::RunnerConfig;
use crate::types::LinterName;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_LINTS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_CONFIG_ERROR: i32 = 3;
pub const EXIT_LINTER_CRASH: i32 = 4;

/// Failures shared by the `check` and `list` commands
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("File discovery error: {0}")]
    FileWalker(#[from] FileWalkerError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            CommandError::Config(_) | CommandError::Registry(_) => EXIT_CONFIG_ERROR,
            CommandError::Runner(RunnerError::Linter(_)) => EXIT_LINTER_CRASH,
            _ => EXIT_ERROR,
        }
    }
}

/// Load the configuration file
///
/// An explicit `--config` path must exist. Without one, `lintel.toml` in the
/// working directory is used when present and defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(CONFIG_FILE_NAME),
    }
}

/// Build the linter selection from the configuration and the
/// `--include-linter`/`--exclude-linter` flags
///
/// A flag that is given replaces the configured list of the same kind.
pub(crate) fn runner_config(
    config: &Config,
    include: &[String],
    exclude: &[String],
) -> Result<RunnerConfig, ConfigError> {
    let mut runner_config = config.runner_config();

    if !include.is_empty() {
        runner_config = runner_config.include(parse_linter_names(include)?);
    }
    if !exclude.is_empty() {
        runner_config = runner_config.exclude(parse_linter_names(exclude)?);
    }

    Ok(runner_config)
}

fn parse_linter_names(names: &[String]) -> Result<Vec<LinterName>, ConfigError> {
    names
        .iter()
        .map(|name| {
            LinterName::new(name.as_str()).ok_or_else(|| {
                ConfigError::Validation(format!("Invalid linter name '{}'", name))
            })
        })
        .collect()
}

/// Resolve command-line paths into the sorted list of files to lint
pub(crate) fn collect_files(
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let filter = FileFilter::new(&config.lintel.include, &config.lintel.exclude)?;
    discover_files(paths, &filter)
}

/// Resolve the `--color` flag for a stream
pub(crate) fn color_choice(choice: ColorChoice, is_terminal: bool) -> termcolor::ColorChoice {
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if is_terminal => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}

/// Resolve the `--color` flag for stdout
pub(crate) fn stdout_color(choice: ColorChoice) -> termcolor::ColorChoice {
    color_choice(choice, io::stdout().is_terminal())
}

/// Resolve the `--color` flag for stderr
pub(crate) fn stderr_color(choice: ColorChoice) -> termcolor::ColorChoice {
    color_choice(choice, io::stderr().is_terminal())
}
