//! Error types for Lintel
//!
//! This module defines the error types used throughout Lintel, one enum per
//! concern, with the runner's error type sitting on top.

use crate::linters::LinterFailure;
use crate::types::LinterName;
use std::path::{Path, PathBuf};

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML or has the wrong shape
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but contains invalid values
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Errors raised while registering linters
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two linters were registered under the same name
    #[error("Linter '{0}' is already registered")]
    Duplicate(LinterName),

    /// A linter name does not satisfy the naming rules
    #[error("Invalid linter name: '{0}'")]
    InvalidName(String),

    /// A pattern linter carries a regex that does not compile
    #[error("Invalid pattern for linter '{name}': {message}")]
    InvalidPattern { name: String, message: String },
}

/// Errors raised by an engine while turning a file into a document
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but cannot be analyzed
    #[error("Malformed input in {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

impl EngineError {
    /// Path of the file the engine failed on
    pub fn path(&self) -> &Path {
        match self {
            EngineError::Read { path, .. } | EngineError::Malformed { path, .. } => path,
        }
    }
}

/// A linter failed while analyzing a file
///
/// The original failure is kept as the error source, so its backtrace is the
/// one recorded where the linter actually failed.
#[derive(Debug, thiserror::Error)]
#[error("{linter} raised an unexpected error while linting {}: {source}", .file.display())]
pub struct LinterError {
    linter: LinterName,
    file: PathBuf,
    #[source]
    source: LinterFailure,
}

impl LinterError {
    /// Wraps a linter failure with the linter name and the file being analyzed
    pub fn new(linter: LinterName, file: impl Into<PathBuf>, source: LinterFailure) -> Self {
        Self {
            linter,
            file: file.into(),
            source,
        }
    }

    /// Name of the linter that failed
    pub fn linter(&self) -> &LinterName {
        &self.linter
    }

    /// File the linter was analyzing
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The wrapped failure
    pub fn failure(&self) -> &LinterFailure {
        &self.source
    }

    /// Backtrace of the original failure, frame by frame
    pub fn backtrace(&self) -> &[String] {
        self.source.backtrace()
    }
}

/// Errors returned by [`Runner::run`](crate::runner::Runner::run)
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// `run` was called without any file
    #[error("No files specified")]
    NoFilesSpecified,

    /// Every linter was filtered out by the configuration
    #[error("No linters are active")]
    NoLintersActive,

    /// The engine could not build a document
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A linter failed
    #[error(transparent)]
    Linter(#[from] LinterError),
}
