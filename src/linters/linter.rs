#![forbid(unsafe_code)]

//! Core Linter trait and related types for defining and executing linters

use crate::engine::Document;
use crate::types::{LinterName, Location, Severity};
use serde::Serialize;
use std::backtrace::Backtrace;
use std::error::Error;
use std::path::PathBuf;

/// A single diagnostic reported by a linter
///
/// The runner only collects and forwards lints; it never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lint {
    /// Name of the linter that reported this lint
    pub linter: LinterName,

    /// File the lint was found in
    pub file: PathBuf,

    /// Where in the file the lint points
    pub location: Location,

    /// How serious the lint is
    pub severity: Severity,

    /// Human-readable description of the problem
    pub message: String,
}

impl Lint {
    /// Creates a lint for the given document
    pub fn new(
        linter: &LinterName,
        document: &Document,
        location: Location,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            linter: linter.clone(),
            file: document.path().to_path_buf(),
            location,
            severity,
            message: message.into(),
        }
    }
}

/// The failure of a linter's own execution
///
/// Carries the message of what went wrong and the backtrace recorded where it
/// went wrong, one frame per entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LinterFailure {
    message: String,
    backtrace: Vec<String>,
}

impl LinterFailure {
    /// Creates a failure, recording the backtrace of the caller
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            backtrace: capture_backtrace(),
        }
    }

    /// Creates a failure that carries an existing backtrace unchanged
    pub fn with_backtrace(message: impl Into<String>, backtrace: Vec<String>) -> Self {
        Self {
            message: message.into(),
            backtrace,
        }
    }

    /// Creates a failure from an error and its chain of sources
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::new(message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Backtrace frames, outermost call last
    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }
}

/// Records the current backtrace as a list of frame lines
pub(crate) fn capture_backtrace() -> Vec<String> {
    Backtrace::force_capture()
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Trait that all linters must implement
///
/// A linter inspects one document and reports zero or more lints. It may fail,
/// either by returning a [`LinterFailure`] or by panicking; the runner turns
/// both into a [`LinterError`](crate::error::LinterError).
/// The trait is `Send + Sync` so one instance can be shared across files
/// analyzed in parallel.
pub trait Linter: Send + Sync {
    /// Runs the linter against a document
    fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure>;
}
