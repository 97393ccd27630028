#![forbid(unsafe_code)]

//! Lintel: a pluggable lint runner
//!
//! Lintel selects a subset of registered linters, applies each of them to a set
//! of files and collects the lints they report. A linter that fails while
//! analyzing a file is surfaced as a [`LinterError`] that names the file and
//! keeps the backtrace of the original failure.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod linters;
pub mod output;
pub mod runner;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, EngineError, LinterError, RegistryError, RunnerError};

// Re-export core domain types for convenient access
pub use engine::{Document, Engine, SourceEngine};
pub use linters::{Lint, Linter, LinterFailure, LinterRegistry};
pub use runner::{RunReport, Runner, RunnerConfig};
pub use types::{GlobPattern, LinterName, Location, Severity};
