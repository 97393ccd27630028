#![forbid(unsafe_code)]

//! Core domain types for Lintel

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lint severity levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

impl Severity {
    /// Single-letter tag used in human output
    pub fn short(&self) -> &'static str {
        match self {
            Severity::Warning => "W",
            Severity::Error => "E",
        }
    }
}

/// A validated linter name
///
/// Linter names must be non-empty and contain only alphanumeric characters,
/// hyphens, and underscores. Names are compared exactly, including case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinterName(String);

impl LinterName {
    /// Creates a new LinterName, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(LinterName(name))
    }

    /// Returns the linter name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LinterName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LinterName::new(value.clone()).ok_or_else(|| format!("Invalid linter name '{}'", value))
    }
}

impl From<LinterName> for String {
    fn from(name: LinterName) -> Self {
        name.0
    }
}

/// Position of a lint inside a file
///
/// Line and column are 1-indexed; `length` is the number of characters the
/// lint covers, 0 when it points at a position rather than a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub length: u32,
}

impl Location {
    pub fn new(line: u32, column: u32, length: u32) -> Self {
        Self {
            line,
            column,
            length,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}
