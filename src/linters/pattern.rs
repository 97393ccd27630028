#![forbid(unsafe_code)]

//! Regex-based linters declared in the configuration file
//!
//! Every `[[pattern]]` entry becomes a PatternLinter that reports each match
//! of its regular expression.

use crate::config::PatternDefinition;
use crate::engine::Document;
use crate::error::RegistryError;
use crate::linters::{Lint, Linter, LinterFailure, LinterRegistry};
use crate::types::{LinterName, Severity};
use regex::Regex;

/// A linter that reports every match of a regular expression
pub struct PatternLinter {
    name: LinterName,
    pattern: Regex,
    message: String,
    severity: Severity,
}

impl std::fmt::Debug for PatternLinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternLinter")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("message", &self.message)
            .field("severity", &self.severity)
            .finish()
    }
}

impl PatternLinter {
    pub fn new(name: LinterName, pattern: Regex, message: String, severity: Severity) -> Self {
        Self {
            name,
            pattern,
            message,
            severity,
        }
    }
}

impl Linter for PatternLinter {
    fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
        let lints = self
            .pattern
            .find_iter(document.contents())
            .map(|found| {
                Lint::new(
                    &self.name,
                    document,
                    document.location_of(found.start(), found.len()),
                    self.severity,
                    self.message.clone(),
                )
            })
            .collect();

        Ok(lints)
    }
}

/// Compile a pattern definition's regex
///
/// # Errors
///
/// Returns `RegistryError::InvalidPattern` if the regex does not compile.
pub fn compile(definition: &PatternDefinition) -> Result<Regex, RegistryError> {
    Regex::new(&definition.pattern).map_err(|e| RegistryError::InvalidPattern {
        name: definition.name.to_string(),
        message: e.to_string(),
    })
}

/// Register one PatternLinter per definition, in order
pub fn register_patterns(
    registry: &mut LinterRegistry,
    definitions: &[PatternDefinition],
) -> Result<(), RegistryError> {
    for definition in definitions {
        let regex = compile(definition)?;
        let message = definition
            .message
            .clone()
            .unwrap_or_else(|| format!("Matches forbidden pattern `{}`", definition.pattern));
        let description = format!("Reports matches of `{}`", definition.pattern);
        let severity = definition.severity;

        registry.register(definition.name.as_str(), description, move |name| {
            Box::new(PatternLinter::new(
                name.clone(),
                regex.clone(),
                message.clone(),
                severity,
            ))
        })?;
    }

    Ok(())
}
