#![forbid(unsafe_code)]

//! Built-in linters
//!
//! These linters work line by line on the raw document text, so they need no
//! parser. Each one exposes its registered name as `NAME`.

use crate::engine::Document;
use crate::error::RegistryError;
use crate::linters::{Lint, Linter, LinterFailure, LinterRegistry};
use crate::types::{LinterName, Location, Severity};

/// Default maximum line length, in characters
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Settings that tune the builtin linters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSettings {
    pub max_line_length: usize,
}

impl Default for BuiltinSettings {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Register every builtin linter, in their canonical order
pub fn register_builtins(
    registry: &mut LinterRegistry,
    settings: &BuiltinSettings,
) -> Result<(), RegistryError> {
    registry.register(
        TrailingWhitespace::NAME,
        "Lines must not end with spaces or tabs",
        |name| Box::new(TrailingWhitespace::new(name.clone())),
    )?;
    registry.register(
        FinalNewline::NAME,
        "Files must end with a newline",
        |name| Box::new(FinalNewline::new(name.clone())),
    )?;

    let max = settings.max_line_length;
    registry.register(
        LineLength::NAME,
        format!("Lines must not be longer than {} characters", max),
        move |name| Box::new(LineLength::new(name.clone(), max)),
    )?;

    registry.register(
        ImportantRule::NAME,
        "Declarations must not use !important",
        |name| Box::new(ImportantRule::new(name.clone())),
    )?;
    Ok(())
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Reports lines that end with whitespace
#[derive(Debug)]
pub struct TrailingWhitespace {
    name: LinterName,
}

impl TrailingWhitespace {
    pub const NAME: &'static str = "TrailingWhitespace";

    pub fn new(name: LinterName) -> Self {
        Self { name }
    }
}

impl Linter for TrailingWhitespace {
    fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
        let mut lints = Vec::new();

        for (line_number, line) in document.lines() {
            let trimmed = line.trim_end_matches([' ', '\t']);
            if trimmed.len() == line.len() {
                continue;
            }

            let column = saturating_u32(trimmed.chars().count()).saturating_add(1);
            let length = saturating_u32(line.len() - trimmed.len());
            lints.push(Lint::new(
                &self.name,
                document,
                Location::new(line_number, column, length),
                Severity::Warning,
                "Line contains trailing whitespace",
            ));
        }

        Ok(lints)
    }
}

/// Reports a non-empty file whose last line has no newline
#[derive(Debug)]
pub struct FinalNewline {
    name: LinterName,
}

impl FinalNewline {
    pub const NAME: &'static str = "FinalNewline";

    pub fn new(name: LinterName) -> Self {
        Self { name }
    }
}

impl Linter for FinalNewline {
    fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
        let contents = document.contents();
        if contents.is_empty() || contents.ends_with('\n') {
            return Ok(vec![]);
        }

        let location = document.location_of(contents.len(), 0);
        Ok(vec![Lint::new(
            &self.name,
            document,
            location,
            Severity::Warning,
            "Files should end with a trailing newline",
        )])
    }
}

/// Reports lines longer than a maximum number of characters
#[derive(Debug)]
pub struct LineLength {
    name: LinterName,
    max: usize,
}

impl LineLength {
    pub const NAME: &'static str = "LineLength";

    pub fn new(name: LinterName, max: usize) -> Self {
        Self { name, max }
    }
}

impl Linter for LineLength {
    fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
        let mut lints = Vec::new();

        for (line_number, line) in document.lines() {
            let length = line.chars().count();
            if length <= self.max {
                continue;
            }

            lints.push(Lint::new(
                &self.name,
                document,
                Location::new(
                    line_number,
                    saturating_u32(self.max).saturating_add(1),
                    saturating_u32(length - self.max),
                ),
                Severity::Warning,
                format!(
                    "Line should be at most {} characters wide, but was {}",
                    self.max, length
                ),
            ));
        }

        Ok(lints)
    }
}

/// Reports uses of `!important`
#[derive(Debug)]
pub struct ImportantRule {
    name: LinterName,
}

impl ImportantRule {
    pub const NAME: &'static str = "ImportantRule";

    pub fn new(name: LinterName) -> Self {
        Self { name }
    }
}

impl Linter for ImportantRule {
    fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
        const NEEDLE: &str = "!important";

        let lints = document
            .contents()
            .match_indices(NEEDLE)
            .map(|(offset, _)| {
                Lint::new(
                    &self.name,
                    document,
                    document.location_of(offset, NEEDLE.len()),
                    Severity::Warning,
                    "!important should not be used",
                )
            })
            .collect();

        Ok(lints)
    }
}
