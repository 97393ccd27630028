#![forbid(unsafe_code)]

//! Formatters for the `lintel list` command
//!
//! Shows every registered linter, where it came from, and whether the
//! current selection would run it.

use serde::Serialize;

/// Where a linter was registered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinterSource {
    Builtin,
    Pattern,
}

impl LinterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinterSource::Builtin => "builtin",
            LinterSource::Pattern => "pattern",
        }
    }
}

/// Listing entry for one registered linter
#[derive(Debug, Clone)]
pub struct LinterStatus {
    pub name: String,
    pub description: String,
    pub source: LinterSource,
    pub enabled: bool,
}

/// Human-readable formatter for the linter listing
#[derive(Debug, Default)]
pub struct LinterListHumanFormatter;

impl LinterListHumanFormatter {
    pub fn new() -> Self {
        LinterListHumanFormatter
    }

    pub fn format(&self, statuses: &[LinterStatus]) -> String {
        let enabled = statuses.iter().filter(|s| s.enabled).count();
        let mut output = format!("Linters ({} of {} enabled):\n\n", enabled, statuses.len());

        for status in statuses {
            let marker = if status.enabled { "✓" } else { "-" };
            output.push_str(&format!(
                "{} {} ({})\n",
                marker,
                status.name,
                status.source.as_str()
            ));
            output.push_str(&format!("    {}\n", status.description));
        }

        output
    }

    pub fn write_to_stdout(&self, statuses: &[LinterStatus]) {
        print!("{}", self.format(statuses));
    }
}

#[derive(Debug, Serialize)]
struct JsonlLinterStatus<'a> {
    name: &'a str,
    source: &'static str,
    description: &'a str,
    enabled: bool,
}

/// JSONL formatter for the linter listing, one object per linter
#[derive(Debug, Default)]
pub struct LinterListJsonlFormatter;

impl LinterListJsonlFormatter {
    pub fn new() -> Self {
        LinterListJsonlFormatter
    }

    pub fn format(&self, statuses: &[LinterStatus]) -> String {
        let mut output = String::new();

        for status in statuses {
            let record = JsonlLinterStatus {
                name: &status.name,
                source: status.source.as_str(),
                description: &status.description,
                enabled: status.enabled,
            };

            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        output
    }

    pub fn write_to_stdout(&self, statuses: &[LinterStatus]) {
        print!("{}", self.format(statuses));
    }
}
