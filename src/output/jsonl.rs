#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line:
//! 1. One lint record per lint, in report order
//! 2. One summary record

use crate::error::LinterError;
use crate::runner::RunReport;
use crate::types::Severity;
use serde::Serialize;
use std::borrow::Cow;

/// JSONL output formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a run report as JSONL
    pub fn format(&self, report: &RunReport) -> String {
        let mut output = String::new();

        for lint in &report.lints {
            push_record(
                &mut output,
                &LintRecord {
                    record_type: "lint",
                    linter: lint.linter.as_str(),
                    file: lint.file.to_string_lossy(),
                    line: lint.location.line,
                    column: lint.location.column,
                    length: lint.location.length,
                    severity: lint.severity,
                    message: &lint.message,
                },
            );
        }

        push_record(
            &mut output,
            &SummaryRecord {
                record_type: "summary",
                passed: report.is_clean(),
                files_checked: report.files_checked as u64,
                linters_run: report.linters_run as u64,
                total_lints: report.lints.len() as u64,
            },
        );

        output
    }

    /// Format a linter crash as a single error record
    pub fn format_linter_error(&self, error: &LinterError) -> String {
        let mut output = String::new();
        push_record(
            &mut output,
            &ErrorRecord {
                record_type: "error",
                linter: error.linter().as_str(),
                file: error.file().to_string_lossy(),
                message: error.to_string(),
                backtrace: error.backtrace(),
            },
        );
        output
    }

    /// Print a run report to stdout
    pub fn write_to_stdout(&self, report: &RunReport) {
        print!("{}", self.format(report));
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// Lint record for JSONL output
#[derive(Debug, Serialize)]
struct LintRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    linter: &'a str,
    file: Cow<'a, str>,
    line: u32,
    column: u32,
    length: u32,
    severity: Severity,
    message: &'a str,
}

/// Summary record for JSONL output
#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    linters_run: u64,
    total_lints: u64,
}

/// Linter crash record for JSONL output
#[derive(Debug, Serialize)]
struct ErrorRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    linter: &'a str,
    file: Cow<'a, str>,
    message: String,
    backtrace: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linters::{Lint, LinterFailure};
    use crate::types::{LinterName, Location};
    use serde_json::Value;
    use std::path::PathBuf;

    fn parse_lines(output: &str) -> Vec<Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_format_clean_report() {
        let report = RunReport {
            lints: vec![],
            files_checked: 3,
            linters_run: 4,
        };

        let records = parse_lines(&JsonlFormatter::new().format(&report));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "summary");
        assert_eq!(records[0]["passed"], true);
        assert_eq!(records[0]["files_checked"], 3);
        assert_eq!(records[0]["linters_run"], 4);
        assert_eq!(records[0]["total_lints"], 0);
    }

    #[test]
    fn test_format_lints_then_summary() {
        let report = RunReport {
            lints: vec![Lint {
                linter: LinterName::new("LineLength").unwrap(),
                file: PathBuf::from("a.scss"),
                location: Location::new(2, 81, 4),
                severity: Severity::Warning,
                message: "too long".to_string(),
            }],
            files_checked: 1,
            linters_run: 1,
        };

        let records = parse_lines(&JsonlFormatter::new().format(&report));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "lint");
        assert_eq!(records[0]["linter"], "LineLength");
        assert_eq!(records[0]["file"], "a.scss");
        assert_eq!(records[0]["line"], 2);
        assert_eq!(records[0]["column"], 81);
        assert_eq!(records[0]["length"], 4);
        assert_eq!(records[0]["severity"], "warning");
        assert_eq!(records[1]["type"], "summary");
        assert_eq!(records[1]["passed"], false);
    }

    #[cfg(unix)]
    #[test]
    fn test_format_keeps_lint_for_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = PathBuf::from(OsStr::from_bytes(b"bad\xff.scss"));
        let report = RunReport {
            lints: vec![Lint {
                linter: LinterName::new("TrailingWhitespace").unwrap(),
                file,
                location: Location::new(1, 5, 1),
                severity: Severity::Warning,
                message: "Line contains trailing whitespace".to_string(),
            }],
            files_checked: 1,
            linters_run: 1,
        };

        let records = parse_lines(&JsonlFormatter::new().format(&report));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "lint");
        assert_eq!(records[0]["file"], "bad\u{FFFD}.scss");
        assert_eq!(records[1]["total_lints"], 1);
    }

    #[test]
    fn test_format_linter_error() {
        let failure = LinterFailure::with_backtrace(
            "Some error message",
            vec!["file.rb:1".to_string(), "file.rb:2".to_string()],
        );
        let error = LinterError::new(LinterName::new("FakeLinter1").unwrap(), "dummy1.scss", failure);

        let records = parse_lines(&JsonlFormatter::new().format_linter_error(&error));
        assert_eq!(records[0]["type"], "error");
        assert_eq!(records[0]["linter"], "FakeLinter1");
        assert_eq!(records[0]["file"], "dummy1.scss");
        assert_eq!(
            records[0]["backtrace"],
            serde_json::json!(["file.rb:1", "file.rb:2"])
        );
    }
}
