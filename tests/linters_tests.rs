//! End-to-end tests for the shipped linters
//!
//! Real files on disk go through SourceEngine, the registry built from a
//! configuration, and the runner.

mod common;

use common::write_file;
use lintel::config::Config;
use lintel::{EngineError, LinterRegistry, RunReport, Runner, RunnerError, Severity};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const STYLESHEET: &str = concat!(
    ".button {\n",
    "  color: red !important; \n",
    "  // a comment that is long enough to go past the configured limit of forty\n",
    "}",
);

fn run_config(toml: &str, files: &[PathBuf]) -> Result<RunReport, RunnerError> {
    let config = assert_ok!(Config::parse(toml));
    let registry = assert_ok!(LinterRegistry::from_config(&config));
    Runner::new(&registry, &config.runner_config()).run(files)
}

#[test]
fn test_builtins_on_real_file() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "button.scss", STYLESHEET);

    let report = assert_ok!(run_config("[linters]\nmax_line_length = 40\n", &[file.clone()]));

    let found: Vec<(&str, u32)> = report
        .lints
        .iter()
        .map(|lint| (lint.linter.as_str(), lint.location.line))
        .collect();
    assert_eq!(
        found,
        vec![
            ("TrailingWhitespace", 2),
            ("FinalNewline", 4),
            ("LineLength", 3),
            ("ImportantRule", 2),
        ]
    );
    assert!(report.lints.iter().all(|lint| lint.file == file));
    assert_eq!(report.linters_run, 4);
}

#[test]
fn test_pattern_linter_on_real_file() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "debug.scss", "a {}\n@debug \"here\";\n");

    let toml = r#"
[linters]
include = ["NoDebug"]

[[pattern]]
name = "NoDebug"
pattern = "@debug"
message = "Remove @debug"
severity = "error"
"#;
    let report = assert_ok!(run_config(toml, &[file]));

    assert_eq!(report.lints.len(), 1);
    let lint = &report.lints[0];
    assert_eq!(lint.linter.as_str(), "NoDebug");
    assert_eq!(lint.severity, Severity::Error);
    assert_eq!(lint.message, "Remove @debug");
    assert_eq!((lint.location.line, lint.location.column), (2, 1));
    assert_eq!(report.linters_run, 1);
}

#[test]
fn test_clean_file_reports_nothing() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "clean.scss", "a {\n  color: red;\n}\n");

    let report = assert_ok!(run_config("", &[file]));
    assert!(report.is_clean());
    assert_eq!(report.files_checked, 1);
}

#[test]
fn test_missing_file_is_engine_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.scss");

    let err = assert_err!(run_config("", &[missing.clone()]));
    match err {
        RunnerError::Engine(EngineError::Read { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a read error, got {:?}", other),
    }
}

#[test]
fn test_non_utf8_file_is_malformed() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("binary.scss");
    fs::write(&file, [0xff, 0xfe, 0x00, 0x61]).unwrap();

    let err = assert_err!(run_config("", &[file]));
    assert!(matches!(err, RunnerError::Engine(EngineError::Malformed { .. })));
}
