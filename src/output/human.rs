#![forbid(unsafe_code)]

//! Human-readable output, colored with termcolor

use crate::error::LinterError;
use crate::linters::Lint;
use crate::runner::RunReport;
use crate::types::Severity;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Formats run reports as one line per lint followed by a summary
#[derive(Debug, Clone, Copy)]
pub struct HumanFormatter {
    color: ColorChoice,
}

impl HumanFormatter {
    pub fn new(color: ColorChoice) -> Self {
        Self { color }
    }

    /// Write a report to stdout
    pub fn write_to_stdout(&self, report: &RunReport) -> io::Result<()> {
        let stream = StandardStream::stdout(self.color);
        let mut out = stream.lock();
        self.write_report(&mut out, report)
    }

    /// Write a linter crash to stderr
    pub fn write_error_to_stderr(&self, error: &LinterError) -> io::Result<()> {
        let stream = StandardStream::stderr(self.color);
        let mut out = stream.lock();
        self.write_linter_error(&mut out, error)
    }

    /// Write every lint, then the summary line
    pub fn write_report(&self, out: &mut dyn WriteColor, report: &RunReport) -> io::Result<()> {
        for lint in &report.lints {
            self.write_lint(out, lint)?;
        }

        if !report.lints.is_empty() {
            writeln!(out)?;
        }

        if report.is_clean() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "No lints found")?;
            out.reset()?;
            writeln!(out, " in {} file(s).", report.files_checked)?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "{} lint(s)", report.lints.len())?;
            out.reset()?;
            writeln!(
                out,
                " found in {} file(s) by {} linter(s).",
                report.files_checked, report.linters_run
            )?;
        }

        Ok(())
    }

    fn write_lint(&self, out: &mut dyn WriteColor, lint: &Lint) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{}:{}", lint.file.display(), lint.location)?;
        out.reset()?;
        write!(out, " ")?;

        let severity_color = match lint.severity {
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        };
        out.set_color(ColorSpec::new().set_fg(Some(severity_color)))?;
        write!(out, "[{}]", lint.severity.short())?;
        out.reset()?;
        write!(out, " ")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", lint.linter)?;
        out.reset()?;
        writeln!(out, ": {}", lint.message)
    }

    /// Write a linter crash with its backtrace
    pub fn write_linter_error(&self, out: &mut dyn WriteColor, error: &LinterError) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "error")?;
        out.reset()?;
        writeln!(out, ": {}", error)?;

        if !error.backtrace().is_empty() {
            writeln!(out, "backtrace:")?;
            for frame in error.backtrace() {
                writeln!(out, "    {}", frame)?;
            }
        }

        writeln!(
            out,
            "This is a bug in the {} linter. Exclude it with `--exclude-linter {}` to continue.",
            error.linter(),
            error.linter()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linters::LinterFailure;
    use crate::types::{LinterName, Location};
    use std::path::PathBuf;
    use termcolor::Buffer;

    fn lint(linter: &str, severity: Severity) -> Lint {
        Lint {
            linter: LinterName::new(linter).unwrap(),
            file: PathBuf::from("styles/app.scss"),
            location: Location::new(3, 7, 1),
            severity,
            message: "Something is off".to_string(),
        }
    }

    fn render(report: &RunReport) -> String {
        let mut buffer = Buffer::no_color();
        HumanFormatter::new(ColorChoice::Never)
            .write_report(&mut buffer, report)
            .unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_clean_report() {
        let report = RunReport {
            lints: vec![],
            files_checked: 4,
            linters_run: 2,
        };
        assert_eq!(render(&report), "No lints found in 4 file(s).\n");
    }

    #[test]
    fn test_report_with_lints() {
        let report = RunReport {
            lints: vec![
                lint("TrailingWhitespace", Severity::Warning),
                lint("NoDebug", Severity::Error),
            ],
            files_checked: 1,
            linters_run: 2,
        };

        let output = render(&report);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "styles/app.scss:3:7 [W] TrailingWhitespace: Something is off"
        );
        assert_eq!(lines[1], "styles/app.scss:3:7 [E] NoDebug: Something is off");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "2 lint(s) found in 1 file(s) by 2 linter(s).");
    }

    #[test]
    fn test_linter_error_lists_every_frame() {
        let failure = LinterFailure::with_backtrace(
            "Some error message",
            vec!["file.rb:1".to_string(), "file.rb:2".to_string()],
        );
        let error = LinterError::new(LinterName::new("FakeLinter1").unwrap(), "dummy1.scss", failure);

        let mut buffer = Buffer::no_color();
        HumanFormatter::new(ColorChoice::Never)
            .write_linter_error(&mut buffer, &error)
            .unwrap();
        let output = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(output.starts_with("error: FakeLinter1"));
        assert!(output.contains("dummy1.scss"));
        assert!(output.contains("    file.rb:1\n    file.rb:2\n"));
        assert!(output.contains("--exclude-linter FakeLinter1"));
    }
}
