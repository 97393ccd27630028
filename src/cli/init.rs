//! Initialize a lintel project
//!
//! Writes a starter lintel.toml listing every builtin linter.

use crate::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

/// Default content for lintel.toml
const DEFAULT_LINTEL_TOML: &str = r#"[lintel]
version = "1"

# Files linted when a directory is given
include = ["**/*.scss"]

# Files never linted
# exclude = ["**/vendor/**"]

[linters]
# Only run these linters (all registered linters run when unset)
# include = ["TrailingWhitespace", "FinalNewline", "LineLength", "ImportantRule"]

# Never run these linters
# exclude = ["ImportantRule"]

# Maximum line length for LineLength
max_line_length = 80

# Regex linters: every match is reported
# [[pattern]]
# name = "NoDebugDirective"
# pattern = "@debug"
# message = "Remove @debug before committing"
# severity = "error"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What `init` did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Skipped,
    Overwritten,
}

/// Run the init command in the working directory
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    run_init_in(Path::new("."), force)
}

/// Write lintel.toml into `dir`
///
/// An existing file is left alone unless `force` is set.
pub fn run_init_in(dir: &Path, force: bool) -> Result<InitOutcome, InitError> {
    if !dir.is_dir() {
        return Err(InitError::Path(format!(
            "Path '{}' is not a directory",
            dir.display()
        )));
    }

    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_dir() {
        return Err(InitError::Path(format!(
            "Path '{}' exists but is a directory",
            path.display()
        )));
    }

    let outcome = match (path.exists(), force) {
        (true, false) => return Ok(InitOutcome::Skipped),
        (true, true) => InitOutcome::Overwritten,
        (false, _) => InitOutcome::Created,
    };

    fs::write(&path, DEFAULT_LINTEL_TOML)?;
    tracing::debug!(path = %path.display(), ?outcome, "wrote configuration");
    Ok(outcome)
}
