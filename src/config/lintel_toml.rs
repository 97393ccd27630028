//! Parsing and validation for lintel.toml configuration files

use crate::error::ConfigError;
use crate::linters::builtin::DEFAULT_MAX_LINE_LENGTH;
use crate::runner::RunnerConfig;
use crate::types::{GlobPattern, LinterName, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lintel.toml";

/// Main configuration struct for lintel.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// File selection
    #[serde(default)]
    pub lintel: LintelMeta,

    /// Linter selection and settings
    #[serde(default)]
    pub linters: LintersConfig,

    /// Regex linters from `[[pattern]]` tables
    #[serde(default, rename = "pattern", skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PatternDefinition>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file, or use defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(path = %path.display(), "loading configuration");
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// The linter selection this configuration asks for
    pub fn runner_config(&self) -> RunnerConfig {
        let to_set = |names: &Option<Vec<LinterName>>| -> Option<HashSet<LinterName>> {
            names.as_ref().map(|names| names.iter().cloned().collect())
        };

        RunnerConfig {
            included_linters: to_set(&self.linters.include),
            excluded_linters: to_set(&self.linters.exclude),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        // Validate version
        if self.lintel.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.lintel.version
            )));
        }

        // Validate glob patterns by attempting to compile them with globset
        for pattern in &self.lintel.include {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid include glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for pattern in &self.lintel.exclude {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        if self.linters.max_line_length == 0 {
            return Err(ConfigError::Validation(
                "max_line_length must be greater than 0".to_string(),
            ));
        }

        if u32::try_from(self.linters.max_line_length).is_err() {
            return Err(ConfigError::Validation(format!(
                "max_line_length must be at most {}",
                u32::MAX
            )));
        }

        let mut seen = HashSet::new();
        for definition in &self.patterns {
            if !seen.insert(&definition.name) {
                return Err(ConfigError::Validation(format!(
                    "Pattern linter '{}' is defined more than once",
                    definition.name
                )));
            }

            regex::Regex::new(&definition.pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid regex for pattern linter '{}': {}",
                    definition.name, e
                ))
            })?;
        }

        Ok(())
    }
}

/// `[lintel]` section: which files to lint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintelMeta {
    /// Configuration version (must be "1")
    #[serde(default = "default_version")]
    pub version: String,

    /// File patterns to include when walking directories
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    /// File patterns to exclude
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

impl Default for LintelMeta {
    fn default() -> Self {
        Self {
            version: default_version(),
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new("**/*.scss")]
}

/// `[linters]` section: which linters to run and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintersConfig {
    /// Only run these linters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<LinterName>>,

    /// Never run these linters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<LinterName>>,

    /// Maximum line length for the LineLength linter
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for LintersConfig {
    fn default() -> Self {
        Self {
            include: None,
            exclude: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

/// A `[[pattern]]` table defining a regex linter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Linter name
    pub name: LinterName,

    /// Regular expression to report
    pub pattern: String,

    /// Message attached to every match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Severity of every match
    #[serde(default)]
    pub severity: Severity,
}
