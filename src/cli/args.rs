//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for lintel commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Lintel CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "lintel")]
#[command(about = "A pluggable linter for stylesheets")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available lintel subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lint files and report what the linters find
    Check {
        /// Files or directories to lint (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Only run this linter (repeatable, replaces the configured list)
        #[arg(short = 'i', long = "include-linter", value_name = "NAME")]
        include_linter: Vec<String>,

        /// Never run this linter (repeatable, replaces the configured list)
        #[arg(short = 'x', long = "exclude-linter", value_name = "NAME")]
        exclude_linter: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Configuration file (defaults to ./lintel.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Lint files on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// List every registered linter
    List {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Configuration file (defaults to ./lintel.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write a starter lintel.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
