#![forbid(unsafe_code)]

//! Linter definitions and registry

pub mod builtin;
mod linter;
pub mod pattern;
mod registry;

// Re-export core types
pub use linter::{Lint, Linter, LinterFailure};
pub use pattern::PatternLinter;
pub use registry::{LinterDescriptor, LinterFactory, LinterRegistry};

pub(crate) use linter::capture_backtrace;
