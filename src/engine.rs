//! Turning files into documents that linters can analyze

pub mod document;
pub mod file_walker;
pub mod source;

pub use document::Document;
pub use source::SourceEngine;

use crate::error::EngineError;
use std::path::Path;

/// Builds the analyzable unit for a file
///
/// The runner asks its engine for one document per file and hands that
/// document to every active linter. The trait is `Send + Sync` so the same
/// engine can serve files analyzed in parallel.
pub trait Engine: Send + Sync {
    /// Build a document from the file at `path`
    fn build(&self, path: &Path) -> Result<Document, EngineError>;
}
