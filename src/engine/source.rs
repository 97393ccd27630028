#![forbid(unsafe_code)]

//! The default engine: read the file from disk as UTF-8

use crate::engine::{Document, Engine};
use crate::error::EngineError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Engine that reads files from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceEngine;

impl SourceEngine {
    pub fn new() -> Self {
        SourceEngine
    }
}

impl Engine for SourceEngine {
    fn build(&self, path: &Path) -> Result<Document, EngineError> {
        tracing::trace!(file = %path.display(), "reading source");

        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::InvalidData {
                EngineError::Malformed {
                    path: path.to_path_buf(),
                    message: "file is not valid UTF-8".to_string(),
                }
            } else {
                EngineError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Ok(Document::new(path, contents))
    }
}
