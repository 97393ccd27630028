#![forbid(unsafe_code)]

//! The analyzable unit handed to linters

use crate::types::Location;
use std::path::{Path, PathBuf};

/// A file's contents together with a line index
///
/// Line and column numbers produced by a Document are 1-indexed and columns
/// count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    contents: String,
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let contents = contents.into();
        let line_offsets = compute_line_offsets(&contents);
        Self {
            path: path.into(),
            contents,
            line_offsets,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of lines; a trailing newline does not start a new line
    pub fn line_count(&self) -> usize {
        if self.contents.ends_with('\n') {
            self.line_offsets.len() - 1
        } else {
            self.line_offsets.len()
        }
    }

    /// Iterate over `(line_number, line)` pairs without line terminators
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.contents
            .lines()
            .enumerate()
            .map(|(index, line)| (index as u32 + 1, line))
    }

    /// Convert a byte offset and a byte length into a location
    ///
    /// Offsets past the end of the contents are clamped to the end.
    pub fn location_of(&self, offset: usize, byte_len: usize) -> Location {
        let offset = offset.min(self.contents.len());

        // Binary search for the line containing this offset
        let line_idx = self
            .line_offsets
            .partition_point(|&o| o <= offset)
            .saturating_sub(1);
        let line_start = self.line_offsets[line_idx];

        let column = self.contents[line_start..offset].chars().count() + 1;
        let end = (offset + byte_len).min(self.contents.len());
        let length = self.contents[offset..end].chars().count();

        Location::new(line_idx as u32 + 1, column as u32, length as u32)
    }
}

/// Compute line start offsets for efficient line/column conversion
///
/// Returns a vector where each element is the byte offset of the start of a line.
/// Line 0 starts at offset 0.
fn compute_line_offsets(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}
