//! File discovery and traversal with gitignore support
//!
//! This module provides gitignore-aware file walking with glob-based filtering.
//! Globs are matched against paths relative to the walk root.

use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Path does not exist: {}", .0.display())]
    Missing(PathBuf),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// File did not match include patterns
    NotIncluded,
    /// File matched an exclude pattern
    Excluded,
    /// Entry is not a regular file (e.g., directory, symlink)
    NotAFile,
}

/// Result of file walking - either a file to lint or a skipped entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    /// File to be linted
    File(PathBuf),
    /// Entry that was skipped with reason
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Include/exclude filter shared by walked and explicitly named files
#[derive(Debug, Clone)]
pub struct FileFilter {
    include_set: Option<GlobSet>,
    exclude_set: GlobSet,
}

impl FileFilter {
    /// Creates a new FileFilter
    ///
    /// # Arguments
    /// * `include` - Include patterns (empty means include all)
    /// * `exclude` - Exclude patterns (applied after include)
    pub fn new(include: &[GlobPattern], exclude: &[GlobPattern]) -> Result<Self, FileWalkerError> {
        let include_set = if include.is_empty() {
            None
        } else {
            Some(build_globset(include)?)
        };

        // Always exclude .git directory, merging with user-provided excludes
        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push(GlobPattern::new("**/.git/**"));
        let exclude_set = build_globset(&exclude_patterns)?;

        Ok(Self {
            include_set,
            exclude_set,
        })
    }

    /// Classify a path relative to the walk root
    pub fn check(&self, relative: &Path) -> Option<SkipReason> {
        if let Some(ref include_set) = self.include_set
            && !include_set.is_match(relative)
        {
            return Some(SkipReason::NotIncluded);
        }

        if self.exclude_set.is_match(relative) {
            return Some(SkipReason::Excluded);
        }

        None
    }

    /// Whether a path is rejected by the exclude patterns
    ///
    /// `.` components are dropped and absolute paths under the current
    /// directory are made relative to it, so `./vendor/a.scss` and
    /// `vendor/a.scss` match the same globs.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_set.is_match(matchable_path(path))
    }
}

fn matchable_path(path: &Path) -> PathBuf {
    let relative = if path.is_absolute() {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
    } else {
        None
    };

    relative
        .as_deref()
        .unwrap_or(path)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Builds a GlobSet from patterns
fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern.as_str()).map_err(|e| FileWalkerError::InvalidGlob {
            pattern: pattern.as_str().to_string(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| FileWalkerError::InvalidGlob {
        pattern: "<globset>".to_string(),
        source: e,
    })
}

/// Iterator over discovered files
pub struct FileWalker {
    root: PathBuf,
    filter: FileFilter,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Root directory to walk
    /// * `filter` - Include/exclude filter applied to every file
    pub fn new(root: &Path, filter: FileFilter) -> Self {
        Self {
            root: root.to_path_buf(),
            filter,
        }
    }

    /// Walks the directory tree and returns an iterator over matching files
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, FileWalkerError>> {
        self.walk_with_skip_info()
            .filter_map(|result| match result {
                Ok(WalkResult::File(path)) => Some(Ok(path)),
                Ok(WalkResult::Skipped { path, reason }) => {
                    tracing::trace!(file = %path.display(), ?reason, "skipped");
                    None
                }
                Err(e) => Some(Err(e)),
            })
    }

    /// Walks the directory tree and returns an iterator with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let root = self.root;
        let filter = self.filter;

        let walker = WalkBuilder::new(&root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true) // Respect .gitignore
            .require_git(false)
            .build();

        walker.map(move |result| -> Result<WalkResult, FileWalkerError> {
            let entry = result?;
            let path = entry.path().to_path_buf();

            // Only process files (not directories)
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return Ok(WalkResult::Skipped {
                    path,
                    reason: SkipReason::NotAFile,
                });
            }

            let relative = path.strip_prefix(&root).unwrap_or(&path);
            match filter.check(relative) {
                Some(reason) => Ok(WalkResult::Skipped { path, reason }),
                None => Ok(WalkResult::File(path)),
            }
        })
    }
}

/// Resolve a list of CLI paths into the files to lint
///
/// Directories are walked with the filter applied. Paths naming a file are
/// kept as long as they are not excluded, whatever the include patterns say.
/// The result is sorted and free of duplicates.
pub fn discover_files(
    paths: &[PathBuf],
    filter: &FileFilter,
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if filter.is_excluded(path) {
                tracing::debug!(file = %path.display(), "explicit file is excluded");
            } else {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            let walker = FileWalker::new(path, filter.clone());
            for file in walker.walk() {
                files.push(file?);
            }
        } else {
            return Err(FileWalkerError::Missing(path.clone()));
        }
    }

    files.sort();
    files.dedup();

    tracing::debug!(count = files.len(), "discovered files");
    Ok(files)
}
