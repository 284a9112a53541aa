// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test file discovery.
//!
//! Walks the tests directory with `ignore`, keeps `.js` files that are
//! not module fixtures, applies exclusions and the filter, and returns
//! them in lexicographic order of their corpus-relative path.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Marker in the file name of module fixtures imported by real cases.
pub const FIXTURE_MARKER: &str = "_FIXTURE";

/// A discovered test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    /// Corpus-relative path with forward slashes.
    pub path: String,
    pub file: PathBuf,
}

/// Which discovered files take part in a run.
#[derive(Debug, Clone)]
pub struct Selection {
    exclude: GlobSet,
    filter: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            exclude: GlobSet::empty(),
            filter: None,
        }
    }
}

impl Selection {
    /// Build a selection from exclusion globs and an optional substring
    /// filter. Invalid globs are logged and ignored.
    pub fn new(exclude: &[String], filter: Option<String>) -> Self {
        Self {
            exclude: build_glob_set(exclude),
            filter: filter.filter(|f| !f.is_empty()),
        }
    }

    /// Whether `path` (corpus-relative) takes part in the run.
    pub fn includes(&self, path: &str) -> bool {
        if self.exclude.is_match(path) {
            return false;
        }
        match &self.filter {
            Some(filter) => path.contains(filter.as_str()),
            None => true,
        }
    }
}

/// Whether a file name denotes a runnable case.
pub fn is_test_file(name: &str) -> bool {
    name.ends_with(".js") && !name.contains(FIXTURE_MARKER)
}

/// Discover test files below `tests_dir`, relative to `root`.
pub fn discover(root: &Path, tests_dir: &Path, selection: &Selection) -> Result<Vec<TestFile>> {
    if !tests_dir.is_dir() {
        return Err(Error::CorpusNotFound {
            path: tests_dir.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(tests_dir)
        .standard_filters(false)
        .hidden(true)
        .follow_links(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable corpus entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_test_file(&name) {
            continue;
        }
        let path = relative_path(root, entry.path());
        if selection.includes(&path) {
            files.push(TestFile {
                path,
                file: entry.into_path(),
            });
        } else {
            tracing::trace!("excluded {}", path);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Corpus-relative path with forward slashes on every platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn build_glob_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        } else {
            tracing::warn!("invalid exclude pattern: {}", pattern);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

#[cfg(test)]
#[path = "walk_tests.rs"]
mod tests;
