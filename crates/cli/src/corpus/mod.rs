// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Corpus loading.
//!
//! A corpus is a directory in the Test262 layout: cases under `test/`,
//! shared helpers under `harness/`.

pub mod includes;
pub mod walk;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::metadata::{self, Metadata, MetadataError};

pub use includes::IncludeStore;
pub use walk::{Selection, TestFile};

/// Default directory of cases, relative to the corpus root.
pub const DEFAULT_TESTS_DIR: &str = "test";

/// Default directory of harness includes, relative to the corpus root.
pub const DEFAULT_HARNESS_DIR: &str = "harness";

/// Where cases and includes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub tests: PathBuf,
    pub harness: PathBuf,
}

impl Layout {
    /// Standard Test262 layout below `root`.
    pub fn standard(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            tests: root.join(DEFAULT_TESTS_DIR),
            harness: root.join(DEFAULT_HARNESS_DIR),
            root,
        }
    }
}

/// A parsed case. Immutable after load.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub path: String,
    pub file: PathBuf,
    pub source: Arc<str>,
    pub metadata: Metadata,
}

/// What loading one test file produced.
#[derive(Debug, Clone)]
pub enum Loaded {
    Case(TestCase),
    /// File exists but is not readable UTF-8 text.
    Unreadable { path: String, message: String },
    /// Metadata block is missing or malformed.
    Invalid { path: String, error: MetadataError },
}

/// Read and parse one test file. Never fails; problems become variants.
pub fn load_case(file: &TestFile) -> Loaded {
    let bytes = match std::fs::read(&file.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Loaded::Unreadable {
                path: file.path.clone(),
                message: e.to_string(),
            };
        }
    };
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(e) => {
            return Loaded::Unreadable {
                path: file.path.clone(),
                message: format!("not valid UTF-8: {}", e.utf8_error()),
            };
        }
    };
    match metadata::parse(&source) {
        Ok(metadata) => Loaded::Case(TestCase {
            path: file.path.clone(),
            file: file.file.clone(),
            source: Arc::from(source),
            metadata,
        }),
        Err(error) => Loaded::Invalid {
            path: file.path.clone(),
            error,
        },
    }
}

/// A discovered corpus: selected test files plus loaded includes.
#[derive(Debug)]
pub struct Corpus {
    pub layout: Layout,
    pub files: Vec<TestFile>,
    pub includes: IncludeStore,
}

impl Corpus {
    pub fn open(layout: Layout, selection: &Selection) -> Result<Self> {
        if !layout.root.is_dir() {
            return Err(Error::CorpusNotFound { path: layout.root });
        }
        let files = walk::discover(&layout.root, &layout.tests, selection)?;
        let includes = IncludeStore::load(&layout.harness)?;
        tracing::info!(
            "discovered {} test files under {}",
            files.len(),
            layout.tests.display()
        );
        Ok(Self {
            layout,
            files,
            includes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.layout.root
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
