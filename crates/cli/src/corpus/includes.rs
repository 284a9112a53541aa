// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness include store.
//!
//! Every file of the harness directory is read once and shared by all
//! runs that name it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::engine::Include;
use crate::error::{Error, Result};

/// Loaded harness files, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct IncludeStore {
    files: BTreeMap<String, Arc<str>>,
}

impl IncludeStore {
    /// Load every `.js` file directly inside `dir`.
    ///
    /// A missing directory yields an empty store: cases that need
    /// includes then fail individually with a missing include.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            tracing::warn!("harness directory {} not found", dir.display());
            return Ok(Self::default());
        }

        let mut files = BTreeMap::new();
        let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if !path.is_file() || !name.ends_with(".js") {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    files.insert(name, Arc::from(text));
                }
                Err(e) => tracing::warn!("skipping harness file {}: {}", path.display(), e),
            }
        }
        tracing::debug!("loaded {} harness files from {}", files.len(), dir.display());
        Ok(Self { files })
    }

    /// Build a store from in-memory files.
    pub fn from_files<I, N, T>(files: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<Arc<str>>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(n, t)| (n.into(), t.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Include> {
        self.files.get(name).map(|text| Include {
            name: name.to_string(),
            text: Arc::clone(text),
        })
    }

    /// Resolve include names in order. Fails with the first missing name.
    pub fn resolve(&self, names: &[String]) -> std::result::Result<Vec<Include>, String> {
        names
            .iter()
            .map(|name| self.get(name).ok_or_else(|| name.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "includes_tests.rs"]
mod tests;
