// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! An explicit `--config` (or `CONFORM_CONFIG`) wins. Otherwise conform.toml
//! is searched from the working directory upward, stopping at the first
//! directory that holds a `.git` entry.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;

/// Resolve the config to load, relative to `cwd`.
pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(cwd.join(path)),
        None => find_config(cwd),
    }
}

/// Nearest conform.toml at or above `start_dir`, within its git checkout.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
