// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git utilities for recording which corpus revision was measured.
//!
//! Uses git2 (libgit2) so no `git` binary is needed at run time.

use std::path::Path;

use git2::Repository;

/// Length of abbreviated commit hashes.
const SHORT_HASH_LEN: usize = 7;

/// Check if a path is in a git repository.
pub fn is_git_repo(root: &Path) -> bool {
    Repository::discover(root).is_ok()
}

/// Short HEAD hash of the repository containing `root`.
///
/// Returns None outside a repository or before the first commit. A dirty
/// working tree is marked with a `+dirty` suffix.
pub fn corpus_revision(root: &Path) -> Option<String> {
    let repo = Repository::discover(root).ok()?;
    let oid = repo.head().ok()?.target()?;
    let mut hash = oid.to_string();
    hash.truncate(SHORT_HASH_LEN);

    if is_dirty(&repo) {
        hash.push_str("+dirty");
    }
    Some(hash)
}

fn is_dirty(repo: &Repository) -> bool {
    let mut options = git2::StatusOptions::new();
    options.include_untracked(false).include_ignored(false);
    match repo.statuses(Some(&mut options)) {
        Ok(statuses) => !statuses.is_empty(),
        Err(e) => {
            tracing::debug!("git status failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
