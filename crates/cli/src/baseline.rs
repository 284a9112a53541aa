// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline snapshots of verdicts.
//!
//! Stored as sorted, line-oriented text so that changes review well in a
//! diff:
//!
//! ```text
//! # conform baseline v1
//! test/built-ins/Array/length.js default pass
//! test/built-ins/Array/length.js strict fail
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::Mode;
use crate::plan::RunKey;
use crate::verdict::VerdictKind;

/// First line of every baseline file.
pub const HEADER: &str = "# conform baseline v1";

/// Verdict kinds recorded for each run key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    entries: BTreeMap<RunKey, VerdictKind>,
}

impl Baseline {
    /// Load a baseline, returning `None` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        Self::parse(&content, path).map(Some)
    }

    /// Parse baseline text. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let corrupt = |line: usize, message: String| Error::BaselineCorrupt {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut lines = content.lines().enumerate();
        match lines.next() {
            Some((_, first)) if first.trim() == HEADER => {}
            _ => return Err(corrupt(1, format!("expected header `{HEADER}`"))),
        }

        let mut entries = BTreeMap::new();
        for (index, line) in lines {
            let number = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // Fields are split from the right so paths may contain spaces.
            let mut fields = line.rsplitn(3, ' ');
            let (Some(kind), Some(mode), Some(path)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(corrupt(number, "expected `<path> <mode> <verdict>`".to_string()));
            };
            let kind: VerdictKind = kind.parse().map_err(|e| corrupt(number, e))?;
            let mode: Mode = mode.parse().map_err(|e| corrupt(number, e))?;
            let key = RunKey::new(path.trim_end(), mode);
            if entries.insert(key.clone(), kind).is_some() {
                return Err(corrupt(number, format!("duplicate entry for {key}")));
            }
        }
        Ok(Self { entries })
    }

    /// Serialize to the on-disk text format.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(HEADER.len() + 1 + self.entries.len() * 64);
        out.push_str(HEADER);
        out.push('\n');
        for (key, kind) in &self.entries {
            let _ = writeln!(out, "{} {} {}", key.path, key.mode, kind);
        }
        out
    }

    /// Write the baseline, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(path, self.render()).map_err(|e| Error::io(path, e))
    }

    pub fn get(&self, key: &RunKey) -> Option<VerdictKind> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RunKey, VerdictKind)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Replace the entries within scope by those of `current`.
    ///
    /// Entries for which `in_scope` is false were not part of the run
    /// (filtered or excluded) and are carried over unchanged.
    pub fn updated(&self, current: &Baseline, in_scope: impl Fn(&RunKey) -> bool) -> Baseline {
        let mut entries: BTreeMap<RunKey, VerdictKind> = self
            .entries
            .iter()
            .filter(|(key, _)| !in_scope(key))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        entries.extend(current.iter().map(|(k, v)| (k.clone(), v)));
        Baseline { entries }
    }
}

impl FromIterator<(RunKey, VerdictKind)> for Baseline {
    fn from_iter<I: IntoIterator<Item = (RunKey, VerdictKind)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A run key whose verdict kind changed relative to the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    #[serde(flatten)]
    pub key: RunKey,
    pub before: VerdictKind,
    pub after: VerdictKind,
}

/// Differences between a baseline and the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineDiff {
    /// Baseline pass, now anything else.
    pub regressions: Vec<Change>,
    /// Baseline anything else, now pass.
    pub improvements: Vec<Change>,
    /// Keys the baseline does not know.
    pub added: Vec<RunKey>,
    /// Baseline keys absent from the current run.
    pub removed: Vec<RunKey>,
}

/// Compare current verdict kinds against `baseline`. Output is sorted.
///
/// A baseline pass whose key is gone while its path still has a verdict
/// counts as a regression when the path no longer passes. Unreadable and
/// invalid cases are reported under `default` only.
pub fn diff<'a>(
    baseline: &Baseline,
    current: impl IntoIterator<Item = (&'a RunKey, VerdictKind)>,
) -> BaselineDiff {
    let mut result = BaselineDiff::default();
    let mut seen = BTreeSet::new();
    // First non-pass verdict per path, or pass if every mode passed.
    let mut by_path: BTreeMap<&str, VerdictKind> = BTreeMap::new();

    for (key, after) in current {
        seen.insert(key);
        by_path
            .entry(key.path.as_str())
            .and_modify(|kind| {
                if *kind == VerdictKind::Pass {
                    *kind = after;
                }
            })
            .or_insert(after);
        let Some(before) = baseline.get(key) else {
            result.added.push(key.clone());
            continue;
        };
        let change = || Change {
            key: key.clone(),
            before,
            after,
        };
        match (before == VerdictKind::Pass, after == VerdictKind::Pass) {
            (true, false) => result.regressions.push(change()),
            (false, true) => result.improvements.push(change()),
            _ => {}
        }
    }

    for (key, before) in baseline.iter().filter(|(key, _)| !seen.contains(key)) {
        match by_path.get(key.path.as_str()) {
            Some(&after) if before == VerdictKind::Pass && after != VerdictKind::Pass => {
                result.regressions.push(Change {
                    key: key.clone(),
                    before,
                    after,
                });
            }
            _ => result.removed.push(key.clone()),
        }
    }

    result.regressions.sort_by(|a, b| a.key.cmp(&b.key));
    result.improvements.sort_by(|a, b| a.key.cmp(&b.key));
    result.added.sort();
    result
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
