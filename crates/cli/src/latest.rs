// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Latest report cache for local viewing.
//!
//! `.conform/latest.json` keeps the most recent coverage report so that
//! `conform report` can re-render it without running the corpus again.
//! Named "latest" to distinguish it from the baseline (comparison target).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::report::CoverageReport;

/// File name of the cache inside the state directory.
pub const LATEST_FILE: &str = "latest.json";

/// Location of the cache for a config rooted at `base_dir`.
pub fn latest_path(base_dir: &Path) -> PathBuf {
    base_dir.join(defaults::STATE_DIR).join(LATEST_FILE)
}

/// Latest report cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReport {
    /// When the cache was written.
    pub updated: DateTime<Utc>,

    pub report: CoverageReport,
}

impl LatestReport {
    pub fn new(report: CoverageReport) -> Self {
        Self {
            updated: Utc::now(),
            report,
        }
    }

    /// Save to file, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from file, returning None if not found.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[cfg(test)]
#[path = "latest_tests.rs"]
mod tests;
