// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! `conform.toml` describes the corpus, the engine under test, run limits
//! and where the baseline lives. Relative paths are resolved against the
//! directory containing the config file.

pub mod defaults;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::corpus::Layout;
use crate::engine::{CommandEngineConfig, FeatureSet};
use crate::error::{Error, Result};
use crate::sandbox::Limits;

/// File name looked up by discovery.
pub const CONFIG_FILE: &str = "conform.toml";

/// The only supported config version.
pub const CONFIG_VERSION: i64 = 1;

/// Top-level keys understood by this version.
const KNOWN_KEYS: &[&str] = &["version", "corpus", "engine", "run", "baseline"];

/// Full configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            corpus: CorpusConfig::default(),
            engine: EngineConfig::default(),
            run: RunConfig::default(),
            baseline: BaselineConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Resolve `path` against the config directory unless absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Corpus layout with `root` overriding the configured root.
    pub fn layout(&self, root: Option<&Path>) -> Layout {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => self.resolve(&self.corpus.root),
        };
        Layout {
            tests: root.join(&self.corpus.tests),
            harness: root.join(&self.corpus.harness),
            root,
        }
    }

    pub fn baseline_path(&self) -> PathBuf {
        self.resolve(&self.baseline.path)
    }

    /// Engine settings; a relative program path (one containing a
    /// separator) is resolved against the config directory.
    pub fn engine_config(&self) -> CommandEngineConfig {
        let mut engine = self.engine.command_config();
        if let Some(program) = engine.command.first_mut()
            && program.contains(['/', '\\'])
        {
            *program = self.resolve(Path::new(program.as_str())).to_string_lossy().into_owned();
        }
        engine
    }

    pub fn limits(&self) -> Limits {
        Limits {
            timeout: Duration::from_millis(self.run.timeout_ms),
            grace: Duration::from_millis(self.run.grace_ms),
        }
    }
}

/// `[corpus]`: where the Test262 checkout lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    #[serde(default = "CorpusConfig::default_root")]
    pub root: PathBuf,

    #[serde(default = "CorpusConfig::default_tests")]
    pub tests: String,

    #[serde(default = "CorpusConfig::default_harness")]
    pub harness: String,

    /// Glob patterns of corpus-relative paths to leave out.
    #[serde(default, alias = "ignore")]
    pub exclude: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            tests: Self::default_tests(),
            harness: Self::default_harness(),
            exclude: Vec::new(),
        }
    }
}

impl CorpusConfig {
    pub(crate) fn default_root() -> PathBuf {
        PathBuf::from(defaults::corpus::ROOT)
    }

    pub(crate) fn default_tests() -> String {
        defaults::corpus::TESTS.to_string()
    }

    pub(crate) fn default_harness() -> String {
        defaults::corpus::HARNESS.to_string()
    }
}

/// `[engine]`: the host command and what it supports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Program and arguments; `{file}` and `{mode}` are substituted.
    pub command: Vec<String>,

    /// Allow-list of supported features. Absent means all.
    pub features: Option<Vec<String>>,

    /// Features the engine lacks; cases requiring them are skipped.
    pub unsupported: Vec<String>,

    /// The engine only parses (a parser coverage run).
    pub parse_only: bool,

    /// Exit status the host uses for early (parse) errors.
    pub early_error_status: Option<i32>,

    /// Exit statuses that mean the host itself crashed.
    pub crash_status: Vec<i32>,
}

impl EngineConfig {
    pub fn feature_set(&self) -> FeatureSet {
        let base = match &self.features {
            Some(features) => FeatureSet::only(features.iter().cloned()),
            None => FeatureSet::all(),
        };
        base.without(self.unsupported.iter().cloned())
    }

    pub fn command_config(&self) -> CommandEngineConfig {
        CommandEngineConfig {
            command: self.command.clone(),
            features: self.feature_set(),
            parse_only: self.parse_only,
            early_error_status: self.early_error_status,
            crash_status: self.crash_status.clone(),
        }
    }
}

/// When a finished run counts as a failure.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Any baseline pass that no longer passes.
    #[default]
    Regressions,
    /// Any failing, crashing or timed-out run.
    Any,
    /// Never; only harness errors fail.
    Never,
}

/// `[run]`: execution limits and policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Worker threads; 0 uses available parallelism.
    #[serde(default = "RunConfig::default_jobs")]
    pub jobs: usize,

    #[serde(default = "RunConfig::default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "RunConfig::default_grace_ms")]
    pub grace_ms: u64,

    #[serde(default)]
    pub fail_on: FailOn,

    /// Abort on malformed metadata instead of failing the case.
    #[serde(default)]
    pub strict_metadata: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            jobs: Self::default_jobs(),
            timeout_ms: Self::default_timeout_ms(),
            grace_ms: Self::default_grace_ms(),
            fail_on: FailOn::default(),
            strict_metadata: false,
        }
    }
}

impl RunConfig {
    pub(crate) fn default_jobs() -> usize {
        defaults::run::JOBS
    }

    pub(crate) fn default_timeout_ms() -> u64 {
        defaults::run::TIMEOUT_MS
    }

    pub(crate) fn default_grace_ms() -> u64 {
        defaults::run::GRACE_MS
    }
}

/// `[baseline]`: where the snapshot is stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineConfig {
    #[serde(default = "BaselineConfig::default_path")]
    pub path: PathBuf,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl BaselineConfig {
    pub(crate) fn default_path() -> PathBuf {
        PathBuf::from(defaults::BASELINE_FILE)
    }
}

/// Parse config text. Returns the config and warnings about ignored keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<(Config, Vec<String>)> {
    let config_error = |message: String| Error::Config {
        path: path.to_path_buf(),
        message,
    };

    let table: toml::Table = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    match table.get("version").map(|v| v.as_integer()) {
        None => return Err(config_error("missing `version`".to_string())),
        Some(Some(CONFIG_VERSION)) => {}
        Some(Some(other)) => {
            return Err(config_error(format!(
                "unsupported version {other} (expected {CONFIG_VERSION})"
            )));
        }
        Some(None) => return Err(config_error("`version` must be an integer".to_string())),
    }

    let warnings = table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| format!("{}: unknown key `{}` ignored", path.display(), key))
        .collect();

    let mut config: Config = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| config_error(e.to_string()))?;
    config.base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if config.run.timeout_ms == 0 {
        return Err(config_error("`run.timeout_ms` must be positive".to_string()));
    }
    Ok((config, warnings))
}

/// Parse config text, dropping warnings.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    parse_with_warnings(content, path).map(|(config, _)| config)
}

/// Load config from a file, logging warnings about ignored keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let (config, warnings) = parse_with_warnings(&content, path)?;
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
    Ok(config)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
