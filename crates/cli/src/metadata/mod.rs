// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test262 front matter parsing.
//!
//! Each case carries a YAML block between `/*---` and `---*/` declaring
//! its expected outcome, required features, includes and flags.

pub mod frontmatter;
pub mod modes;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use frontmatter::extract_block;
pub use modes::{Mode, expand};

/// Includes every non-raw case receives, in order.
pub const DEFAULT_INCLUDES: &[&str] = &["assert.js", "sta.js"];

/// Extra include for cases using the async completion protocol.
pub const ASYNC_INCLUDE: &str = "doneprintHandle.js";

/// Why a metadata block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("missing /*--- ... ---*/ metadata block")]
    MissingBlock,

    #[error("invalid YAML: {0}")]
    Yaml(String),

    #[error("unknown negative phase `{0}`")]
    UnknownPhase(String),

    #[error("negative expectation is missing its error type")]
    MissingErrorType,

    #[error("contradictory flags: {0} and {1}")]
    ContradictoryFlags(Flag, Flag),
}

/// The outcome a case declares for itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    /// Runs to completion without throwing.
    Pass,
    /// Rejected by the parser before any evaluation.
    ParseError { kind: String },
    /// Rejected before evaluation while linking modules (resolution phase).
    EarlyError { kind: String },
    /// Throws during evaluation; `None` accepts any error.
    RuntimeError { kind: Option<String> },
}

impl ExpectedOutcome {
    /// Lower the expectation for an engine that only parses.
    ///
    /// Such an engine never evaluates or links, so only parse errors are
    /// observable; everything else must simply parse.
    pub fn for_parser(self) -> Self {
        match self {
            ExpectedOutcome::ParseError { .. } => self,
            ExpectedOutcome::Pass
            | ExpectedOutcome::EarlyError { .. }
            | ExpectedOutcome::RuntimeError { .. } => ExpectedOutcome::Pass,
        }
    }
}

impl fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedOutcome::Pass => write!(f, "pass"),
            ExpectedOutcome::ParseError { kind } => write!(f, "parse-phase {kind}"),
            ExpectedOutcome::EarlyError { kind } => write!(f, "resolution-phase {kind}"),
            ExpectedOutcome::RuntimeError { kind: Some(kind) } => write!(f, "runtime {kind}"),
            ExpectedOutcome::RuntimeError { kind: None } => write!(f, "runtime error"),
        }
    }
}

/// Test262 flags that change how a case runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    OnlyStrict,
    NoStrict,
    Module,
    Raw,
    Async,
    Generated,
    CanBlockIsFalse,
    CanBlockIsTrue,
    NonDeterministic,
}

impl Flag {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "onlyStrict" => Flag::OnlyStrict,
            "noStrict" => Flag::NoStrict,
            "module" => Flag::Module,
            "raw" => Flag::Raw,
            "async" => Flag::Async,
            "generated" => Flag::Generated,
            "CanBlockIsFalse" => Flag::CanBlockIsFalse,
            "CanBlockIsTrue" => Flag::CanBlockIsTrue,
            "non-deterministic" => Flag::NonDeterministic,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::OnlyStrict => "onlyStrict",
            Flag::NoStrict => "noStrict",
            Flag::Module => "module",
            Flag::Raw => "raw",
            Flag::Async => "async",
            Flag::Generated => "generated",
            Flag::CanBlockIsFalse => "CanBlockIsFalse",
            Flag::CanBlockIsTrue => "CanBlockIsTrue",
            Flag::NonDeterministic => "non-deterministic",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pairs of flags Test262 never combines.
const CONTRADICTIONS: &[(Flag, Flag)] = &[
    (Flag::OnlyStrict, Flag::NoStrict),
    (Flag::OnlyStrict, Flag::Raw),
    (Flag::Module, Flag::NoStrict),
    (Flag::Module, Flag::OnlyStrict),
    (Flag::Module, Flag::Raw),
    (Flag::CanBlockIsFalse, Flag::CanBlockIsTrue),
];

/// Parsed directives of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub description: Option<String>,
    pub esid: Option<String>,
    pub expected: ExpectedOutcome,
    /// Declared includes, in declaration order.
    pub includes: Vec<String>,
    pub features: BTreeSet<String>,
    pub flags: BTreeSet<Flag>,
}

impl Metadata {
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_async(&self) -> bool {
        self.has_flag(Flag::Async)
    }

    /// Modes this case runs in. Never empty.
    pub fn modes(&self) -> Vec<Mode> {
        modes::expand(&self.flags)
    }

    /// Every include to prepend, defaults first, without duplicates.
    ///
    /// `raw` cases run exactly as written.
    pub fn harness_includes(&self) -> Vec<String> {
        if self.has_flag(Flag::Raw) {
            return Vec::new();
        }
        let mut names: Vec<String> = DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect();
        if self.is_async() {
            names.push(ASYNC_INCLUDE.to_string());
        }
        for name in &self.includes {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    esid: Option<String>,
    #[serde(default)]
    includes: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    negative: Option<RawNegative>,
}

#[derive(Debug, Deserialize)]
struct RawNegative {
    phase: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Parse the metadata block of `source`.
pub fn parse(source: &str) -> Result<Metadata, MetadataError> {
    let block = extract_block(source).ok_or(MetadataError::MissingBlock)?;
    parse_block(block)
}

/// Parse the YAML body of a metadata block (without delimiters).
pub fn parse_block(block: &str) -> Result<Metadata, MetadataError> {
    let raw: RawMetadata = if block.trim().is_empty() {
        RawMetadata::default()
    } else {
        serde_yaml::from_str(block).map_err(|e| MetadataError::Yaml(e.to_string()))?
    };

    let expected = match raw.negative {
        None => ExpectedOutcome::Pass,
        Some(negative) => expected_from_negative(negative)?,
    };

    let mut flags = BTreeSet::new();
    for name in &raw.flags {
        match Flag::parse(name) {
            Some(flag) => {
                flags.insert(flag);
            }
            None => tracing::debug!("ignoring unknown flag `{}`", name),
        }
    }
    for &(a, b) in CONTRADICTIONS {
        if flags.contains(&a) && flags.contains(&b) {
            return Err(MetadataError::ContradictoryFlags(a, b));
        }
    }

    Ok(Metadata {
        description: raw.description.map(|d| d.trim().to_string()),
        esid: raw.esid,
        expected,
        includes: raw.includes,
        features: raw.features.into_iter().collect(),
        flags,
    })
}

fn expected_from_negative(negative: RawNegative) -> Result<ExpectedOutcome, MetadataError> {
    let kind = negative
        .kind
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(MetadataError::MissingErrorType)?;
    match negative.phase.trim() {
        // `early` is the historic name of the parse phase.
        "parse" | "early" => Ok(ExpectedOutcome::ParseError { kind }),
        "resolution" => Ok(ExpectedOutcome::EarlyError { kind }),
        "runtime" => Ok(ExpectedOutcome::RuntimeError { kind: Some(kind) }),
        other => Err(MetadataError::UnknownPhase(other.to_string())),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
