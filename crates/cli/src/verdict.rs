// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verdicts: the classified result of one test run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailReason {
    /// Expected to complete, but an error escaped.
    UnexpectedError { error: String },
    /// Threw, but in a different phase than declared.
    WrongPhase { expected: String, actual: String },
    /// Threw in the right phase with the wrong constructor.
    WrongErrorKind { expected: String, actual: String },
    /// Expected an error, but the program completed.
    MissingError { expected: String },
    /// Metadata block is unparseable. The case never reached the engine.
    Metadata { message: String },
    /// A declared include does not exist in the harness directory.
    MissingInclude { name: String },
}

impl FailReason {
    /// Failures caused by the corpus or harness rather than the engine.
    pub fn is_harness_failure(&self) -> bool {
        matches!(
            self,
            FailReason::Metadata { .. } | FailReason::MissingInclude { .. }
        )
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::UnexpectedError { error } => write!(f, "unexpected error: {error}"),
            FailReason::WrongPhase { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
            FailReason::WrongErrorKind { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
            FailReason::MissingError { expected } => {
                write!(f, "expected {expected}, but completed")
            }
            FailReason::Metadata { message } => write!(f, "metadata: {message}"),
            FailReason::MissingInclude { name } => write!(f, "missing include {name}"),
        }
    }
}

/// Why a run was not executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The engine lacks features the case requires.
    MissingFeatures { features: Vec<String> },
    /// The case file could not be read as UTF-8 text.
    Unreadable { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFeatures { features } => {
                write!(f, "missing features: {}", features.join(", "))
            }
            SkipReason::Unreadable { message } => write!(f, "unreadable: {message}"),
        }
    }
}

/// Classified result of one test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail(FailReason),
    Crash { reason: String },
    Timeout,
    Skipped(SkipReason),
}

impl Verdict {
    pub fn kind(&self) -> VerdictKind {
        match self {
            Verdict::Pass => VerdictKind::Pass,
            Verdict::Fail(_) => VerdictKind::Fail,
            Verdict::Crash { .. } => VerdictKind::Crash,
            Verdict::Timeout => VerdictKind::Timeout,
            Verdict::Skipped(_) => VerdictKind::Skipped,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn is_harness_failure(&self) -> bool {
        matches!(self, Verdict::Fail(reason) if reason.is_harness_failure())
    }

    /// One-line explanation for reports; `None` for passes and timeouts.
    pub fn detail(&self) -> Option<String> {
        match self {
            Verdict::Pass | Verdict::Timeout => None,
            Verdict::Fail(reason) => Some(reason.to_string()),
            Verdict::Crash { reason } => Some(reason.clone()),
            Verdict::Skipped(reason) => Some(reason.to_string()),
        }
    }
}

/// The tag of a [`Verdict`], as stored in the baseline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    Pass,
    Fail,
    Crash,
    Timeout,
    Skipped,
}

impl VerdictKind {
    pub const ALL: [VerdictKind; 5] = [
        VerdictKind::Pass,
        VerdictKind::Fail,
        VerdictKind::Crash,
        VerdictKind::Timeout,
        VerdictKind::Skipped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VerdictKind::Pass => "pass",
            VerdictKind::Fail => "fail",
            VerdictKind::Crash => "crash",
            VerdictKind::Timeout => "timeout",
            VerdictKind::Skipped => "skipped",
        }
    }
}

impl fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VerdictKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VerdictKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown verdict `{s}`"))
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
