// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Engine under test.
//!
//! The harness knows an engine only through the [`Engine`] trait: run one
//! program in a fresh realm, and report which optional features exist.
//! Concrete engines plug in through adapters such as [`CommandEngine`].

pub mod command;
pub mod protocol;

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::metadata::Mode;

pub use command::{CommandEngine, CommandEngineConfig};

/// A shared helper file prepended to case source.
#[derive(Debug, Clone)]
pub struct Include {
    pub name: String,
    pub text: Arc<str>,
}

/// Everything an engine needs to execute one test run.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Corpus-relative path, for diagnostics.
    pub path: String,
    /// Location of the case on disk. Module runs resolve imports from here.
    pub file: PathBuf,
    /// Case source as written.
    pub source: Arc<str>,
    pub mode: Mode,
    /// Helpers to prepend, in order.
    pub includes: Vec<Include>,
    /// Case signals completion through the async protocol.
    pub asynchronous: bool,
}

impl ExecutionRequest {
    /// Program text: strict prologue (strict mode only), includes, case.
    pub fn compose(&self) -> String {
        let capacity = self.source.len()
            + self.includes.iter().map(|i| i.text.len() + 1).sum::<usize>()
            + 16;
        let mut program = String::with_capacity(capacity);
        if self.mode == Mode::Strict {
            program.push_str("\"use strict\";\n");
        }
        for include in &self.includes {
            program.push_str(&include.text);
            if !include.text.ends_with('\n') {
                program.push('\n');
            }
        }
        program.push_str(&self.source);
        program
    }

    /// Whether the case starts evaluation by calling `$DONOTEVALUATE()`.
    ///
    /// Negative parse and resolution cases carry this guard, so any other
    /// error they raise happened before evaluation began.
    pub fn guarded_by_do_not_evaluate(&self) -> bool {
        self.source.contains(protocol::DO_NOT_EVALUATE_CALL)
    }
}

/// When an error was raised relative to evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPhase {
    Parse,
    Resolution,
    Runtime,
}

impl ErrorPhase {
    pub fn is_before_evaluation(self) -> bool {
        matches!(self, ErrorPhase::Parse | ErrorPhase::Resolution)
    }
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorPhase::Parse => "parse",
            ErrorPhase::Resolution => "resolution",
            ErrorPhase::Runtime => "runtime",
        })
    }
}

/// An uncaught error as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrownError {
    /// Constructor name, e.g. `TypeError`.
    pub name: String,
    pub message: String,
}

impl ThrownError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

/// Raw outcome of one execution, before comparison with expectations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Program ran to completion. `output` is whatever it printed.
    Completed { output: String },
    /// An error escaped the program.
    Threw { phase: ErrorPhase, error: ThrownError },
    /// Execution exceeded its wall-clock budget and was abandoned.
    Timeout,
    /// Engine died: native fault, panic, or abnormal exit.
    Crash { reason: String },
}

impl ExecutionResult {
    pub fn completed() -> Self {
        ExecutionResult::Completed {
            output: String::new(),
        }
    }

    pub fn threw(phase: ErrorPhase, name: &str, message: &str) -> Self {
        ExecutionResult::Threw {
            phase,
            error: ThrownError::new(name, message),
        }
    }

    pub fn crash(reason: impl Into<String>) -> Self {
        ExecutionResult::Crash {
            reason: reason.into(),
        }
    }
}

/// Optional features an engine claims to implement.
///
/// `supported = None` means "everything not listed as unsupported".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    supported: Option<BTreeSet<String>>,
    unsupported: BTreeSet<String>,
}

impl FeatureSet {
    /// Every feature is supported.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the listed features are supported.
    pub fn only<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: Some(features.into_iter().map(Into::into).collect()),
            unsupported: BTreeSet::new(),
        }
    }

    /// Additionally mark the listed features as unsupported.
    pub fn without<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unsupported
            .extend(features.into_iter().map(Into::into));
        self
    }

    pub fn supports(&self, feature: &str) -> bool {
        if self.unsupported.contains(feature) {
            return false;
        }
        match &self.supported {
            Some(set) => set.contains(feature),
            None => true,
        }
    }

    /// Required features this set lacks, in sorted order.
    pub fn missing<'a>(&self, required: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        required
            .into_iter()
            .filter(|f| !self.supports(f))
            .cloned()
            .collect()
    }
}

/// Capability contract of an engine under test.
///
/// Implementations must give every `execute` call fresh global state: one
/// run's mutations must never be visible to another. `execute` may be
/// called from several threads at once.
pub trait Engine: Send + Sync {
    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// Run one program. Long-running engines should poll `interrupt` and
    /// return promptly once it is cancelled.
    fn execute(&self, request: &ExecutionRequest, interrupt: &CancellationToken)
    -> ExecutionResult;

    fn supported_features(&self) -> &FeatureSet;

    /// Engine only parses; it can observe parse errors and nothing else.
    fn parse_only(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
