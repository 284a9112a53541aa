// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run planning.
//!
//! Loads and parses every selected file in parallel, expands cases into
//! one run per mode, and settles the runs whose verdict is known before
//! execution (skips and harness-level failures).

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classify::feature_gap;
use crate::corpus::{self, Corpus, Loaded, TestCase};
use crate::engine::{Engine, ExecutionRequest};
use crate::error::{Error, Result};
use crate::metadata::{ExpectedOutcome, Mode};
use crate::verdict::{FailReason, SkipReason, Verdict};

/// Unique identity of a test run. Ordered by path, then mode.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunKey {
    pub path: String,
    pub mode: Mode,
}

impl RunKey {
    pub fn new(path: impl Into<String>, mode: Mode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }
}

impl fmt::Display for RunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.mode)
    }
}

/// One (case, mode) pair ready for the sandbox.
#[derive(Debug, Clone)]
pub struct TestRun {
    pub key: RunKey,
    /// Expectation as classified, already lowered for parse-only engines.
    pub expected: ExpectedOutcome,
    pub request: ExecutionRequest,
}

/// Everything a coverage run will report, in discovery order.
#[derive(Debug, Default)]
pub struct Plan {
    /// Runs that need the engine.
    pub runs: Vec<TestRun>,
    /// Runs whose verdict was settled without executing.
    pub resolved: Vec<(RunKey, Verdict)>,
    /// Number of test files considered.
    pub cases: usize,
}

impl Plan {
    pub fn total(&self) -> usize {
        self.runs.len() + self.resolved.len()
    }
}

enum Planned {
    Run(TestRun),
    Resolved(RunKey, Verdict),
}

/// Build the plan for `corpus` against `engine`.
///
/// With `strict_metadata`, the first malformed metadata block aborts
/// planning; otherwise it becomes a failed verdict for that case.
pub fn build(corpus: &Corpus, engine: &dyn Engine, strict_metadata: bool) -> Result<Plan> {
    let planned: Vec<Vec<Planned>> = corpus
        .files
        .par_iter()
        .map(|file| plan_case(corpus::load_case(file), corpus, engine, strict_metadata))
        .collect::<Result<_>>()?;

    let mut plan = Plan {
        cases: planned.len(),
        ..Plan::default()
    };
    for entry in planned.into_iter().flatten() {
        match entry {
            Planned::Run(run) => plan.runs.push(run),
            Planned::Resolved(key, verdict) => plan.resolved.push((key, verdict)),
        }
    }
    tracing::debug!(
        "planned {} runs ({} settled before execution) from {} files",
        plan.total(),
        plan.resolved.len(),
        plan.cases
    );
    Ok(plan)
}

fn plan_case(
    loaded: Loaded,
    corpus: &Corpus,
    engine: &dyn Engine,
    strict_metadata: bool,
) -> Result<Vec<Planned>> {
    let case = match loaded {
        Loaded::Case(case) => case,
        // Without metadata the modes are unknown; report a single run.
        Loaded::Unreadable { path, message } => {
            tracing::warn!("skipping unreadable case {}: {}", path, message);
            let verdict = Verdict::Skipped(SkipReason::Unreadable { message });
            return Ok(vec![Planned::Resolved(RunKey::new(path, Mode::Default), verdict)]);
        }
        Loaded::Invalid { path, error } => {
            if strict_metadata {
                return Err(Error::Metadata {
                    path,
                    message: error.to_string(),
                });
            }
            tracing::warn!("invalid metadata in {}: {}", path, error);
            let verdict = Verdict::Fail(FailReason::Metadata {
                message: error.to_string(),
            });
            return Ok(vec![Planned::Resolved(RunKey::new(path, Mode::Default), verdict)]);
        }
    };

    let modes = case.metadata.modes();
    if let Some(verdict) = feature_gap(&case.metadata.features, engine.supported_features()) {
        return Ok(settle_all(&case, &modes, verdict));
    }

    let includes = match corpus.includes.resolve(&case.metadata.harness_includes()) {
        Ok(includes) => includes,
        Err(name) => {
            let verdict = Verdict::Fail(FailReason::MissingInclude { name });
            return Ok(settle_all(&case, &modes, verdict));
        }
    };

    let expected = if engine.parse_only() {
        case.metadata.expected.clone().for_parser()
    } else {
        case.metadata.expected.clone()
    };

    Ok(modes
        .into_iter()
        .map(|mode| {
            Planned::Run(TestRun {
                key: RunKey::new(case.path.clone(), mode),
                expected: expected.clone(),
                request: ExecutionRequest {
                    path: case.path.clone(),
                    file: case.file.clone(),
                    source: case.source.clone(),
                    mode,
                    includes: includes.clone(),
                    asynchronous: case.metadata.is_async(),
                },
            })
        })
        .collect())
}

fn settle_all(case: &TestCase, modes: &[Mode], verdict: Verdict) -> Vec<Planned> {
    modes
        .iter()
        .map(|&mode| Planned::Resolved(RunKey::new(case.path.clone(), mode), verdict.clone()))
        .collect()
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
