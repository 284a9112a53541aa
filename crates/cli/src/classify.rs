// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome classification.
//!
//! Compares what a case declared with what the engine did. Pure and total:
//! every (expectation, result) pair maps to exactly one verdict.

use crate::engine::{ErrorPhase, ExecutionResult, FeatureSet, ThrownError};
use crate::metadata::ExpectedOutcome;
use crate::verdict::{FailReason, SkipReason, Verdict};

/// Classify one execution against the declared expectation.
///
/// Negative parse and resolution expectations are matched on phase only:
/// engines disagree on the constructor of early errors far more often than
/// on whether one was raised.
pub fn classify(expected: &ExpectedOutcome, result: &ExecutionResult) -> Verdict {
    let (phase, error) = match result {
        ExecutionResult::Timeout => return Verdict::Timeout,
        ExecutionResult::Crash { reason } => {
            return Verdict::Crash {
                reason: reason.clone(),
            };
        }
        ExecutionResult::Completed { .. } => {
            return match expected {
                ExpectedOutcome::Pass => Verdict::Pass,
                _ => Verdict::Fail(FailReason::MissingError {
                    expected: expected.to_string(),
                }),
            };
        }
        ExecutionResult::Threw { phase, error } => (*phase, error),
    };

    match expected {
        ExpectedOutcome::Pass => Verdict::Fail(FailReason::UnexpectedError {
            error: describe(phase, error),
        }),
        ExpectedOutcome::ParseError { .. } | ExpectedOutcome::EarlyError { .. } => {
            if phase.is_before_evaluation() {
                Verdict::Pass
            } else {
                wrong_phase(expected, phase, error)
            }
        }
        ExpectedOutcome::RuntimeError { kind } => {
            if phase.is_before_evaluation() {
                return wrong_phase(expected, phase, error);
            }
            match kind {
                Some(kind) if *kind != error.name => {
                    Verdict::Fail(FailReason::WrongErrorKind {
                        expected: kind.clone(),
                        actual: error.name.clone(),
                    })
                }
                _ => Verdict::Pass,
            }
        }
    }
}

/// Verdict for a case the engine cannot run, decided before execution.
pub fn feature_gap<'a>(
    required: impl IntoIterator<Item = &'a String>,
    engine: &FeatureSet,
) -> Option<Verdict> {
    let missing = engine.missing(required);
    if missing.is_empty() {
        None
    } else {
        Some(Verdict::Skipped(SkipReason::MissingFeatures {
            features: missing,
        }))
    }
}

fn wrong_phase(expected: &ExpectedOutcome, phase: ErrorPhase, error: &ThrownError) -> Verdict {
    Verdict::Fail(FailReason::WrongPhase {
        expected: expected.to_string(),
        actual: describe(phase, error),
    })
}

fn describe(phase: ErrorPhase, error: &ThrownError) -> String {
    match phase {
        ErrorPhase::Runtime => format!("runtime {error}"),
        ErrorPhase::Parse | ErrorPhase::Resolution => format!("{phase}-phase {error}"),
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
