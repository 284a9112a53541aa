// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test262 host conventions: the async completion protocol, the
//! `$DONOTEVALUATE` guard, and reading uncaught errors from host output.

use std::sync::LazyLock;

use regex::Regex;

use super::{ErrorPhase, ExecutionResult, ThrownError};

/// Printed by `doneprintHandle.js` when an async case succeeds.
pub const ASYNC_COMPLETE: &str = "Test262:AsyncTestComplete";

/// Prefix printed by `doneprintHandle.js` when an async case fails.
pub const ASYNC_FAILURE: &str = "Test262:AsyncTestFailure:";

/// Guard call that opens negative parse and resolution cases.
pub const DO_NOT_EVALUATE_CALL: &str = "$DONOTEVALUATE()";

/// Text thrown by the `$DONOTEVALUATE` harness function.
pub const DO_NOT_EVALUATE_MESSAGE: &str = "This statement should not be evaluated";

#[allow(clippy::expect_used)]
static ERROR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Uncaught\s+)?(?P<name>(?:[A-Z][\w$]*)?(?:Error|Exception))\b(?::\s*(?P<message>.*))?$")
        .expect("error line pattern is valid")
});

/// Find the last `Name: message` error line in host output.
pub fn parse_error_line(output: &str) -> Option<ThrownError> {
    output.lines().rev().find_map(|line| {
        let caps = ERROR_LINE.captures(line.trim())?;
        let name = caps.name("name")?.as_str();
        let message = caps.name("message").map(|m| m.as_str()).unwrap_or("");
        Some(ThrownError::new(name, message.trim()))
    })
}

/// Whether output shows the `$DONOTEVALUATE` guard firing.
pub fn hit_do_not_evaluate(output: &str) -> bool {
    output.contains(DO_NOT_EVALUATE_MESSAGE)
}

/// Interpret a completed async case through its printed completion signal.
///
/// Non-async results and non-completions pass through unchanged.
pub fn settle_async(result: ExecutionResult) -> ExecutionResult {
    let ExecutionResult::Completed { output } = result else {
        return result;
    };

    let failure = output
        .lines()
        .find_map(|line| line.trim().strip_prefix(ASYNC_FAILURE));
    if let Some(detail) = failure {
        let error = parse_error_line(detail.trim())
            .unwrap_or_else(|| ThrownError::new("Error", detail.trim()));
        return ExecutionResult::Threw {
            phase: ErrorPhase::Runtime,
            error,
        };
    }

    if output.lines().any(|line| line.trim() == ASYNC_COMPLETE) {
        return ExecutionResult::Completed { output };
    }

    ExecutionResult::Threw {
        phase: ErrorPhase::Runtime,
        error: ThrownError::new("Test262Error", "async test did not signal completion"),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
