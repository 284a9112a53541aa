// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Execution sandbox.
//!
//! Every run executes on its own thread inside `catch_unwind`, so a panic
//! in an in-process engine is a crash of that run only. The caller waits
//! with a hard deadline; on expiry the run's interrupt is triggered, a
//! grace period is allowed, and `Timeout` is reported regardless of what
//! the engine does next.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use thiserror::Error;

use crate::cancel::CancellationToken;
use crate::engine::protocol::settle_async;
use crate::engine::{Engine, ExecutionRequest, ExecutionResult};

/// Name given to threads that host a single engine execution.
pub const RUN_THREAD: &str = "conform-run";

/// How often a waiting run checks the global cancellation token.
const CANCEL_POLL: Duration = Duration::from_millis(20);

/// Time budget of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub timeout: Duration,
    /// Extra time granted after the interrupt fires.
    pub grace: Duration,
}

/// The whole coverage run was cancelled while this run was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run cancelled")]
pub struct Cancelled;

/// Runs requests against one engine with timeout and crash isolation.
#[derive(Clone)]
pub struct Sandbox {
    engine: Arc<dyn Engine>,
    limits: Limits,
}

impl Sandbox {
    pub fn new(engine: Arc<dyn Engine>, limits: Limits) -> Self {
        Self { engine, limits }
    }

    /// Execute one run.
    ///
    /// An engine that ignores its interrupt keeps its thread until it
    /// returns; the result it eventually produces is discarded.
    pub fn run(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        install_quiet_panic_hook();

        let asynchronous = request.asynchronous;
        let path = request.path.clone();
        let interrupt = CancellationToken::new();
        let (tx, rx) = crossbeam_channel::bounded(1);

        let engine = Arc::clone(&self.engine);
        let token = interrupt.clone();
        let spawned = thread::Builder::new()
            .name(RUN_THREAD.to_string())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    engine.execute(&request, &token)
                }))
                .unwrap_or_else(|payload| {
                    ExecutionResult::crash(format!("engine panicked: {}", panic_message(&*payload)))
                });
                // Receiver is gone once the run timed out.
                let _ = tx.send(result);
            });
        if let Err(e) = spawned {
            return Ok(ExecutionResult::crash(format!("failed to start run thread: {e}")));
        }

        let deadline = Instant::now() + self.limits.timeout;
        loop {
            let now = Instant::now();
            if now >= deadline {
                interrupt.cancel();
                let _ = rx.recv_timeout(self.limits.grace);
                tracing::debug!(path = %path, "run timed out");
                return Ok(ExecutionResult::Timeout);
            }

            match rx.recv_timeout((deadline - now).min(CANCEL_POLL)) {
                Ok(result) if asynchronous => return Ok(settle_async(result)),
                Ok(result) => return Ok(result),
                Err(RecvTimeoutError::Timeout) => {
                    if cancel.is_cancelled() {
                        interrupt.cancel();
                        let _ = rx.recv_timeout(self.limits.grace);
                        return Err(Cancelled);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Ok(ExecutionResult::crash("run thread exited without a result"));
                }
            }
        }
    }
}

/// Extract a printable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

static QUIET_HOOK: Once = Once::new();

/// Keep engine panics out of the terminal; they are reported as crashes.
fn install_quiet_panic_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if thread::current().name() == Some(RUN_THREAD) {
                tracing::debug!("engine panicked: {info}");
            } else {
                previous(info);
            }
        }));
    });
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
