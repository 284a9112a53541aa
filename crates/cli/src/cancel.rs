// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation.
//!
//! One token cancels the whole run (Ctrl-C); a fresh token per test run
//! interrupts a single execution when its timeout expires.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag shared between the party that cancels and the parties
/// that observe it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Cancel this token on Ctrl-C.
    ///
    /// Only one process-wide handler can exist; a second install fails and
    /// the error is returned for the caller to log.
    pub fn cancel_on_interrupt(&self) -> Result<(), ctrlc::Error> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            if token.is_cancelled() {
                // Second Ctrl-C: stop waiting for the grace period.
                std::process::exit(crate::error::ExitCode::Cancelled as i32);
            }
            eprintln!("\ninterrupt received, finishing in-flight runs...");
            token.cancel();
        })
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
