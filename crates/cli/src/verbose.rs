// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes diagnostic output to stderr. Enabled with `--verbose`.

use std::time::Duration;

/// Verbose output logger. Writes to stderr when enabled.
/// All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr (indented as content under a section).
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("  {}", msg);
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("\n{}:", title);
        }
    }

    /// Print a labelled list on one line, or `(none)`.
    pub fn list(&self, label: &str, items: &[String]) {
        if self.enabled {
            eprintln!("  {}", list_line(label, items));
        }
    }

    /// Print how long a stage of the run took.
    pub fn timing(&self, stage: &str, elapsed: Duration) {
        if self.enabled {
            eprintln!("  {}", timing_line(stage, elapsed));
        }
    }
}

fn timing_line(stage: &str, elapsed: Duration) -> String {
    format!("{stage}: {:.2}s", elapsed.as_secs_f64())
}

fn list_line(label: &str, items: &[String]) -> String {
    if items.is_empty() {
        format!("{label}: (none)")
    } else {
        format!("{label}: {}", items.join(", "))
    }
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
