// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verdict aggregation and coverage reports.
//!
//! Workers never touch the report. Verdicts flow to a single
//! [`Aggregator`] keyed by [`RunKey`], so the final report does not depend
//! on the order in which runs finished.

mod json;
mod text;

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use termcolor::WriteColor;

use crate::baseline::{self, Baseline, BaselineDiff};
use crate::cli::OutputFormat;
use crate::config::FailOn;
use crate::error::ExitCode;
use crate::metadata::Mode;
use crate::plan::RunKey;
use crate::verdict::{Verdict, VerdictKind};

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Run totals per verdict kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub crash: usize,
    pub timeout: usize,
    pub skipped: usize,
}

impl Counts {
    pub fn record(&mut self, kind: VerdictKind) {
        self.total += 1;
        match kind {
            VerdictKind::Pass => self.pass += 1,
            VerdictKind::Fail => self.fail += 1,
            VerdictKind::Crash => self.crash += 1,
            VerdictKind::Timeout => self.timeout += 1,
            VerdictKind::Skipped => self.skipped += 1,
        }
    }

    /// Runs that were attempted, i.e. not skipped.
    pub fn attempted(&self) -> usize {
        self.total - self.skipped
    }

    /// Failed, crashed or timed-out runs.
    pub fn non_passing(&self) -> usize {
        self.fail + self.crash + self.timeout
    }

    /// `pass / (total - skipped)`, as a fraction; 0 when nothing ran.
    pub fn pass_rate(&self) -> f64 {
        match self.attempted() {
            0 => 0.0,
            attempted => self.pass as f64 / attempted as f64,
        }
    }
}

/// A non-passing, non-skipped run listed for triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub path: String,
    pub mode: Mode,
    pub verdict: VerdictKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Corpus or harness problem rather than an engine failure.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub harness: bool,
}

/// Context of a coverage run that the verdicts do not carry.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub engine: String,
    pub corpus: String,
    pub revision: Option<String>,
    pub started: DateTime<Utc>,
    pub duration: Duration,
    pub cancelled: bool,
}

/// Result of a coverage run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub engine: String,
    pub corpus: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    /// The run was interrupted; counts cover finished runs only.
    pub cancelled: bool,
    pub counts: Counts,
    pub pass_rate: f64,
    pub harness_failures: usize,
    /// Whether a baseline was available to diff against.
    pub baseline: bool,
    pub diff: BaselineDiff,
    pub failures: Vec<FailureEntry>,
}

impl CoverageReport {
    pub fn regressions(&self) -> usize {
        self.diff.regressions.len()
    }

    /// Whether this report violates `policy`.
    pub fn violates(&self, policy: FailOn) -> bool {
        match policy {
            FailOn::Regressions => self.regressions() > 0,
            FailOn::Any => self.counts.non_passing() > 0,
            FailOn::Never => false,
        }
    }

    /// Process exit code for this report under `policy`.
    pub fn exit_code(&self, policy: FailOn) -> ExitCode {
        if self.cancelled {
            ExitCode::Cancelled
        } else if self.violates(policy) {
            ExitCode::PolicyViolated
        } else {
            ExitCode::Success
        }
    }
}

/// Single accumulation point for verdicts.
#[derive(Debug, Default)]
pub struct Aggregator {
    verdicts: BTreeMap<RunKey, Verdict>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: RunKey, verdict: Verdict) {
        if let Some(previous) = self.verdicts.insert(key.clone(), verdict) {
            tracing::warn!("duplicate verdict for {} (previous: {:?})", key, previous.kind());
        }
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn get(&self, key: &RunKey) -> Option<&Verdict> {
        self.verdicts.get(key)
    }

    /// Verdict kinds of this run, in baseline form.
    pub fn snapshot(&self) -> Baseline {
        self.verdicts
            .iter()
            .map(|(key, verdict)| (key.clone(), verdict.kind()))
            .collect()
    }

    /// Build the report, diffing against `baseline` when present.
    pub fn finish(&self, info: RunInfo, baseline: Option<&Baseline>) -> CoverageReport {
        let mut counts = Counts::default();
        let mut harness_failures = 0;
        let mut failures = Vec::new();

        for (key, verdict) in &self.verdicts {
            let kind = verdict.kind();
            counts.record(kind);
            if verdict.is_harness_failure() {
                harness_failures += 1;
            }
            if !matches!(kind, VerdictKind::Pass | VerdictKind::Skipped) {
                failures.push(FailureEntry {
                    path: key.path.clone(),
                    mode: key.mode,
                    verdict: kind,
                    detail: verdict.detail(),
                    harness: verdict.is_harness_failure(),
                });
            }
        }

        let mut diff = match baseline {
            Some(baseline) => baseline::diff(
                baseline,
                self.verdicts.iter().map(|(key, verdict)| (key, verdict.kind())),
            ),
            None => BaselineDiff::default(),
        };
        if info.cancelled {
            // Unfinished runs are not removals.
            diff.removed.clear();
        }

        CoverageReport {
            engine: info.engine,
            corpus: info.corpus,
            revision: info.revision,
            timestamp: info.started,
            duration_ms: info.duration.as_millis() as u64,
            cancelled: info.cancelled,
            pass_rate: counts.pass_rate(),
            counts,
            harness_failures,
            baseline: baseline.is_some(),
            diff,
            failures,
        }
    }
}

/// Options for human-readable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Maximum entries per list; `None` lists everything.
    pub limit: Option<usize>,
}

/// Renders a coverage report.
pub trait ReportFormatter {
    fn write(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> std::io::Result<()>;
}

/// Write `report` in `format`.
pub fn write_report(
    out: &mut dyn WriteColor,
    format: OutputFormat,
    report: &CoverageReport,
    options: TextOptions,
) -> std::io::Result<()> {
    let formatter: Box<dyn ReportFormatter> = match format {
        OutputFormat::Text => Box::new(TextFormatter::new(options)),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    formatter.write(out, report)
}

/// Render as a percentage with two decimals.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
