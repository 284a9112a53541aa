// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output.

use std::io::{self, Write};

use termcolor::{ColorSpec, WriteColor};

use crate::baseline::Change;
use crate::color::scheme;
use crate::verdict::VerdictKind;

use super::{CoverageReport, FailureEntry, ReportFormatter, TextOptions, percent};

/// Human-readable, optionally colored report.
pub struct TextFormatter {
    options: TextOptions,
}

impl TextFormatter {
    pub fn new(options: TextOptions) -> Self {
        Self { options }
    }

    fn shown(&self, len: usize) -> usize {
        self.options.limit.map_or(len, |limit| limit.min(len))
    }

    fn write_summary(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()> {
        let c = &report.counts;
        painted(out, &scheme::header(), "conform")?;
        write!(out, ": {} runs with {} on ", c.total, report.engine)?;
        painted(out, &scheme::path(), &report.corpus)?;
        if let Some(revision) = &report.revision {
            write!(out, " @ {revision}")?;
        }
        writeln!(out, " in {:.1}s", report.duration_ms as f64 / 1000.0)?;

        if report.cancelled {
            painted(out, &scheme::timeout(), "  cancelled")?;
            writeln!(out, ": results are partial")?;
        }

        write!(out, "  ")?;
        painted(out, &scheme::pass(), &format!("pass {}", c.pass))?;
        write!(out, "  ")?;
        painted(out, &scheme::fail(), &format!("fail {}", c.fail))?;
        write!(out, "  ")?;
        painted(out, &scheme::crash(), &format!("crash {}", c.crash))?;
        write!(out, "  ")?;
        painted(out, &scheme::timeout(), &format!("timeout {}", c.timeout))?;
        write!(out, "  ")?;
        painted(out, &scheme::muted(), &format!("skipped {}", c.skipped))?;
        writeln!(out)?;

        writeln!(
            out,
            "  pass rate {} ({}/{})",
            percent(report.pass_rate),
            c.pass,
            c.attempted()
        )?;
        if report.harness_failures > 0 {
            writeln!(
                out,
                "  {} harness failures (metadata or missing includes)",
                report.harness_failures
            )?;
        }
        Ok(())
    }

    fn write_failures(&self, out: &mut dyn WriteColor, failures: &[FailureEntry]) -> io::Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        writeln!(out, "\nfailures:")?;
        let shown = self.shown(failures.len());
        for failure in &failures[..shown] {
            write!(out, "  ")?;
            painted(out, &verdict_color(failure.verdict), &format!("{:<7}", failure.verdict))?;
            write!(out, " ")?;
            painted(out, &scheme::path(), &failure.path)?;
            write!(out, " ({})", failure.mode)?;
            if let Some(detail) = &failure.detail {
                write!(out, ": {detail}")?;
            }
            writeln!(out)?;
        }
        more(out, failures.len() - shown)
    }

    fn write_baseline(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()> {
        if !report.baseline {
            writeln!(out, "\nbaseline: none found, regressions not computed")?;
            return Ok(());
        }
        let diff = &report.diff;
        writeln!(
            out,
            "\nbaseline: {} regressions, {} improvements, {} new, {} removed",
            diff.regressions.len(),
            diff.improvements.len(),
            diff.added.len(),
            diff.removed.len()
        )?;
        self.write_changes(out, "regressed", &scheme::fail(), &diff.regressions)?;
        self.write_changes(out, "improved", &scheme::pass(), &diff.improvements)
    }

    fn write_changes(
        &self,
        out: &mut dyn WriteColor,
        label: &str,
        spec: &ColorSpec,
        changes: &[Change],
    ) -> io::Result<()> {
        let shown = self.shown(changes.len());
        for change in &changes[..shown] {
            write!(out, "  ")?;
            painted(out, spec, &format!("{label:<9}"))?;
            write!(out, " ")?;
            painted(out, &scheme::path(), &change.key.path)?;
            writeln!(
                out,
                " ({}): {} -> {}",
                change.key.mode, change.before, change.after
            )?;
        }
        more(out, changes.len() - shown)
    }
}

impl ReportFormatter for TextFormatter {
    fn write(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()> {
        self.write_summary(out, report)?;
        self.write_failures(out, &report.failures)?;
        self.write_baseline(out, report)
    }
}

fn verdict_color(kind: VerdictKind) -> ColorSpec {
    match kind {
        VerdictKind::Pass => scheme::pass(),
        VerdictKind::Fail => scheme::fail(),
        VerdictKind::Crash => scheme::crash(),
        VerdictKind::Timeout => scheme::timeout(),
        VerdictKind::Skipped => scheme::muted(),
    }
}

fn painted(out: &mut dyn WriteColor, spec: &ColorSpec, text: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{text}")?;
    out.reset()
}

fn more(out: &mut dyn WriteColor, hidden: usize) -> io::Result<()> {
    if hidden > 0 {
        painted(
            out,
            &scheme::muted(),
            &format!("  ... {hidden} more (use --no-limit to show all)"),
        )?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
