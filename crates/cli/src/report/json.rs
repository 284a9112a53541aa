// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use std::io::{self, Write};

use termcolor::WriteColor;

use super::{CoverageReport, ReportFormatter};

/// Machine-readable report: the [`CoverageReport`] as pretty JSON.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn write(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)
    }
}
