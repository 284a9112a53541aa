// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use termcolor::{ColorChoice, StandardStream};

use conform::cli::{Cli, OutputFormat, ReportArgs};
use conform::config;
use conform::discovery;
use conform::latest::{LatestReport, latest_path};
use conform::report::{self, TextOptions};

/// Run the report command: re-render the cached latest report.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    let config_path = discovery::locate(cli.config.as_deref(), &cwd);
    let base_dir: PathBuf = match &config_path {
        Some(path) => config::load_with_warnings(path)?.base_dir,
        None => cwd,
    };

    let path = latest_path(&base_dir);
    let latest = LatestReport::load(&path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .with_context(|| {
            format!(
                "no report found at {}; run `conform run` first",
                path.display()
            )
        })?;

    let choice = match args.output {
        OutputFormat::Text => args.color.choice(args.no_color),
        OutputFormat::Json => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(choice);
    report::write_report(
        &mut stdout,
        args.output,
        &latest.report,
        TextOptions {
            limit: args.display_limit(),
        },
    )?;
    stdout.flush()?;
    Ok(())
}
