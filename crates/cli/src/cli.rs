// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::{ColorMode, help_styles};
use crate::config::FailOn;
use crate::config::defaults;

/// Conformance coverage harness: runs a Test262 corpus against an engine
#[derive(Parser)]
#[command(name = "conform")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true, styles = help_styles())]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "CONFORM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the corpus against the configured engine
    Run(RunArgs),
    /// Re-render the most recent report
    Report(ReportArgs),
    /// Initialize conform configuration
    Init(InitArgs),
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Corpus root (overrides `corpus.root`)
    #[arg(value_name = "CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Worker threads (0 = available parallelism)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-run timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Exclude cases matching a glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Only run cases whose path contains this text
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Baseline file (overrides `baseline.path`)
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Write this run's verdicts to the baseline file
    #[arg(long)]
    pub update_baseline: bool,

    /// When the run counts as failed
    #[arg(long, value_name = "POLICY")]
    pub fail_on: Option<FailOn>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Maximum failures to display (default: 15)
    #[arg(long, default_value_t = defaults::run::LIMIT, value_name = "N")]
    pub limit: usize,

    /// Show all failures (no limit)
    #[arg(long)]
    pub no_limit: bool,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl RunArgs {
    /// Display limit, or None when `--no-limit` is given.
    pub fn display_limit(&self) -> Option<usize> {
        if self.no_limit { None } else { Some(self.limit) }
    }
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Maximum failures to display (default: 15)
    #[arg(long, default_value_t = defaults::run::LIMIT, value_name = "N")]
    pub limit: usize,

    /// Show all failures (no limit)
    #[arg(long)]
    pub no_limit: bool,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,
}

impl ReportArgs {
    pub fn display_limit(&self) -> Option<usize> {
        if self.no_limit { None } else { Some(self.limit) }
    }
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
