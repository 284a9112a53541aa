// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose logging helpers for the run command.

use std::path::Path;

use conform::config::Config;
use conform::corpus::Corpus;
use conform::git;
use conform::plan::Plan;
use conform::runner::Runner;
use conform::verbose::VerboseLogger;

pub(super) fn config(verbose: &VerboseLogger, config: &Config, config_path: Option<&Path>) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Configuration");
    match config_path {
        Some(path) => verbose.log(&format!("Config: {}", path.display())),
        None => verbose.log("Config: (defaults)"),
    }
    verbose.log(&format!("Engine: {}", config.engine.command.join(" ")));
    if let Some(features) = &config.engine.features {
        verbose.list("engine.features", features);
    }
    verbose.list("engine.unsupported", &config.engine.unsupported);
    if config.engine.parse_only {
        verbose.log("Parse-only engine: runtime expectations lowered to pass");
    }
}

pub(super) fn corpus(
    verbose: &VerboseLogger,
    corpus: &Corpus,
    exclude: &[String],
    filter: Option<&str>,
) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Corpus");
    verbose.log(&format!("Root: {}", corpus.root().display()));
    match git::corpus_revision(corpus.root()) {
        Some(revision) => verbose.log(&format!("Revision: {revision}")),
        None if git::is_git_repo(corpus.root()) => verbose.log("Revision: (no commits)"),
        None => verbose.log("Revision: (not a git checkout)"),
    }
    verbose.list("corpus.exclude", exclude);
    if let Some(filter) = filter {
        verbose.log(&format!("Filter: {filter}"));
    }
    verbose.log(&format!(
        "Discovered {} test files, {} harness includes",
        corpus.files.len(),
        corpus.includes.len()
    ));
}

pub(super) fn plan(verbose: &VerboseLogger, plan: &Plan) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Plan");
    verbose.log(&format!(
        "{} cases expand to {} runs ({} to execute, {} settled before execution)",
        plan.cases,
        plan.total(),
        plan.runs.len(),
        plan.resolved.len()
    ));
}

pub(super) fn workers(verbose: &VerboseLogger, runner: &Runner, runs: usize, config: &Config) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Execution");
    verbose.log(&format!("Workers: {}", runner.worker_count(runs)));
    verbose.log(&format!(
        "Timeout: {} ms (grace {} ms)",
        config.run.timeout_ms, config.run.grace_ms
    ));
}
