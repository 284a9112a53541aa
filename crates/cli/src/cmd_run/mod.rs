// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

mod verbose;

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use termcolor::{ColorChoice, StandardStream};

use conform::baseline::Baseline;
use conform::cancel::CancellationToken;
use conform::cli::{Cli, OutputFormat, RunArgs};
use conform::config::{self, Config};
use conform::corpus::walk::relative_path;
use conform::corpus::{Corpus, Selection};
use conform::discovery;
use conform::engine::{CommandEngine, Engine};
use conform::error::ExitCode;
use conform::git;
use conform::latest::{LatestReport, latest_path};
use conform::plan::{self, RunKey};
use conform::report::{self, RunInfo, TextOptions};
use conform::runner::{Runner, RunnerConfig};
use conform::sandbox::Sandbox;
use conform::verbose::VerboseLogger;

/// Run the coverage command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let verbose = VerboseLogger::new(args.verbose);

    let config_path = discovery::locate(cli.config.as_deref(), &cwd);
    let mut config = match &config_path {
        Some(path) => config::load_with_warnings(path)?,
        None => Config {
            base_dir: cwd.clone(),
            ..Config::default()
        },
    };
    apply_overrides(&mut config, args);
    verbose::config(&verbose, &config, config_path.as_deref());

    let corpus_root = args.corpus.as_ref().map(|p| cwd.join(p));
    let mut exclude = config.corpus.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());
    let selection = Selection::new(&exclude, args.filter.clone());
    let corpus = Corpus::open(config.layout(corpus_root.as_deref()), &selection)?;
    verbose::corpus(&verbose, &corpus, &exclude, args.filter.as_deref());

    let engine = Arc::new(CommandEngine::new(config.engine_config()).context(
        "no usable engine; set `engine.command` in conform.toml",
    )?);
    let planning = Instant::now();
    let plan = plan::build(&corpus, engine.as_ref(), config.run.strict_metadata)?;
    verbose::plan(&verbose, &plan);
    verbose.timing("Planning", planning.elapsed());

    let baseline_path = match &args.baseline {
        Some(path) => cwd.join(path),
        None => config.baseline_path(),
    };
    let baseline = Baseline::load(&baseline_path)?;
    if baseline.is_none() && !args.update_baseline {
        tracing::warn!(
            "no baseline at {}, regressions not computed",
            baseline_path.display()
        );
    }

    let cancel = CancellationToken::new();
    if let Err(e) = cancel.cancel_on_interrupt() {
        tracing::warn!("Ctrl-C handler not installed: {}", e);
    }

    let runner = Runner::new(
        Sandbox::new(engine.clone(), config.limits()),
        RunnerConfig {
            jobs: config.run.jobs,
        },
    );
    verbose::workers(&verbose, &runner, plan.runs.len(), &config);

    let started = Utc::now();
    let clock = Instant::now();
    let outcome = runner.run(plan, &cancel);
    verbose.timing("Execution", clock.elapsed());
    let info = RunInfo {
        engine: engine.name().to_string(),
        corpus: corpus.root().display().to_string(),
        revision: git::corpus_revision(corpus.root()),
        started,
        duration: clock.elapsed(),
        cancelled: outcome.cancelled,
    };
    let report = outcome.aggregator.finish(info, baseline.as_ref());

    let choice = match args.output {
        OutputFormat::Text => args.color.choice(args.no_color),
        OutputFormat::Json => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(choice);
    report::write_report(
        &mut stdout,
        args.output,
        &report,
        TextOptions {
            limit: args.display_limit(),
        },
    )?;
    stdout.flush()?;

    if args.update_baseline {
        if report.cancelled {
            eprintln!("warning: run was cancelled, baseline not updated");
        } else {
            let current = outcome.aggregator.snapshot();
            let in_scope = scope(&corpus, &selection);
            let updated = match &baseline {
                Some(previous) => previous.updated(&current, in_scope),
                None => current,
            };
            updated
                .save(&baseline_path)
                .with_context(|| format!("failed to write {}", baseline_path.display()))?;
            eprintln!(
                "baseline updated: {} ({} runs)",
                baseline_path.display(),
                updated.len()
            );
        }
    }

    let latest = latest_path(&config.base_dir);
    if let Err(e) = LatestReport::new(report.clone()).save(&latest) {
        tracing::warn!("failed to cache report at {}: {:#}", latest.display(), e);
    }

    Ok(report.exit_code(config.run.fail_on))
}

/// CLI flags take precedence over the config file.
fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(jobs) = args.jobs {
        config.run.jobs = jobs;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.run.timeout_ms = timeout_ms.max(1);
    }
    if let Some(fail_on) = args.fail_on {
        config.run.fail_on = fail_on;
    }
}

/// Predicate for baseline keys that this run was responsible for.
fn scope<'a>(corpus: &'a Corpus, selection: &'a Selection) -> impl Fn(&RunKey) -> bool + 'a {
    let mut prefix = relative_path(corpus.root(), &corpus.layout.tests);
    if !prefix.is_empty() {
        prefix.push('/');
    }
    move |key: &RunKey| key.path.starts_with(&prefix) && selection.includes(&key.path)
}

