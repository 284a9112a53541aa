// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use conform::cli::{Cli, Command};
use conform::error::ExitCode;

mod cmd_init;
mod cmd_report;
mod cmd_run;

/// Environment variable holding the log filter (e.g. `conform=debug`).
const LOG_ENV: &str = "CONFORM_LOG";

fn main() -> std::process::ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
        Some(Command::Report(args)) => cmd_report::run(&cli, args).map(|()| ExitCode::Success),
        Some(Command::Init(args)) => cmd_init::run(&cli, args).map(|()| ExitCode::Success),
        Some(Command::Completions { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "conform", &mut std::io::stdout());
            Ok(ExitCode::Success)
        }
        None => {
            let _ = Cli::command().print_help();
            Ok(ExitCode::Success)
        }
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("conform: {e:#}");
            ExitCode::HarnessError.into()
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
