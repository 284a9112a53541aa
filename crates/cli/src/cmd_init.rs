// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command implementation.

use conform::cli::{Cli, InitArgs};
use conform::config::CONFIG_FILE;

/// Starting configuration written by `conform init`.
const TEMPLATE: &str = r#"version = 1

[corpus]
# Test262 checkout, relative to this file.
root = "test262"
# exclude = ["test/intl402/**", "test/staging/**"]

[engine]
# Host command; {file} is the program to run, {mode} is default, strict or module.
command = ["d8", "{file}"]
# Features the engine does not implement yet. Cases requiring them are skipped.
unsupported = []
# parse_only = false
# early_error_status = 3
# crash_status = [134]

[run]
jobs = 0
timeout_ms = 5000
grace_ms = 500
fail_on = "regressions"

[baseline]
path = "conform-baseline.txt"
"#;

/// Run the init command.
pub fn run(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => std::env::current_dir()?.join(CONFIG_FILE),
    };

    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, TEMPLATE)?;
    eprintln!("created {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "cmd_init_tests.rs"]
mod tests;
