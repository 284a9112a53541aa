// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for config validation.
//!
//! Tests that conform correctly handles:
//! - Unknown top-level keys (warnings)
//! - Unknown section keys (errors)
//! - Missing or unsupported versions (errors)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

// =============================================================================
// CONFIG VALIDATION SPECS
// =============================================================================

/// > Unknown top-level keys are warnings, not errors
#[test]
fn unknown_top_level_key_warns() {
    let temp = Project::bare();
    temp.config(&format!("unknown_key = true\n{MINIMAL_CONFIG}"));

    temp.cmd()
        .args(["run", "--fail-on", "never"])
        .assert()
        .success()
        .stderr(predicates::str::contains("unknown key `unknown_key`"));
}

/// > Unknown keys inside a section are errors
#[test]
fn unknown_section_key_fails() {
    let temp = Project::bare();
    temp.config(&format!("{MINIMAL_CONFIG}\n[baseline]\nfile = \"x\"\n"));

    temp.cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown field"));
}

/// > A config without a version is rejected
#[test]
fn missing_version_fails() {
    let temp = Project::bare();
    temp.config("[run]\njobs = 1\n");

    temp.cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("missing `version`"));
}

/// > Only version 1 is understood
#[test]
fn future_version_fails() {
    let temp = Project::bare();
    temp.config("version = 2\n");

    temp.cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported version 2"));
}

/// > An empty engine command is a configuration error
#[test]
fn missing_engine_command_fails() {
    let temp = Project::bare();
    temp.config("version = 1\n[corpus]\nroot = \".\"\n");

    temp.cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("engine.command"));
}

/// > A corpus root that does not exist is a harness error
#[test]
fn missing_corpus_fails() {
    let temp = Project::bare();

    temp.cmd()
        .args(["run", "does-not-exist"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("corpus not found"));
}
