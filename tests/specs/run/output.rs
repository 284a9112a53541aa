// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for selection flags and report rendering.

use crate::prelude::*;

/// > The text report summarizes counts and pass rate
#[test]
fn text_report_summary() {
    let temp = Project::corpus();

    temp.cmd()
        .args(["run", "--fail-on", "never"])
        .assert()
        .success()
        .stdout(predicates::str::contains("conform: 13 runs with host.sh"))
        .stdout(predicates::str::contains(
            "pass 10  fail 1  crash 0  timeout 0  skipped 2",
        ))
        .stdout(predicates::str::contains("pass rate 90.91% (10/11)"))
        .stdout(predicates::str::contains(
            "fail    test/language/statements/with-in-sloppy-code.js (strict)",
        ));
}

/// > Text output has no escape codes when color is off
#[test]
fn no_color_output_is_plain() {
    let temp = Project::corpus();

    temp.cmd()
        .args(["run", "--fail-on", "never", "--no-color"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b[").not());
}

/// > --filter keeps only paths containing the substring
#[test]
fn filter_selects_by_substring() {
    let temp = Project::corpus();
    let report = temp.run_json(&["--filter", "built-ins/Array"]);

    assert_eq!(report["counts"]["total"], 2, "{report:#}");
    assert_eq!(report["counts"]["pass"], 2);
}

/// > --exclude drops matching paths from the run
#[test]
fn exclude_drops_matching_paths() {
    let temp = Project::corpus();
    let report = temp.run_json(&["--exclude", "test/language/**"]);

    assert_eq!(report["counts"]["total"], 6, "{report:#}");
    assert_eq!(report["counts"]["fail"], 0);
}

/// > Excludes from conform.toml apply too
#[test]
fn config_exclude_applies() {
    let temp = Project::corpus();
    let config = temp
        .read("conform.toml")
        .replace("root = \".\"\n", "root = \".\"\nexclude = [\"test/built-ins/**\"]\n");
    temp.config(&config);
    let report = temp.run_json(&["--fail-on", "never"]);

    assert_eq!(report["counts"]["total"], 7, "{report:#}");
}

/// > An invalid exclude glob is ignored
#[test]
fn invalid_exclude_glob_is_ignored() {
    let temp = Project::corpus();
    let report = temp.run_json(&["--fail-on", "never", "--exclude", "test/[oops"]);

    assert_eq!(report["counts"]["total"], 13, "{report:#}");
}

/// > Failure listings are truncated to --limit
#[test]
fn limit_truncates_failures() {
    let temp = Project::bare();
    for i in 0..4 {
        temp.case(&format!("test/t{i}.js"), "flags: [noStrict]", "HOST:THROW");
    }

    temp.cmd()
        .args(["run", "--fail-on", "never", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("test/t0.js"))
        .stdout(predicates::str::contains("test/t3.js").not())
        .stdout(predicates::str::contains("... 3 more (use --no-limit to show all)"));

    temp.cmd()
        .args(["run", "--fail-on", "never", "--limit", "1", "--no-limit"])
        .assert()
        .success()
        .stdout(predicates::str::contains("test/t3.js"))
        .stdout(predicates::str::contains("more (use --no-limit").not());
}

/// > Verbose mode describes config, corpus, plan and workers on stderr
#[test]
fn verbose_describes_the_run() {
    let temp = Project::corpus();

    temp.cmd()
        .args(["run", "--fail-on", "never", "-v", "-j", "2"])
        .assert()
        .success()
        .stderr(predicates::str::contains("Configuration"))
        .stderr(predicates::str::contains("engine.unsupported: BigInt"))
        .stderr(predicates::str::contains("Revision: (not a git checkout)"))
        .stderr(predicates::str::contains("Workers: 2"));
}

/// > A run caches its report for `conform report`
#[test]
fn run_caches_latest_report() {
    let temp = Project::corpus();
    temp.cmd().args(["run", "--fail-on", "never"]).assert().success();

    let cached: serde_json::Value =
        serde_json::from_str(&temp.read(".conform/latest.json")).unwrap();
    assert_eq!(cached["report"]["counts"]["total"], 13);
}
