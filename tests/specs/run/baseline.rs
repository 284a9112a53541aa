// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for baseline comparison and updates.

use crate::prelude::*;

const SLOPPY: &str = "test/language/statements/with-in-sloppy-code.js";

fn baseline(entries: &[&str]) -> String {
    let mut out = String::from("# conform baseline v1\n");
    for entry in entries {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// > Without a baseline nothing regresses and the run succeeds
#[test]
fn no_baseline_succeeds() {
    let temp = Project::corpus();

    temp.cmd()
        .arg("run")
        .assert()
        .success()
        .stdout(predicates::str::contains("baseline: none found"));
}

/// > A pass in the baseline that now fails is a regression
#[test]
fn regression_fails_the_run() {
    let temp = Project::corpus();
    temp.file(
        "conform-baseline.txt",
        &baseline(&[&format!("{SLOPPY} strict pass")]),
    );

    temp.cmd()
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicates::str::contains(format!(
            "regressed {SLOPPY} (strict): pass -> fail"
        )));
}

/// > Regressions are reported in JSON with before and after
#[test]
fn regression_is_listed_in_json() {
    let temp = Project::corpus();
    temp.file(
        "conform-baseline.txt",
        &baseline(&[
            &format!("{SLOPPY} strict pass"),
            "test/gone.js default pass",
        ]),
    );
    let report = temp.run_json(&[]);

    assert_eq!(report["baseline"], true);
    let diff = &report["diff"];
    assert_eq!(diff["regressions"][0]["path"], SLOPPY, "{report:#}");
    assert_eq!(diff["regressions"][0]["mode"], "strict");
    assert_eq!(diff["regressions"][0]["before"], "pass");
    assert_eq!(diff["regressions"][0]["after"], "fail");
    assert_eq!(diff["removed"][0]["path"], "test/gone.js");
    // Every other run is new relative to this baseline.
    assert_eq!(diff["added"].as_array().unwrap().len(), 12);
}

/// > A known failure stays a failure without failing the run
#[test]
fn known_failure_is_not_a_regression() {
    let temp = Project::corpus();
    temp.file(
        "conform-baseline.txt",
        &baseline(&[&format!("{SLOPPY} strict fail")]),
    );

    temp.cmd().arg("run").assert().success();
}

/// > --fail-on any fails on any non-passing run
#[test]
fn fail_on_any_fails_without_baseline() {
    let temp = Project::corpus();

    temp.cmd().args(["run", "--fail-on", "any"]).assert().code(1);
}

/// > --update-baseline records every verdict
#[test]
fn update_baseline_writes_snapshot() {
    let temp = Project::corpus();

    temp.cmd()
        .args(["run", "--update-baseline"])
        .assert()
        .success()
        .stderr(predicates::str::contains("baseline updated"))
        .stderr(predicates::str::contains("no baseline").not());

    let content = temp.read("conform-baseline.txt");
    assert!(content.starts_with("# conform baseline v1\n"), "{content}");
    assert_eq!(content.lines().count(), 14, "{content}");
    assert!(content.contains(&format!("{SLOPPY} strict fail")));
    assert!(content.contains("test/built-ins/BigInt/literal.js default skipped"));

    // The fresh baseline matches the next run exactly.
    temp.cmd().args(["run", "--fail-on", "any"]).assert().code(1);
    let report = temp.run_json(&[]);
    assert_eq!(report["diff"]["added"].as_array().unwrap().len(), 0);
    assert_eq!(report["diff"]["regressions"].as_array().unwrap().len(), 0);
}

/// > A filtered update keeps entries outside the filter
#[test]
fn filtered_update_keeps_other_entries() {
    let temp = Project::corpus();
    temp.file(
        "conform-baseline.txt",
        &baseline(&[
            "test/built-ins/Array/at-negative-index.js default fail",
            "test/language/expressions/typeof-null-property.js default fail",
        ]),
    );

    temp.cmd()
        .args(["run", "--filter", "built-ins/Array", "--update-baseline"])
        .assert()
        .success();

    let content = temp.read("conform-baseline.txt");
    assert!(content.contains("test/built-ins/Array/at-negative-index.js default pass"));
    assert!(content.contains("test/built-ins/Array/at-negative-index.js strict pass"));
    assert!(content.contains("test/language/expressions/typeof-null-property.js default fail"));
    assert_eq!(content.lines().count(), 4, "{content}");
}

/// > --baseline reads from an explicit path
#[test]
fn explicit_baseline_path() {
    let temp = Project::corpus();
    temp.file(
        "ci/known.txt",
        &baseline(&[&format!("{SLOPPY} strict pass")]),
    );

    temp.cmd()
        .args(["run", "--baseline", "ci/known.txt"])
        .assert()
        .code(1);
}

/// > A corrupt baseline is a harness error
#[test]
fn corrupt_baseline_fails() {
    let temp = Project::corpus();
    temp.file("conform-baseline.txt", "not a baseline\n");

    temp.cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("is corrupt at line 1"));
}
