// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for how host outcomes become verdicts.

use crate::prelude::*;

fn verdict_of(report: &serde_json::Value, path: &str, mode: &str) -> Option<String> {
    report["failures"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["path"] == path && f["mode"] == mode)
        .map(|f| f["verdict"].as_str().unwrap().to_string())
}

/// > The fixture corpus yields the documented tallies
#[test]
fn fixture_corpus_tallies() {
    let temp = Project::corpus();
    let report = temp.run_json(&["--fail-on", "never"]);

    let counts = &report["counts"];
    assert_eq!(counts["total"], 13, "{report:#}");
    assert_eq!(counts["pass"], 10);
    assert_eq!(counts["fail"], 1);
    assert_eq!(counts["crash"], 0);
    assert_eq!(counts["timeout"], 0);
    assert_eq!(counts["skipped"], 2);
    assert_eq!(report["harness_failures"], 0);
    assert_eq!(report["cancelled"], false);
}

/// > A mode-specific engine bug fails only that mode
#[test]
fn strict_only_failure_is_keyed_by_mode() {
    let temp = Project::corpus();
    let report = temp.run_json(&["--fail-on", "never"]);
    let path = "test/language/statements/with-in-sloppy-code.js";

    assert_eq!(verdict_of(&report, path, "strict").as_deref(), Some("fail"));
    assert_eq!(verdict_of(&report, path, "default"), None);
}

/// > Fixture files are never run as cases
#[test]
fn fixture_files_are_not_cases() {
    let temp = Project::corpus();
    let report = temp.run_json(&["--fail-on", "never"]);
    let text = report.to_string();
    assert!(!text.contains("_FIXTURE"), "{report:#}");
}

/// > A negative case that completes fails with a missing error
#[test]
fn negative_case_that_completes_fails() {
    let temp = Project::bare();
    temp.case(
        "test/neg.js",
        "negative:\n  phase: runtime\n  type: RangeError\nflags: [noStrict]",
        "1;",
    );
    let report = temp.run_json(&["--fail-on", "never"]);

    let failure = &report["failures"][0];
    assert_eq!(failure["verdict"], "fail");
    assert!(
        failure["detail"]
            .as_str()
            .unwrap()
            .contains("expected runtime RangeError"),
        "{report:#}"
    );
}

/// > The wrong error constructor fails the case
#[test]
fn wrong_error_kind_fails() {
    let temp = Project::bare();
    temp.case(
        "test/neg.js",
        "negative:\n  phase: runtime\n  type: RangeError\nflags: [noStrict]",
        "HOST:THROW",
    );
    let report = temp.run_json(&["--fail-on", "never"]);

    let detail = report["failures"][0]["detail"].as_str().unwrap();
    assert!(detail.contains("RangeError"), "{detail}");
    assert!(detail.contains("TypeError"), "{detail}");
}

/// > A parse-phase expectation met at runtime is a wrong phase
#[test]
fn runtime_error_for_parse_expectation_fails() {
    let temp = Project::bare();
    temp.case(
        "test/neg.js",
        "negative:\n  phase: parse\n  type: SyntaxError\nflags: [noStrict]",
        "HOST:THROW",
    );
    let report = temp.run_json(&["--fail-on", "never"]);

    assert_eq!(report["counts"]["fail"], 1, "{report:#}");
}

/// > Malformed metadata is a harness failure of that case only
#[test]
fn malformed_metadata_fails_one_case() {
    let temp = Project::bare();
    temp.case("test/bad.js", "flags: [module, raw]", "1;");
    temp.case("test/good.js", "flags: [noStrict]", "1;");
    let report = temp.run_json(&["--fail-on", "never"]);

    assert_eq!(report["counts"]["pass"], 1, "{report:#}");
    assert_eq!(report["counts"]["fail"], 1);
    assert_eq!(report["harness_failures"], 1);
    assert_eq!(report["failures"][0]["harness"], true);
}

/// > strict_metadata turns malformed metadata into a harness error
#[test]
fn strict_metadata_aborts_the_run() {
    let temp = Project::bare();
    temp.config(&MINIMAL_CONFIG.replace("[run]\n", "[run]\nstrict_metadata = true\n"));
    temp.case("test/bad.js", "flags: [module, raw]", "1;");

    temp.cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("metadata error in test/bad.js"));
}

/// > A missing include fails the case without running it
#[test]
fn missing_include_is_a_harness_failure() {
    let temp = Project::bare();
    temp.case("test/a.js", "includes: [nope.js]\nflags: [noStrict]", "1;");
    let report = temp.run_json(&["--fail-on", "never"]);

    assert_eq!(report["harness_failures"], 1, "{report:#}");
    assert!(
        report["failures"][0]["detail"]
            .as_str()
            .unwrap()
            .contains("nope.js")
    );
}

/// > Async cases need the completion signal
#[test]
fn async_case_without_signal_fails() {
    let temp = Project::bare();
    temp.case("test/a.js", "flags: [async, noStrict]", "Promise.resolve();");
    temp.case("test/b.js", "flags: [async, noStrict]", "HOST:ASYNC");
    let report = temp.run_json(&["--fail-on", "never"]);

    assert_eq!(report["counts"]["pass"], 1, "{report:#}");
    assert_eq!(report["failures"][0]["path"], "test/a.js");
}

/// > Parse-only engines count runtime negatives as passes
#[test]
fn parse_only_engine_lowers_runtime_expectations() {
    let temp = Project::bare();
    temp.config(&MINIMAL_CONFIG.replace(
        "early_error_status = 3\n",
        "early_error_status = 3\nparse_only = true\n",
    ));
    temp.case(
        "test/neg.js",
        "negative:\n  phase: runtime\n  type: TypeError\nflags: [noStrict]",
        "null.x;",
    );
    let report = temp.run_json(&["--fail-on", "never"]);

    assert_eq!(report["counts"]["pass"], 1, "{report:#}");
}
