// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for environment variables and config discovery.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > CONFORM_CONFIG selects the config file
#[test]
fn conform_config_env_selects_file() {
    let temp = Project::bare();
    temp.case("test/a.js", "description: ok", "1;");
    std::fs::remove_file(temp.path().join("conform.toml")).unwrap();
    let config = MINIMAL_CONFIG
        .replace("root = \".\"", "root = \"..\"")
        .replace("./host.sh", "../host.sh");
    temp.file("ci/conform.toml", &config);

    temp.cmd()
        .env("CONFORM_CONFIG", "ci/conform.toml")
        .args(["run", "--fail-on", "never"])
        .assert()
        .success()
        .stdout(predicates::str::contains("2 runs"));
}

/// > conform.toml is found from a subdirectory
#[test]
fn config_is_discovered_from_subdirectory() {
    let temp = Project::bare();
    temp.case("test/a.js", "description: ok", "1;");
    std::fs::create_dir_all(temp.path().join("work/deep")).unwrap();

    conform_cmd()
        .current_dir(temp.path().join("work/deep"))
        .args(["run", "--fail-on", "never"])
        .assert()
        .success()
        .stdout(predicates::str::contains("2 runs"));
}

/// > CONFORM_LOG enables tracing output on stderr
#[test]
fn conform_log_enables_debug_output() {
    let temp = Project::bare();
    temp.case("test/a.js", "description: ok", "1;");

    temp.cmd()
        .env("CONFORM_LOG", "debug")
        .args(["run", "--fail-on", "never"])
        .assert()
        .success()
        .stderr(predicates::str::contains("finished"));
}
