// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `conform init` command.

use crate::prelude::*;

/// > conform init creates conform.toml in current directory
#[test]
fn init_creates_conform_toml_in_current_directory() {
    let temp = Project::empty();

    temp.cmd()
        .args(["init"])
        .assert()
        .success()
        .stderr(predicates::str::contains("created"));

    let config = temp.read("conform.toml");
    assert!(config.contains("version = 1"));
    assert!(config.contains("[engine]"));
}

/// > Refuses to overwrite existing conform.toml without --force
#[test]
fn init_refuses_to_overwrite_without_force() {
    let temp = Project::empty();
    temp.file("conform.toml", "version = 1\n# existing\n");

    temp.cmd()
        .args(["init"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"))
        .stderr(predicates::str::contains("--force"));

    assert!(temp.read("conform.toml").contains("# existing"));
}

/// > --force overwrites existing conform.toml
#[test]
fn init_force_overwrites_existing_config() {
    let temp = Project::empty();
    temp.file("conform.toml", "version = 1\n# existing content\n");

    temp.cmd().args(["init", "--force"]).assert().success();

    let config = temp.read("conform.toml");
    assert!(!config.contains("# existing content"), "should overwrite");
    assert!(config.contains("version = 1"));
}

/// > --config chooses where the file is written
#[test]
fn init_honors_config_path() {
    let temp = Project::empty();
    std::fs::create_dir(temp.path().join("ci")).unwrap();

    temp.cmd()
        .args(["init", "--config", "ci/conform.toml"])
        .assert()
        .success();

    assert!(temp.path().join("ci/conform.toml").exists());
}
