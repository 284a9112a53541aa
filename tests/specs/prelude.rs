// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a scratch project (fixture corpus, scripted host, config) and
//! the conform binary under test.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Returns a Command configured to run the conform binary
pub fn conform_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("conform"));
    cmd.env_remove("CONFORM_CONFIG").env_remove("CONFORM_LOG");
    cmd
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Config used by [`Project::bare`]: the scripted host, no corpus exclusions.
pub const MINIMAL_CONFIG: &str = r#"version = 1

[engine]
command = ["./host.sh", "{file}", "{mode}"]
early_error_status = 3

[corpus]
root = "."

[run]
timeout_ms = 2000
grace_ms = 100
"#;

/// A scratch directory acting as both project root and corpus root.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Empty directory, no config.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Copy of the fixture corpus with its config and the scripted host.
    pub fn corpus() -> Self {
        let project = Self::empty();
        copy_dir(&fixture("corpus"), project.path());
        project.install_host();
        project
    }

    /// Harness files, the scripted host and [`MINIMAL_CONFIG`]; no cases.
    pub fn bare() -> Self {
        let project = Self::empty();
        copy_dir(&fixture("corpus/harness"), &project.path().join("harness"));
        std::fs::create_dir_all(project.path().join("test")).unwrap();
        project.install_host();
        project.config(MINIMAL_CONFIG);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn file(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Write a case with the given YAML metadata and body.
    pub fn case(&self, path: &str, yaml: &str, body: &str) {
        self.file(path, &format!("/*---\n{yaml}\n---*/\n{body}\n"));
    }

    /// Replace conform.toml.
    pub fn config(&self, content: &str) {
        self.file("conform.toml", content);
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).unwrap()
    }

    /// `conform` running inside this project.
    pub fn cmd(&self) -> Command {
        let mut cmd = conform_cmd();
        cmd.current_dir(self.path());
        cmd
    }

    /// `conform run` with color disabled, as JSON.
    pub fn run_json(&self, extra: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["run", "--output", "json"])
            .args(extra)
            .output()
            .unwrap();
        serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({e}):\n{}\nstderr:\n{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )
        })
    }

    fn install_host(&self) {
        let host = self.path().join("host.sh");
        std::fs::copy(fixture("hosts/fake-host.sh"), &host).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&host, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}
