// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides temp corpora and scripted engines for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::cancel::CancellationToken;
use crate::engine::{Engine, ExecutionRequest, ExecutionResult, FeatureSet};

/// Harness files every temp corpus starts with.
pub const HARNESS: &[(&str, &str)] = &[
    ("harness/assert.js", "function assert() {}\n"),
    ("harness/sta.js", "function Test262Error() {}\n"),
    ("harness/doneprintHandle.js", "function $DONE() {}\n"),
];

/// Creates a temp corpus with the default harness files and no tests.
pub fn temp_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    create_tree(dir.path(), HARNESS);
    fs::create_dir_all(dir.path().join("test")).unwrap();
    dir
}

/// Creates a temp corpus containing the given test files.
///
/// Paths are relative to the corpus root.
pub fn temp_corpus_with(files: &[(&str, &str)]) -> TempDir {
    let dir = temp_corpus();
    create_tree(dir.path(), files);
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = temp_corpus();
/// create_tree(tmp.path(), &[
///     ("test/a.js", "/*---\n---*/\n"),
///     ("test/b/c.js", "/*---\nflags: [module]\n---*/\n"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Builds case source from a YAML metadata body and program text.
pub fn case(yaml: &str, body: &str) -> String {
    format!("/*---\n{yaml}\n---*/\n{body}\n")
}

/// Engine whose behavior is a closure over the request.
pub struct FnEngine<F> {
    features: FeatureSet,
    parse_only: bool,
    run: F,
}

impl<F> FnEngine<F>
where
    F: Fn(&ExecutionRequest, &CancellationToken) -> ExecutionResult + Send + Sync,
{
    pub fn new(run: F) -> Self {
        Self {
            features: FeatureSet::all(),
            parse_only: false,
            run,
        }
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn parsing_only(mut self) -> Self {
        self.parse_only = true;
        self
    }
}

impl<F> Engine for FnEngine<F>
where
    F: Fn(&ExecutionRequest, &CancellationToken) -> ExecutionResult + Send + Sync,
{
    fn name(&self) -> &str {
        "scripted"
    }

    fn execute(&self, request: &ExecutionRequest, interrupt: &CancellationToken) -> ExecutionResult {
        (self.run)(request, interrupt)
    }

    fn supported_features(&self) -> &FeatureSet {
        &self.features
    }

    fn parse_only(&self) -> bool {
        self.parse_only
    }
}

/// Block until `interrupt` fires.
pub fn wait_for_interrupt(interrupt: &CancellationToken) {
    while !interrupt.is_cancelled() {
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}

/// Signature of a plain-function engine behavior.
pub type RunFn = fn(&ExecutionRequest, &CancellationToken) -> ExecutionResult;

/// Engine that completes every run without output.
pub fn completing_engine() -> FnEngine<RunFn> {
    fn complete(_: &ExecutionRequest, _: &CancellationToken) -> ExecutionResult {
        ExecutionResult::completed()
    }
    FnEngine::new(complete as RunFn)
}
