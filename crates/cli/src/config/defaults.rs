// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.
//! Individual config structs delegate to these constants via their `default_*` methods.

/// Default corpus layout.
pub mod corpus {
    /// Corpus root, relative to the config file (`test262`).
    pub const ROOT: &str = "test262";

    /// Directory of cases, relative to the corpus root.
    pub const TESTS: &str = crate::corpus::DEFAULT_TESTS_DIR;

    /// Directory of harness includes, relative to the corpus root.
    pub const HARNESS: &str = crate::corpus::DEFAULT_HARNESS_DIR;
}

/// Default run settings.
pub mod run {
    /// Wall-clock budget per run (5 s).
    pub const TIMEOUT_MS: u64 = 5000;

    /// Grace period after an interrupt before the run is abandoned (500 ms).
    pub const GRACE_MS: u64 = 500;

    /// Worker count; 0 means available parallelism.
    pub const JOBS: usize = 0;

    /// Failures listed in text output before truncation.
    pub const LIMIT: usize = 15;
}

/// Default baseline location, relative to the config file.
pub const BASELINE_FILE: &str = "conform-baseline.txt";

/// Directory for local state such as the latest report.
pub const STATE_DIR: &str = ".conform";
