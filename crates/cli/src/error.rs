// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness error types and process exit codes.
//!
//! Only environment problems are errors. Engine misbehavior on a single
//! case is recorded as a verdict and never reaches this module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a coverage run.
#[derive(Debug, Error)]
pub enum Error {
    /// Corpus root or its tests directory is missing.
    #[error("corpus not found: {}", path.display())]
    CorpusNotFound { path: PathBuf },

    /// Configuration file could not be parsed or is invalid.
    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Invalid combination of settings, independent of any file.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Baseline snapshot exists but cannot be read back.
    #[error("baseline {} is corrupt at line {line}: {message}", path.display())]
    BaselineCorrupt {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Metadata block of a case is unparseable and strict metadata is on.
    #[error("metadata error in {path}: {message}")]
    Metadata { path: String, message: String },

    /// The engine command could not be started at all.
    #[error("engine unavailable: {0}")]
    Engine(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenient `Result` alias for harness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes interpreted by CI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Run completed and the regression policy holds.
    Success = 0,
    /// Run completed but the regression policy is violated.
    PolicyViolated = 1,
    /// Harness or configuration error; nothing meaningful was measured.
    HarnessError = 2,
    /// Run was interrupted; the report covers partial results.
    Cancelled = 130,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
