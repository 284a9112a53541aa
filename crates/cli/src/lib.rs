// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! conform library.
//!
//! Drives a Test262 corpus against an engine under test and reports which
//! cases pass, fail, crash or time out, relative to a stored baseline.

pub mod baseline;
pub mod cancel;
pub mod classify;
pub mod cli;
pub mod color;
pub mod config;
pub mod corpus;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod git;
pub mod latest;
pub mod metadata;
pub mod plan;
pub mod report;
pub mod runner;
pub mod sandbox;
pub mod verbose;
pub mod verdict;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, ExitCode, Result};
