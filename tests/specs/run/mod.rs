// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `conform run`.
//!
//! All specs drive the scripted host in `tests/fixtures/hosts`, which picks
//! its behavior from markers in the program it is given.

#![allow(clippy::unwrap_used, clippy::expect_used)]

#[path = "verdicts.rs"]
mod verdicts;

#[path = "baseline.rs"]
mod baseline;


#[path = "output.rs"]
mod output;
