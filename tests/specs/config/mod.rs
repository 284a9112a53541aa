// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for configuration.
//!
//! Tests that conform correctly handles:
//! - Config file validation
//! - Environment variables
//! - Config discovery

#![allow(clippy::unwrap_used, clippy::expect_used)]

#[path = "validation.rs"]
mod validation;

#[cfg(unix)]
#[path = "env.rs"]
mod env;
