// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Execution modes and their expansion from case flags.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Flag;

/// How the engine must treat the program text of one run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Sloppy-mode script.
    Default,
    /// Script prefixed with a `"use strict";` directive prologue.
    Strict,
    /// ECMAScript module (always strict, no prologue).
    Module,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::Strict => "strict",
            Mode::Module => "module",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Mode::Default),
            "strict" => Ok(Mode::Strict),
            "module" => Ok(Mode::Module),
            other => Err(format!("unknown mode `{other}`")),
        }
    }
}

/// Expand a flag set into the modes a case runs in.
///
/// Never empty. Callers validate contradictory flags beforehand; if they
/// slip through, the first matching rule below wins.
pub fn expand(flags: &BTreeSet<Flag>) -> Vec<Mode> {
    if flags.contains(&Flag::Module) {
        vec![Mode::Module]
    } else if flags.contains(&Flag::Raw) || flags.contains(&Flag::NoStrict) {
        vec![Mode::Default]
    } else if flags.contains(&Flag::OnlyStrict) {
        vec![Mode::Strict]
    } else {
        vec![Mode::Default, Mode::Strict]
    }
}

#[cfg(test)]
#[path = "modes_tests.rs"]
mod tests;
