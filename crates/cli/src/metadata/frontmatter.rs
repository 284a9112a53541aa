// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the `/*--- ... ---*/` directive block in case source.

use memchr::memmem;

pub(crate) const OPEN: &str = "/*---";
pub(crate) const CLOSE: &str = "---*/";

/// Return the text between the block delimiters, or `None` if either
/// delimiter is missing or they appear out of order.
///
/// Only the first block counts. Test262 files carry exactly one.
pub fn extract_block(source: &str) -> Option<&str> {
    let bytes = source.as_bytes();
    let start = memmem::find(bytes, OPEN.as_bytes())? + OPEN.len();
    let len = memmem::find(&bytes[start..], CLOSE.as_bytes())?;
    // Both delimiters are ASCII, so the offsets are char boundaries.
    source.get(start..start + len)
}

#[cfg(test)]
#[path = "frontmatter_tests.rs"]
mod tests;
