// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color handling.
//!
//! Report colors use termcolor; clap help colors use anstyle.

use std::io::IsTerminal;

use clap::builder::Styles;
use termcolor::{Color, ColorChoice, ColorSpec};

/// When to color output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against `--no-color`, which always wins.
    pub fn choice(self, no_color: bool) -> ColorChoice {
        match self {
            ColorMode::Always => resolve_color(true, no_color),
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => resolve_color(false, no_color),
        }
    }
}

/// Decide the color choice for stdout.
pub fn resolve_color(force_color: bool, no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else if force_color {
        ColorChoice::Always
    } else if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// Styles for clap's generated help.
pub fn help_styles() -> Styles {
    use anstyle::{AnsiColor, Style};

    Styles::styled()
        .header(Style::new().bold().underline())
        .usage(Style::new().bold().underline())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default().bold())
}

/// Color scheme for report output.
pub mod scheme {
    use super::*;

    pub fn header() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    pub fn pass() -> ColorSpec {
        bold(Color::Green)
    }

    pub fn fail() -> ColorSpec {
        bold(Color::Red)
    }

    pub fn crash() -> ColorSpec {
        bold(Color::Magenta)
    }

    pub fn timeout() -> ColorSpec {
        bold(Color::Yellow)
    }

    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    pub fn muted() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    fn bold(color: Color) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
