// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Engine adapter that runs every test in a fresh host process.
//!
//! The composed program is staged in a temporary file and handed to the
//! configured host command. Process boundaries give full isolation: a
//! segfault or abort in the host only affects the run that caused it.

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::NamedTempFile;

use super::protocol::{self, parse_error_line};
use super::{
    Engine, ErrorPhase, ExecutionRequest, ExecutionResult, FeatureSet, ThrownError,
};
use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::metadata::Mode;

/// Placeholder replaced by the staged program path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Placeholder replaced by the mode name.
pub const MODE_PLACEHOLDER: &str = "{mode}";

/// How often a running child is polled for exit or interruption.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Settings for a [`CommandEngine`].
#[derive(Debug, Clone)]
pub struct CommandEngineConfig {
    /// Program and arguments, with optional placeholders.
    pub command: Vec<String>,
    pub features: FeatureSet,
    pub parse_only: bool,
    /// Exit status the host uses for errors raised before evaluation.
    pub early_error_status: Option<i32>,
    /// Exit statuses that mean the host itself crashed.
    pub crash_status: Vec<i32>,
}

/// How a host process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
    Unknown,
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signaled(signal);
            }
        }
        Termination::Unknown
    }
}

/// Engine backed by an external host executable.
pub struct CommandEngine {
    name: String,
    program: String,
    args: Vec<String>,
    features: FeatureSet,
    parse_only: bool,
    early_error_status: Option<i32>,
    crash_status: Vec<i32>,
}

impl CommandEngine {
    pub fn new(config: CommandEngineConfig) -> Result<Self> {
        let mut parts = config.command.into_iter();
        let program = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::Argument("engine command is empty".to_string()))?;
        let name = Path::new(&program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.clone());
        Ok(Self {
            name,
            program,
            args: parts.collect(),
            features: config.features,
            parse_only: config.parse_only,
            early_error_status: config.early_error_status,
            crash_status: config.crash_status,
        })
    }

    /// Arguments for one run, placeholders substituted.
    ///
    /// Without a `{file}` placeholder the path is appended.
    pub fn argv(&self, file: &Path, mode: Mode) -> Vec<OsString> {
        let mut saw_file = false;
        let mut argv: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg == FILE_PLACEHOLDER {
                    saw_file = true;
                    file.as_os_str().to_owned()
                } else if arg.contains(FILE_PLACEHOLDER) || arg.contains(MODE_PLACEHOLDER) {
                    saw_file |= arg.contains(FILE_PLACEHOLDER);
                    OsString::from(
                        arg.replace(FILE_PLACEHOLDER, &file.to_string_lossy())
                            .replace(MODE_PLACEHOLDER, mode.as_str()),
                    )
                } else {
                    OsString::from(arg)
                }
            })
            .collect();
        if !saw_file {
            argv.push(file.as_os_str().to_owned());
        }
        argv
    }

    /// Write the composed program where the host can load it.
    ///
    /// Module runs are staged beside the case so relative imports of
    /// fixture files resolve.
    fn stage(&self, request: &ExecutionRequest) -> io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        let file = if request.mode == Mode::Module {
            let dir = request.file.parent().unwrap_or(Path::new("."));
            builder.prefix(".conform-").suffix(".mjs").tempfile_in(dir)?
        } else {
            builder.prefix("conform-").suffix(".js").tempfile()?
        };
        std::fs::write(file.path(), request.compose())?;
        Ok(file)
    }

    /// Map a finished host process to an execution result.
    pub fn interpret(
        &self,
        request: &ExecutionRequest,
        termination: Termination,
        stdout: &str,
        stderr: &str,
    ) -> ExecutionResult {
        let code = match termination {
            Termination::Signaled(signal) => {
                return ExecutionResult::crash(format!("host killed by signal {signal}"));
            }
            Termination::Unknown => {
                return ExecutionResult::crash("host ended without an exit status");
            }
            Termination::Exited(code) => code,
        };

        if code == 0 {
            return ExecutionResult::Completed {
                output: stdout.to_string(),
            };
        }
        if self.crash_status.contains(&code) {
            return ExecutionResult::crash(format!("host exited with crash status {code}"));
        }

        let combined = format!("{stdout}\n{stderr}");
        if protocol::hit_do_not_evaluate(&combined) {
            return ExecutionResult::Threw {
                phase: ErrorPhase::Runtime,
                error: ThrownError::new("Test262Error", protocol::DO_NOT_EVALUATE_MESSAGE),
            };
        }

        let error = parse_error_line(stderr)
            .or_else(|| parse_error_line(stdout))
            .unwrap_or_else(|| ThrownError::new("Error", format!("host exited with status {code}")));

        let phase = match self.early_error_status {
            Some(early) if early == code => ErrorPhase::Parse,
            Some(_) => ErrorPhase::Runtime,
            None if request.guarded_by_do_not_evaluate() => ErrorPhase::Parse,
            None => ErrorPhase::Runtime,
        };

        ExecutionResult::Threw { phase, error }
    }
}

impl Engine for CommandEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        request: &ExecutionRequest,
        interrupt: &CancellationToken,
    ) -> ExecutionResult {
        let staged = match self.stage(request) {
            Ok(file) => file,
            Err(e) => return ExecutionResult::crash(format!("failed to stage program: {e}")),
        };

        let child = Command::new(&self.program)
            .args(self.argv(staged.path(), request.mode))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                return ExecutionResult::crash(format!("failed to spawn {}: {e}", self.program));
            }
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let termination = match wait_or_kill(&mut child, interrupt) {
            Ok(Some(status)) => Termination::from(status),
            Ok(None) => return ExecutionResult::Timeout,
            Err(e) => return ExecutionResult::crash(format!("failed to wait for host: {e}")),
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);
        tracing::trace!(path = %request.path, ?termination, "host finished");
        self.interpret(request, termination, &stdout, &stderr)
    }

    fn supported_features(&self) -> &FeatureSet {
        &self.features
    }

    fn parse_only(&self) -> bool {
        self.parse_only
    }
}

/// Poll the child until it exits, or kill it once `interrupt` fires.
///
/// Returns `Ok(None)` when the child was killed.
fn wait_or_kill(child: &mut Child, interrupt: &CancellationToken) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if interrupt.is_cancelled() {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Read a pipe to the end on its own thread so a chatty host never blocks
/// on a full pipe buffer.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    let mut pipe = pipe?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }))
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
