// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation of the binary under test.
//!
//! stdout is captured in full, stderr is discarded. The outcome is one of
//! three closed classes; expected-failure cases depend on telling an orderly
//! non-zero exit apart from a binary that never ran or was killed.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;

/// Default flag that selects the repository to analyze.
pub const REPOSITORY_FLAG: &str = "--repository";

/// Result of running the binary once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exit status zero.
    Success { stdout: Vec<u8> },
    /// Orderly exit with a non-zero status.
    ExitError { code: i32, stdout: Vec<u8> },
    /// The binary could not run to an orderly exit.
    Failed(ExecFailure),
}

/// Execution-level failures, distinct from a non-zero exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecFailure {
    /// Spawning failed (not found, permission denied, ...).
    Spawn { message: String },
    /// Terminated without an exit code, e.g. by a signal.
    Terminated { signal: Option<i32> },
}

impl std::fmt::Display for ExecFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecFailure::Spawn { message } => write!(f, "failed to execute: {message}"),
            ExecFailure::Terminated { signal: Some(sig) } => write!(f, "terminated by signal {sig}"),
            ExecFailure::Terminated { signal: None } => write!(f, "terminated without exit code"),
        }
    }
}

impl Outcome {
    /// Short classification used in reports.
    pub fn describe(&self) -> String {
        match self {
            Outcome::Success { .. } => "exited with status 0".to_string(),
            Outcome::ExitError { code, .. } => format!("exited with status {code}"),
            Outcome::Failed(failure) => failure.to_string(),
        }
    }
}

/// A single run of the binary against a materialized repository.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub binary: &'a Path,
    pub repository_flag: &'a str,
    pub repository: &'a Path,
    pub args: &'a [String],
}

impl Invocation<'_> {
    /// Final argument vector: repository flag and path, then declared args.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(OsString::from(self.repository_flag));
        argv.push(self.repository.as_os_str().to_owned());
        argv.extend(self.args.iter().map(OsString::from));
        argv
    }

    /// Run to completion and classify the result. Never times out.
    pub fn run(&self) -> Outcome {
        let argv = self.argv();
        tracing::debug!(binary = %self.binary.display(), ?argv, "running binary");

        let output = match Command::new(self.binary)
            .args(&argv)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                return Outcome::Failed(ExecFailure::Spawn { message: e.to_string() });
            }
        };

        let outcome = match output.status.code() {
            Some(0) => Outcome::Success { stdout: output.stdout },
            Some(code) => Outcome::ExitError { code, stdout: output.stdout },
            None => Outcome::Failed(ExecFailure::Terminated { signal: signal_of(&output.status) }),
        };
        tracing::debug!(binary = %self.binary.display(), outcome = %outcome.describe(), "binary finished");
        outcome
    }
}

#[cfg(unix)]
fn signal_of(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
