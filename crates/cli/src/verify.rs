// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output verification.
//!
//! Success cases compare stdout against the golden bytes exactly, with no
//! whitespace or line-ending normalization. Failure cases only look at how
//! the process ended.

use serde::Serialize;
use similar::TextDiff;

use crate::description::Expectation;
use crate::process::{ExecFailure, Outcome};

/// Lines of context around each hunk in mismatch diffs.
const DIFF_CONTEXT: usize = 3;

/// Why a case failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Mismatch {
    /// Clean exit, but stdout differs from the golden file.
    OutputDiffers { detail: String },
    /// A success case exited non-zero.
    UnexpectedExit { code: i32 },
    /// A failure case exited zero.
    UnexpectedSuccess,
    /// The binary did not reach an orderly exit.
    ExecutionFailed { failure: ExecFailure },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mismatch::OutputDiffers { detail } => write!(f, "output differs from golden file\n{detail}"),
            Mismatch::UnexpectedExit { code } => {
                write!(f, "expected clean exit, binary exited with status {code}")
            }
            Mismatch::UnexpectedSuccess => {
                write!(f, "expected non-zero exit, binary exited with status 0")
            }
            Mismatch::ExecutionFailed { failure } => write!(f, "binary did not run: {failure}"),
        }
    }
}

/// Judgement for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Mismatch),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Judge `outcome` against `expectation`.
pub fn verify(expectation: &Expectation, outcome: &Outcome) -> Verdict {
    let mismatch = match (expectation, outcome) {
        (Expectation::Output(expected), Outcome::Success { stdout }) => {
            if expected == stdout {
                return Verdict::Pass;
            }
            Mismatch::OutputDiffers { detail: describe_difference(expected, stdout) }
        }
        (Expectation::ExitError, Outcome::ExitError { .. }) => return Verdict::Pass,
        (Expectation::Output(_), Outcome::ExitError { code, .. }) => {
            Mismatch::UnexpectedExit { code: *code }
        }
        (Expectation::ExitError, Outcome::Success { .. }) => Mismatch::UnexpectedSuccess,
        (_, Outcome::Failed(failure)) => Mismatch::ExecutionFailed { failure: failure.clone() },
    };
    Verdict::Fail(mismatch)
}

/// Human-readable description of how `actual` differs from `expected`.
///
/// Always names the first differing byte; adds a unified line diff when both
/// sides are UTF-8.
pub fn describe_difference(expected: &[u8], actual: &[u8]) -> String {
    let mut detail = first_difference(expected, actual);

    if let (Ok(expected), Ok(actual)) = (std::str::from_utf8(expected), std::str::from_utf8(actual))
    {
        let diff = TextDiff::from_lines(expected, actual)
            .unified_diff()
            .context_radius(DIFF_CONTEXT)
            .header("expected", "actual")
            .to_string();
        if !diff.is_empty() {
            detail.push('\n');
            detail.push_str(&diff);
        }
    }
    detail
}

fn first_difference(expected: &[u8], actual: &[u8]) -> String {
    let offset = expected.iter().zip(actual).position(|(a, b)| a != b);
    match offset {
        Some(i) => format!(
            "first difference at byte {i}: expected {}, found {}",
            show_byte(expected[i]),
            show_byte(actual[i])
        ),
        None if expected.len() > actual.len() => format!(
            "output is truncated: expected {} bytes, found {}",
            expected.len(),
            actual.len()
        ),
        None => format!(
            "output has extra bytes: expected {} bytes, found {}",
            expected.len(),
            actual.len()
        ),
    }
}

fn show_byte(b: u8) -> String {
    format!("`{}`", b.escape_ascii())
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
