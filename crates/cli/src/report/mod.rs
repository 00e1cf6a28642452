// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run report output.
//!
//! Writes per-case results in text or JSON format.

mod json;
mod text;

use serde::Serialize;
use termcolor::WriteColor;

use crate::suite::{CaseResult, CaseStatus};

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Case counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        let mut summary = Summary { total: results.len(), ..Default::default() };
        for result in results {
            match result.status {
                CaseStatus::Passed => summary.passed += 1,
                CaseStatus::Failed { .. } => summary.failed += 1,
                CaseStatus::Error { .. } => summary.errors += 1,
            }
        }
        summary
    }

    /// True when no case failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

/// Formatter for run results.
pub trait ReportFormatter {
    fn write(&self, out: &mut dyn WriteColor, results: &[CaseResult]) -> std::io::Result<()>;
}

/// Write `results` to `out` in `format`.
pub fn write_report(
    out: &mut dyn WriteColor,
    format: OutputFormat,
    results: &[CaseResult],
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => TextFormatter.write(out, results),
        OutputFormat::Json => JsonFormatter.write(out, results),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
