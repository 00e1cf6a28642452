// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output.

use std::io::Write;

use termcolor::{ColorSpec, WriteColor};

use crate::color::scheme;
use crate::suite::{CaseResult, CaseStatus};

use super::{ReportFormatter, Summary};

/// Text format report formatter.
///
/// One line per case in discovery order, failure detail indented below it,
/// then a summary line.
pub struct TextFormatter;

const DETAIL_INDENT: &str = "    ";

impl ReportFormatter for TextFormatter {
    fn write(&self, out: &mut dyn WriteColor, results: &[CaseResult]) -> std::io::Result<()> {
        for result in results {
            let (label, spec, detail) = match &result.status {
                CaseStatus::Passed => ("PASS", scheme::pass(), None),
                CaseStatus::Failed { mismatch } => ("FAIL", scheme::fail(), Some(mismatch.to_string())),
                CaseStatus::Error { message } => ("ERROR", scheme::error(), Some(message.clone())),
            };

            colored(out, &spec, label)?;
            write!(out, " ")?;
            colored(out, &scheme::case_id(), &result.id)?;
            writeln!(out)?;

            if let Some(detail) = detail {
                out.set_color(&scheme::detail())?;
                for line in detail.lines() {
                    writeln!(out, "{DETAIL_INDENT}{line}")?;
                }
                out.reset()?;
            }
        }

        let summary = Summary::from_results(results);
        writeln!(out)?;
        let spec = if summary.all_passed() { scheme::pass() } else { scheme::fail() };
        let verdict = if summary.all_passed() { "ok" } else { "FAILED" };
        colored(out, &spec, verdict)?;
        writeln!(
            out,
            ". {} passed; {} failed; {} errors; {} total",
            summary.passed, summary.failed, summary.errors, summary.total
        )
    }
}

fn colored(out: &mut dyn WriteColor, spec: &ColorSpec, text: &str) -> std::io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{text}")?;
    out.reset()
}
