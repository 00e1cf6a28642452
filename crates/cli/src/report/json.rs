// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use std::io::Write;

use serde_json::json;
use termcolor::WriteColor;

use crate::suite::CaseResult;

use super::{ReportFormatter, Summary};

/// JSON format report formatter.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn write(&self, out: &mut dyn WriteColor, results: &[CaseResult]) -> std::io::Result<()> {
        let summary = Summary::from_results(results);
        let report = json!({
            "passed": summary.all_passed(),
            "summary": summary,
            "cases": results,
        });
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)
    }
}
