// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite assembly and parallel case execution.
//!
//! Discovery and description loading happen once, up front, and abort the
//! run on any error. Each case then runs Load → Materialize → Run → Verify
//! on its own checkout. Cases run in parallel using rayon, isolating errors
//! so one case failing (or panicking) doesn't prevent others from running.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::bundle::Checkout;
use crate::config::Config;
use crate::description::TestCase;
use crate::discovery;
use crate::error::Result;
use crate::process::Invocation;
use crate::verify::{Mismatch, Verdict, verify};

/// How a single case ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    /// The binary ran but did not meet the expectation.
    Failed { mismatch: Mismatch },
    /// The case could not be set up (golden missing, bundle broken, ...).
    Error { message: String },
}

/// Result of one case, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// `<dir>/<name>`.
    pub id: String,
    #[serde(flatten)]
    pub status: CaseStatus,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        matches!(self.status, CaseStatus::Passed)
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// A loaded fixture suite.
#[derive(Debug)]
pub struct Suite {
    cases: Vec<TestCase>,
    bundles: PathBuf,
    expected: String,
    repository_flag: String,
}

impl Suite {
    /// Discover fixture directories and load every description.
    pub fn load(config: &Config) -> Result<Self> {
        let dirs = discovery::list_test_dirs(&config.tests)?;
        let cases = dirs
            .into_iter()
            .map(|dir| TestCase::load(dir, &config.description))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(count = cases.len(), tests = %config.tests.display(), "loaded suite");

        Ok(Self {
            cases,
            bundles: config.bundles.clone(),
            expected: config.expected.clone(),
            repository_flag: config.repository_flag.clone(),
        })
    }

    /// Cases in run order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Keep only cases whose id matches `pattern`.
    pub fn retain_matching(&mut self, pattern: &Regex) {
        self.cases.retain(|case| pattern.is_match(&case.id()));
    }

    /// Run every case against `binary` with at most `jobs` in flight.
    ///
    /// Results come back in discovery order regardless of completion order.
    pub fn run(&self, binary: &Path, jobs: usize) -> Result<Vec<CaseResult>> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        let results: Vec<CaseResult> =
            pool.install(|| self.cases.par_iter().map(|case| self.run_isolated(case, binary)).collect());
        Ok(results)
    }

    /// Run one case, converting a panic into an error result.
    fn run_isolated(&self, case: &TestCase, binary: &Path) -> CaseResult {
        let start = Instant::now();
        // Catch panics to ensure error isolation; the checkout is dropped during unwinding
        let status =
            match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.run_case(case, binary))) {
                Ok(status) => status,
                Err(_) => CaseStatus::Error { message: "internal error: case panicked".to_string() },
            };

        let result = CaseResult { id: case.id(), status, duration: start.elapsed() };
        match &result.status {
            CaseStatus::Passed => tracing::debug!(case = %result.id, "passed"),
            CaseStatus::Failed { mismatch } => tracing::debug!(case = %result.id, %mismatch, "failed"),
            CaseStatus::Error { message } => tracing::warn!(case = %result.id, error = %message, "case errored"),
        }
        result
    }

    /// Load → Materialize → Run → Verify for a single case.
    pub fn run_case(&self, case: &TestCase, binary: &Path) -> CaseStatus {
        let expectation = match case.expectation(&self.expected) {
            Ok(expectation) => expectation,
            Err(e) => return CaseStatus::Error { message: e.to_string() },
        };

        let bundle = case.description.bundle_path(&self.bundles);
        let checkout = match Checkout::materialize(&bundle) {
            Ok(checkout) => checkout,
            Err(e) => return CaseStatus::Error { message: e.to_string() },
        };

        let outcome = Invocation {
            binary,
            repository_flag: &self.repository_flag,
            repository: checkout.path(),
            args: &case.description.args,
        }
        .run();
        let verdict = verify(&expectation, &outcome);

        if let Err(e) = checkout.close() {
            tracing::warn!(case = %case.id(), error = %e, "failed to remove checkout");
        }

        match verdict {
            Verdict::Pass => CaseStatus::Passed,
            Verdict::Fail(mismatch) => CaseStatus::Failed { mismatch },
        }
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
