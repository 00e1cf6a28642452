// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture-driven golden-output harness for repository analysis tools.
//!
//! A suite is a directory of numbered fixtures. Each fixture names a git
//! bundle and the arguments to pass; the harness expands the bundle into a
//! scratch checkout, runs the binary under test as
//! `<binary> --repository <checkout> <args...>`, and compares stdout with the
//! fixture's golden file (or, for expected failures, checks for a non-zero
//! exit).

pub mod bundle;
pub mod cli;
pub mod color;
pub mod config;
pub mod description;
pub mod discovery;
pub mod error;
pub mod process;
pub mod provision;
pub mod report;
pub mod suite;
pub mod verify;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, ExitCode, Result};
