// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and exit codes.
//!
//! Every variant here is a setup or infrastructure failure. A binary that
//! produced the wrong output is not an error: it is a failed
//! [`Verdict`](crate::verify::Verdict).

use std::path::PathBuf;

use thiserror::Error;

/// Harness setup and infrastructure errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The fixture root could not be listed.
    #[error("failed to read test directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixture directory name is not a non-negative integer.
    #[error("test directory name {name:?} in {root} is not a non-negative integer")]
    InvalidTestName { root: PathBuf, name: String },

    /// Two fixture directories parse to the same integer.
    #[error("test directories {first:?} and {second:?} in {root} both parse to {number}")]
    DuplicateTestName { root: PathBuf, number: u64, first: String, second: String },

    /// The description file is missing or unreadable.
    #[error("failed to read test description {path}: {source}")]
    ReadDescription {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The description file is not valid YAML for a test description.
    #[error("failed to parse test description {path}: {source}")]
    ParseDescription {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A description references a bundle outside the bundles root.
    #[error("invalid bundle reference {bundle:?} in {path}: {reason}")]
    InvalidBundlePath { path: PathBuf, bundle: String, reason: &'static str },

    /// A success case has no golden output file.
    #[error("missing expected output {path}: {source}")]
    MissingGolden {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Expanding a bundle into a working repository failed.
    #[error("failed to materialize bundle {bundle}: {message}")]
    Materialize { bundle: PathBuf, message: String },

    /// The binary under test could not be produced.
    #[error("failed to provision binary: {0}")]
    Provision(String),

    /// Invalid harness configuration.
    #[error("{0}")]
    Config(String),

    /// The case worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the `famecheck` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every selected case passed.
    Success = 0,
    /// At least one case failed verification or errored during setup.
    CheckFailed = 1,
    /// The suite could not be assembled (discovery, descriptions, config, provisioning).
    ConfigError = 2,
    /// Unexpected harness failure.
    InternalError = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// Map a library error to the exit code it should produce.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Io(_) | Error::ThreadPool(_) => ExitCode::InternalError,
            _ => ExitCode::ConfigError,
        }
    }
}
