// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture materialization from git bundles.
//!
//! Bundles are expanded with the `git` binary (or `$GIT`). libgit2 cannot
//! clone from a bundle, so git2 is only used to confirm the result opens as a
//! repository.

use std::path::Path;
use std::process::{Command, Stdio};

use git2::Repository;
use tempfile::TempDir;

use crate::error::{Error, Result};

/// Prefix for per-case checkout directories.
const CHECKOUT_PREFIX: &str = "famecheck-";

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
pub fn git_command() -> Command {
    let bin = std::env::var_os("GIT").unwrap_or_else(|| "git".into());
    Command::new(bin)
}

/// A materialized repository in a harness-owned temporary directory.
///
/// The directory and everything in it is removed when the checkout is
/// dropped, including while unwinding from a panic.
#[derive(Debug)]
pub struct Checkout {
    dir: TempDir,
}

impl Checkout {
    /// Create a fresh, empty checkout directory and expand `bundle` into it.
    pub fn materialize(bundle: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(CHECKOUT_PREFIX).tempdir()?;
        unbundle(bundle, dir.path())?;
        Ok(Self { dir })
    }

    /// Root of the working copy.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the checkout now, reporting any cleanup failure.
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}

/// Clone `bundle` into `dst`, which must be missing or empty.
pub fn unbundle(bundle: &Path, dst: &Path) -> Result<()> {
    let fail = |message: String| Error::Materialize { bundle: bundle.to_path_buf(), message };

    if !bundle.is_file() {
        return Err(fail("bundle file not found".to_string()));
    }
    if dst.exists() && std::fs::read_dir(dst)?.next().is_some() {
        return Err(fail(format!("destination {} is not empty", dst.display())));
    }

    tracing::debug!(bundle = %bundle.display(), dst = %dst.display(), "unbundling");
    let output = git_command()
        .arg("clone")
        .arg("--quiet")
        .arg(bundle)
        .arg(dst)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| fail(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(fail(format!("git clone failed ({}): {}", output.status, stderr.trim())));
    }

    let repo = Repository::open(dst).map_err(|e| fail(format!("clone is not a repository: {e}")))?;
    if repo.head().is_err() {
        tracing::warn!(bundle = %bundle.display(), "bundle has no HEAD; working tree is empty");
    }
    Ok(())
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
