// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Provisioning of the binary under test.
//!
//! A [`BinCache`] is built once before the first case and closed after the
//! last. Cargo targets are compiled into a scratch target directory owned by
//! the cache and memoized per target, so the suite only ever sees a
//! read-only path.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use tempfile::TempDir;

use crate::error::{Error, Result};

/// Where the binary under test comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinarySource {
    /// An already-built executable.
    Prebuilt(PathBuf),
    /// A `[[bin]]` target built with cargo.
    Cargo { target: String, manifest_path: Option<PathBuf> },
}

/// Cache of provisioned binaries with an explicit teardown.
pub struct BinCache {
    target_dir: TempDir,
    built: HashMap<BinarySource, PathBuf>,
}

impl BinCache {
    pub fn new() -> Result<Self> {
        let target_dir = tempfile::Builder::new().prefix("famecheck-bin-").tempdir()?;
        Ok(Self { target_dir, built: HashMap::new() })
    }

    /// Scratch directory cargo builds into.
    pub fn target_dir(&self) -> &Path {
        self.target_dir.path()
    }

    /// Absolute path to an executable for `source`, building it on first use.
    pub fn binary(&mut self, source: &BinarySource) -> Result<PathBuf> {
        if let Some(path) = self.built.get(source) {
            tracing::debug!(binary = %path.display(), "binary cache hit");
            return Ok(path.clone());
        }

        let path = match source {
            BinarySource::Prebuilt(path) => prebuilt(path)?,
            BinarySource::Cargo { target, manifest_path } => {
                cargo_build(target, manifest_path.as_deref(), self.target_dir.path())?
            }
        };
        tracing::info!(binary = %path.display(), "provisioned binary");
        self.built.insert(source.clone(), path.clone());
        Ok(path)
    }

    /// Remove the scratch target directory and every binary built into it.
    pub fn close(self) -> Result<()> {
        self.target_dir.close()?;
        Ok(())
    }
}

/// Absolute path to a prebuilt executable. Symlinks are kept so multi-call
/// binaries still see their own name in `argv[0]`.
fn prebuilt(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| Error::Provision(format!("{}: {e}", path.display())))?;
    let metadata = std::fs::metadata(&absolute)
        .map_err(|e| Error::Provision(format!("{}: {e}", absolute.display())))?;
    if !metadata.is_file() {
        return Err(Error::Provision(format!("{} is not a file", absolute.display())));
    }
    Ok(absolute)
}

/// Subset of cargo's `--message-format=json` stream.
#[derive(Debug, Deserialize)]
struct CargoMessage {
    reason: String,
    #[serde(default)]
    target: Option<CargoTarget>,
    #[serde(default)]
    executable: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CargoTarget {
    name: String,
    #[serde(default)]
    kind: Vec<String>,
}

/// Find the executable for bin `target` in a cargo JSON message stream.
fn find_executable(stream: impl BufRead, target: &str) -> Option<PathBuf> {
    let mut found = None;
    for line in stream.lines().map_while(std::result::Result::ok) {
        // Non-JSON lines (e.g. build script chatter) are skipped
        let Ok(message) = serde_json::from_str::<CargoMessage>(&line) else {
            continue;
        };
        if message.reason != "compiler-artifact" {
            continue;
        }
        let Some(artifact) = message.target else {
            continue;
        };
        if artifact.name == target && artifact.kind.iter().any(|k| k == "bin") {
            found = message.executable.or(found);
        }
    }
    found
}

fn cargo_build(target: &str, manifest_path: Option<&Path>, target_dir: &Path) -> Result<PathBuf> {
    let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
    let mut cmd = Command::new(cargo);
    cmd.args(["build", "--quiet", "--message-format=json", "--bin", target])
        .arg("--target-dir")
        .arg(target_dir);
    if let Some(manifest) = manifest_path {
        cmd.arg("--manifest-path").arg(manifest);
    }

    tracing::info!(bin = target, "building binary with cargo");
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::Provision(format!("failed to run cargo: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Provision(format!(
            "cargo build --bin {target} failed ({}): {}",
            output.status,
            stderr.trim()
        )));
    }

    find_executable(output.stdout.as_slice(), target).ok_or_else(|| {
        Error::Provision(format!("cargo build produced no executable for bin target {target:?}"))
    })
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;
