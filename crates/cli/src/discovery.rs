// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture and config discovery.
//!
//! Fixture directories are named by integers; that integer is the run order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file name looked up by [`find_config`].
pub const CONFIG_FILE: &str = "famecheck.toml";

/// A discovered fixture directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDir {
    /// Directory name as it appears on disk.
    pub name: String,
    /// Parsed order key.
    pub number: u64,
    pub path: PathBuf,
}

/// List fixture directories under `root`, sorted by their integer name.
///
/// Files are ignored. A directory whose name is not a non-negative integer,
/// or two directories with the same integer (`1` and `01`), fail the whole
/// discovery.
pub fn list_test_dirs(root: &Path) -> Result<Vec<TestDir>> {
    let read_err = |source| Error::ReadDir { path: root.to_path_buf(), source };
    let entries = std::fs::read_dir(root).map_err(read_err)?;

    let mut by_number: BTreeMap<u64, TestDir> = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let number = parse_test_number(&name).ok_or_else(|| Error::InvalidTestName {
            root: root.to_path_buf(),
            name: name.clone(),
        })?;

        let dir = TestDir { name, number, path: entry.path() };
        if let Some(existing) = by_number.get(&number) {
            // Report in a stable order regardless of read_dir order
            let (first, second) = if existing.name <= dir.name {
                (existing.name.clone(), dir.name)
            } else {
                (dir.name, existing.name.clone())
            };
            return Err(Error::DuplicateTestName {
                root: root.to_path_buf(),
                number,
                first,
                second,
            });
        }
        by_number.insert(number, dir);
    }

    tracing::debug!(root = %root.display(), count = by_number.len(), "discovered test directories");
    Ok(by_number.into_values().collect())
}

/// Parse a fixture directory name. Only ASCII digits are accepted.
fn parse_test_number(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Find famecheck.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
