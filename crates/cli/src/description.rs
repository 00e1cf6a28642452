// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test descriptions and golden output.
//!
//! Each fixture directory holds a `description.yaml`:
//!
//! ```yaml
//! name: simple
//! args: ["--extensions", "go"]
//! bundle: simple.bundle
//! error: false
//! ```
//!
//! and, unless `error` is set, an `expected.out` with the exact stdout.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::discovery::TestDir;
use crate::error::{Error, Result};

const KNOWN_KEYS: [&str; 4] = ["name", "args", "bundle", "error"];

/// Top-level keys of a description mapping that are not description fields.
fn unknown_keys(content: &str) -> Vec<String> {
    let Ok(serde_yaml::Value::Mapping(map)) = serde_yaml::from_str::<serde_yaml::Value>(content) else {
        return Vec::new();
    };
    map.keys()
        .filter_map(|key| key.as_str())
        .filter(|key| !KNOWN_KEYS.contains(key))
        .map(str::to_string)
        .collect()
}

/// Declarative description of one fixture.
///
/// Keys other than the four below are ignored with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestDescription {
    /// Human-readable case name, used only for reporting.
    pub name: String,

    /// Arguments passed after the repository flag, in order.
    #[serde(default)]
    pub args: Vec<String>,

    /// Bundle path relative to the bundles root.
    pub bundle: String,

    /// The binary is expected to exit non-zero.
    #[serde(default)]
    pub error: bool,
}

impl TestDescription {
    /// Read and parse the description file inside `dir`.
    pub fn load(dir: &Path, file_name: &str) -> Result<Self> {
        let path = dir.join(file_name);
        let content = std::fs::read_to_string(&path)
            .map_err(|source| Error::ReadDescription { path: path.clone(), source })?;
        let desc: TestDescription = serde_yaml::from_str(&content)
            .map_err(|source| Error::ParseDescription { path: path.clone(), source })?;
        desc.check_bundle(&path)?;
        for key in unknown_keys(&content) {
            tracing::warn!(description = %path.display(), %key, "ignoring unknown description key");
        }
        Ok(desc)
    }

    /// Reject bundle references that could resolve outside the bundles root.
    fn check_bundle(&self, path: &Path) -> Result<()> {
        let invalid = |reason| Error::InvalidBundlePath {
            path: path.to_path_buf(),
            bundle: self.bundle.clone(),
            reason,
        };

        if self.bundle.trim().is_empty() {
            return Err(invalid("bundle path is empty"));
        }
        for component in Path::new(&self.bundle).components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("bundle path escapes the bundles root")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("bundle path must be relative"));
                }
            }
        }
        Ok(())
    }

    /// Resolve the bundle reference against `bundles_root`.
    pub fn bundle_path(&self, bundles_root: &Path) -> PathBuf {
        bundles_root.join(&self.bundle)
    }
}

/// What a case must observe from the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Clean exit with exactly these stdout bytes.
    Output(Vec<u8>),
    /// Non-zero exit; output is not inspected.
    ExitError,
}

/// A fixture directory paired with its parsed description.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub dir: TestDir,
    pub description: TestDescription,
}

impl TestCase {
    /// Load the description for a discovered fixture directory.
    pub fn load(dir: TestDir, description_file: &str) -> Result<Self> {
        let description = TestDescription::load(&dir.path, description_file)?;
        Ok(Self { dir, description })
    }

    /// Reporting id: `<dir>/<name>`.
    pub fn id(&self) -> String {
        format!("{}/{}", self.dir.name, self.description.name)
    }

    /// Load the expectation for this case.
    ///
    /// Expected-failure cases never read the golden file, so a stale or
    /// missing one is ignored.
    pub fn expectation(&self, expected_file: &str) -> Result<Expectation> {
        if self.description.error {
            return Ok(Expectation::ExitError);
        }
        let path = self.dir.path.join(expected_file);
        let bytes =
            std::fs::read(&path).map_err(|source| Error::MissingGolden { path, source })?;
        Ok(Expectation::Output(bytes))
    }
}

#[cfg(test)]
#[path = "description_tests.rs"]
mod tests;
