// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration.
//!
//! `famecheck.toml` is optional. Every key has a default and every key can be
//! overridden on the command line; relative paths resolve against the
//! directory holding the file.

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::process::REPOSITORY_FLAG;
use crate::provision::BinarySource;

/// Contents of `famecheck.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fixture root.
    #[serde(default = "Config::default_tests")]
    pub tests: PathBuf,

    /// Bundles root.
    #[serde(default = "Config::default_bundles")]
    pub bundles: PathBuf,

    /// Description file name inside each fixture directory.
    #[serde(default = "Config::default_description")]
    pub description: String,

    /// Golden output file name inside each fixture directory.
    #[serde(default = "Config::default_expected")]
    pub expected: String,

    /// Flag placed before the materialized repository path.
    #[serde(default = "Config::default_repository_flag")]
    pub repository_flag: String,

    /// Prebuilt binary under test. Takes priority over `target`.
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Cargo bin target to build.
    #[serde(default)]
    pub target: Option<String>,

    /// Manifest used when building `target`.
    #[serde(default)]
    pub manifest_path: Option<PathBuf>,

    /// Maximum concurrently running cases.
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tests: Self::default_tests(),
            bundles: Self::default_bundles(),
            description: Self::default_description(),
            expected: Self::default_expected(),
            repository_flag: Self::default_repository_flag(),
            binary: None,
            target: None,
            manifest_path: None,
            jobs: None,
        }
    }
}

impl Config {
    fn default_tests() -> PathBuf {
        PathBuf::from(defaults::layout::TESTS)
    }

    fn default_bundles() -> PathBuf {
        PathBuf::from(defaults::layout::BUNDLES)
    }

    fn default_description() -> String {
        defaults::layout::DESCRIPTION.to_string()
    }

    fn default_expected() -> String {
        defaults::layout::EXPECTED.to_string()
    }

    fn default_repository_flag() -> String {
        REPOSITORY_FLAG.to_string()
    }

    /// Parse config text. Relative paths are resolved against `base`.
    pub fn parse(content: &str, base: &Path) -> Result<Self> {
        let mut config: Config =
            toml::from_str(content).map_err(|e| Error::Config(format!("invalid config: {e}")))?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    /// Defaults with paths resolved against `base`.
    pub fn with_base(base: &Path) -> Self {
        let mut config = Self::default();
        config.resolve_paths(base);
        config
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.tests = resolve(base, &self.tests);
        self.bundles = resolve(base, &self.bundles);
        self.binary = self.binary.as_deref().map(|p| resolve(base, p));
        self.manifest_path = self.manifest_path.as_deref().map(|p| resolve(base, p));
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.repository_flag.is_empty() {
            return Err(Error::Config("repository_flag must not be empty".to_string()));
        }
        if self.description.is_empty() || self.expected.is_empty() {
            return Err(Error::Config("description and expected file names must not be empty".to_string()));
        }
        if self.jobs == Some(0) {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The binary to provision, preferring a prebuilt path over a cargo target.
    pub fn binary_source(&self) -> Result<BinarySource> {
        if let Some(path) = &self.binary {
            return Ok(BinarySource::Prebuilt(path.clone()));
        }
        if let Some(target) = &self.target {
            return Ok(BinarySource::Cargo {
                target: target.clone(),
                manifest_path: self.manifest_path.clone(),
            });
        }
        Err(Error::Config(
            "no binary under test: set `binary` or `target` (or pass --binary/--target)".to_string(),
        ))
    }

    /// Effective concurrency.
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(defaults::jobs)
    }
}

/// Load config from a file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Config::parse(&content, base)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

/// Load the explicit config file, or the nearest `famecheck.toml` above
/// `cwd`, or fall back to defaults rooted at `cwd`.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return load(&resolve(cwd, path));
    }
    match crate::discovery::find_config(cwd) {
        Some(path) => {
            tracing::debug!(config = %path.display(), "using config file");
            load(&path)
        }
        None => Ok(Config::with_base(cwd)),
    }
}

/// Absolute form of `path` relative to `base`.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
