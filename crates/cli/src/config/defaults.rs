// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! Individual config fields delegate to these constants via their
//! `default_*` functions.

/// Default fixture layout, relative to the config file.
pub mod layout {
    /// Fixture root scanned by discovery.
    pub const TESTS: &str = "testdata/tests";

    /// Root that description `bundle` paths are relative to.
    pub const BUNDLES: &str = "testdata/bundles";

    /// Per-fixture description file.
    pub const DESCRIPTION: &str = "description.yaml";

    /// Per-fixture golden stdout.
    pub const EXPECTED: &str = "expected.out";
}

/// Number of cases run concurrently when `jobs` is not set.
pub fn jobs() -> usize {
    std::thread::available_parallelism().map(usize::from).unwrap_or(1)
}
