// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `famecheck run` command implementation.
//!
//! Loads the suite, provisions the binary once, runs every case, and reports.

use regex::Regex;
use termcolor::StandardStream;

use famecheck::ExitCode;
use famecheck::cli::{Cli, RunArgs};
use famecheck::color;
use famecheck::config;
use famecheck::provision::BinCache;
use famecheck::report::{self, Summary};
use famecheck::suite::Suite;

/// Run the `famecheck run` command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let mut config = config::discover(cli.config.as_deref(), &cwd)?;
    args.apply(&mut config, &cwd);
    config.validate()?;

    // Discovery and description errors abort before any case runs
    let mut suite = Suite::load(&config)?;
    if let Some(filter) = &args.filter {
        let pattern = Regex::new(filter)
            .map_err(|e| famecheck::Error::Config(format!("invalid --filter pattern {filter:?}: {e}")))?;
        suite.retain_matching(&pattern);
    }

    let source = config.binary_source()?;
    let mut cache = BinCache::new()?;
    let binary = cache.binary(&source)?;

    let results = suite.run(&binary, config.jobs())?;
    cache.close()?;

    let mut stdout = StandardStream::stdout(color::resolve(args.color, args.no_color));
    report::write_report(&mut stdout, args.output, &results)?;

    if Summary::from_results(&results).all_passed() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::CheckFailed)
    }
}
