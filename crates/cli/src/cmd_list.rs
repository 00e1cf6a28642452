// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `famecheck list` command implementation.

use std::io::Write;

use serde_json::json;

use famecheck::ExitCode;
use famecheck::cli::{Cli, ListArgs};
use famecheck::config;
use famecheck::report::OutputFormat;
use famecheck::suite::Suite;

/// Run the `famecheck list` command.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let mut config = config::discover(cli.config.as_deref(), &cwd)?;
    args.apply(&mut config, &cwd);

    let suite = Suite::load(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            for case in suite.cases() {
                let expect = if case.description.error { "error" } else { "output" };
                writeln!(out, "{}\t{}\t{}", case.id(), case.description.bundle, expect)?;
            }
        }
        OutputFormat::Json => {
            let cases: Vec<_> = suite
                .cases()
                .iter()
                .map(|case| {
                    json!({
                        "id": case.id(),
                        "dir": case.dir.name,
                        "name": case.description.name,
                        "args": case.description.args,
                        "bundle": case.description.bundle,
                        "error": case.description.error,
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut out, &cases)?;
            writeln!(out)?;
        }
    }
    Ok(ExitCode::Success)
}
