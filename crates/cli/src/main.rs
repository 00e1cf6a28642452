// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod cmd_list;
mod cmd_run;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use famecheck::ExitCode;
use famecheck::cli::{Cli, Command};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "FAMECHECK_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "famecheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Run(args) => cmd_run::run(&cli, args),
        Command::List(args) => cmd_list::run(&cli, args),
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("famecheck: {e:#}");
            let code = match e.downcast_ref::<famecheck::Error>() {
                Some(err) => ExitCode::for_error(err),
                None => ExitCode::InternalError,
            };
            code.into()
        }
    }
}
