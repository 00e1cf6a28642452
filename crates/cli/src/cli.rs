//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;
use crate::config::Config;
use crate::report::OutputFormat;

/// Golden-output test harness for repository analysis tools
#[derive(Parser)]
#[command(name = "famecheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "FAMECHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every fixture against the binary under test
    Run(RunArgs),
    /// List fixtures in run order without running them
    List(ListArgs),
}

/// Fixture layout overrides shared by all commands.
#[derive(clap::Args, Default)]
pub struct LayoutArgs {
    /// Fixture root (directories named 0, 1, 2, ...)
    #[arg(long, value_name = "DIR")]
    pub tests: Option<PathBuf>,

    /// Root that description `bundle` paths are relative to
    #[arg(long, value_name = "DIR")]
    pub bundles: Option<PathBuf>,
}

impl LayoutArgs {
    fn apply(&self, config: &mut Config, cwd: &std::path::Path) {
        if let Some(tests) = &self.tests {
            config.tests = crate::config::resolve(cwd, tests);
        }
        if let Some(bundles) = &self.bundles {
            config.bundles = crate::config::resolve(cwd, bundles);
        }
    }
}

#[derive(clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Prebuilt binary under test
    #[arg(long, value_name = "PATH", conflicts_with = "target")]
    pub binary: Option<PathBuf>,

    /// Cargo bin target to build and test
    #[arg(long, value_name = "NAME")]
    pub target: Option<String>,

    /// Cargo.toml used to build --target
    #[arg(long, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Flag passed before the materialized repository path
    #[arg(long, value_name = "FLAG", allow_hyphen_values = true)]
    pub repository_flag: Option<String>,

    /// Maximum cases run at once
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Run only cases whose `<dir>/<name>` matches this regex
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of file config.
    pub fn apply(&self, config: &mut Config, cwd: &std::path::Path) {
        self.layout.apply(config, cwd);
        if let Some(binary) = &self.binary {
            config.binary = Some(crate::config::resolve(cwd, binary));
        }
        if let Some(target) = &self.target {
            // An explicit target replaces any binary from the config file
            config.binary = None;
            config.target = Some(target.clone());
        }
        if let Some(manifest) = &self.manifest_path {
            config.manifest_path = Some(crate::config::resolve(cwd, manifest));
        }
        if let Some(flag) = &self.repository_flag {
            config.repository_flag = flag.clone();
        }
        if let Some(jobs) = self.jobs {
            config.jobs = Some(usize::from(jobs));
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

impl ListArgs {
    pub fn apply(&self, config: &mut Config, cwd: &std::path::Path) {
        self.layout.apply(config, cwd);
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
