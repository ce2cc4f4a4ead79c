//! CLI argument definitions for the QRDA III converter.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "qpp-convert",
    version,
    about = "Convert QRDA Category III reports to QPP submission JSON",
    long_about = "Convert QRDA Category III XML reports to QPP submission JSON.\n\n\
                  Each input produces <name>.qpp.json when it converts cleanly, or\n\
                  <name>.err.json listing every validation error when it does not."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert QRDA III files matching the given paths or patterns.
    Convert(ConvertArgs),

    /// List the template scopes accepted by --template-scope.
    Scopes,

    /// List the configured eCQM measures.
    Measures,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Files or wildcard patterns (`dir/*.xml`, `dir/**`).
    #[arg(value_name = "PATTERNS", required = true)]
    pub patterns: Vec<String>,

    /// Write QPP JSON even when validation would fail.
    #[arg(long = "skip-validation")]
    pub skip_validation: bool,

    /// Drop synthesized default nodes before validating.
    #[arg(long = "skip-defaults")]
    pub skip_defaults: bool,

    /// Limit decoding and validation to a template scope (repeatable).
    #[arg(short = 't', long = "template-scope", value_name = "SCOPE")]
    pub template_scope: Vec<String>,

    /// Directory receiving .qpp.json and .err.json files (default: current).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of files converted in parallel (default: available cores).
    #[arg(long = "jobs", short = 'j', value_name = "N")]
    pub jobs: Option<NonZeroUsize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
