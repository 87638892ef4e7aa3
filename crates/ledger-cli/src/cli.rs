//! CLI argument definitions for the ledger import analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ledger-import",
    version,
    about = "Trade ledger import analyzer - preview spreadsheet uploads before committing",
    long_about = "Analyze spreadsheet uploads of business records (sales, purchases,\n\
                  companies, suppliers, hotels, payments), detect which record type\n\
                  each sheet holds, map columns onto canonical fields, and produce a\n\
                  reviewable preview before anything touches storage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Detect record-type patterns and column mappings per sheet.
    Analyze(FileArgs),

    /// Build the full import preview: mapped rows, validation results,
    /// and estimated entity creations.
    Preview(FileArgs),

    /// Run the commit path against an in-memory store to show exactly
    /// what a confirmed import would create.
    Commit(FileArgs),

    /// List the pattern catalog with keywords and required fields.
    Patterns,
}

#[derive(Parser)]
pub struct FileArgs {
    /// Spreadsheet to analyze (.xlsx, .xls, .ods, or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
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
