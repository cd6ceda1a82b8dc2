/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// mkmtable — export a solved microkinetic model output as a TSV table.
#[derive(Debug, Parser)]
#[command(
    name = "mkmtable",
    about = "Export a solved microkinetic model output as a tab-separated table",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output variable to export (e.g. rate, coverage, rate_control).
    pub variable: String,

    /// Glob pattern selecting exactly one model log file (e.g. "*.log").
    pub logfile: String,

    /// Directory the `<VARIABLE>_table.txt` file is written into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Build and validate the table without writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// List every output variable of the model with its shaped labels first.
    #[arg(long)]
    pub show_labels: bool,

    /// Report format. Auto-detects: table when TTY, json when piped.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Number of data rows shown in the table preview.
    #[arg(long, value_name = "N", default_value = "10")]
    pub limit: usize,

    /// Omit the preview header row.
    #[arg(long)]
    pub no_header: bool,

    /// Print stage timing to stderr for debugging.
    #[arg(long)]
    pub debug: bool,
}

/// Report format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// JSON object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Preview of the table's first rows plus a summary line.
    Table,
    /// Path of the table file only.
    Path,
}
