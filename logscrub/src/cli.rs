// logscrub/src/cli.rs
//! This file defines the command-line interface (CLI) for the logscrub
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "logscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub secrets and PII out of CI build logs",
    long_about = "Logscrub is a command-line utility that redacts sensitive information from CI build logs before they are forwarded anywhere else (a hosted language model, email, a chat webhook). It applies an ordered regex rule set, an organization-specific sensitive-term denylist, and reports how much of the log was touched.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for this run)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `logscrub` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes an input file or stdin, redacting sensitive information.
    #[command(about = "Sanitizes an input file or stdin, redacting sensitive information.")]
    Sanitize(SanitizeCommand),

    /// Scans an input for sensitive data and reports per-rule counts without producing output.
    #[command(about = "Scans an input for sensitive data and reports per-rule counts without producing output.")]
    Scan(ScanCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to a custom redaction configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom redaction configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Path to a sensitive-terms JSON file.
    #[arg(long = "terms", value_name = "FILE", env = "LOGSCRUB_TERMS_FILE", help = "Path to a sensitive-terms JSON file.")]
    pub terms: Option<PathBuf>,

    /// Stop after the first N lines.
    #[arg(long = "max-lines", value_name = "N", help = "Process at most N lines of input.")]
    pub max_lines: Option<usize>,

    /// Keep ANSI escape sequences instead of stripping them before matching.
    #[arg(long = "keep-ansi", help = "Do not strip ANSI escape sequences before matching.")]
    pub keep_ansi: bool,

    /// Suppress the sanitization summary.
    #[arg(long = "no-summary", help = "Suppress the sanitization summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom redaction configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom redaction configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Path to a sensitive-terms JSON file.
    #[arg(long = "terms", value_name = "FILE", env = "LOGSCRUB_TERMS_FILE", help = "Path to a sensitive-terms JSON file.")]
    pub terms: Option<PathBuf>,

    /// Stop after the first N lines.
    #[arg(long = "max-lines", value_name = "N", help = "Scan at most N lines of input.")]
    pub max_lines: Option<usize>,

    /// Print the scan summary as JSON to stdout.
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Export the scan statistics to stdout as JSON.")]
    pub json_stdout: bool,

    /// Export the scan summary to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the scan statistics to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Exit with a non-zero code if the number of detections exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the total number of detections exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,
}
