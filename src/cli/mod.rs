//! CLI module for the balsa parser
//!
//! This module provides the command-line interface over `balsa_syntax`.
//!
//! ## Commands
//!
//! - `parse <file>` - Parse a file (or a fragment) and print its syntax tree
//! - `lex <file>` - Print the token stream
//! - `reference` - Print the keyword, operator and punctuation tables as Markdown
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use balsa_syntax::config::DEFAULT_MAX_NESTING_DEPTH;
use balsa_syntax::{EntryContext, ParserConfig};

use crate::BALSA_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// The input could not be read or the command line was unusable.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The input was parsed but produced error diagnostics.
    pub const SYNTAX_ERRORS: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Error-tolerant parser for the balsa language
#[derive(Parser, Debug)]
#[command(name = "balsa")]
#[command(version = BALSA_VERSION)]
#[command(about = "Error-tolerant parser for the balsa language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log parser activity (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and print its concrete syntax tree
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Grammar rule to start from
        #[arg(long, value_enum, default_value_t = EntryArg::Unit)]
        entry: EntryArg,
        /// Output format for the tree
        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
        /// Do not render diagnostics (the exit code still reports them)
        #[arg(short, long)]
        quiet: bool,
        /// Deepest rule nesting before recovery stops descending
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
        max_depth: usize,
    },

    /// Tokenize a file and print the tokens
    Lex {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the language vocabulary reference (Markdown)
    Reference,
}

/// Grammar entry point selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryArg {
    /// A whole file
    Unit,
    /// One top-level declaration
    TopLevel,
    /// One statement
    Statement,
    /// One expression
    Expression,
}

impl From<EntryArg> for EntryContext {
    fn from(entry: EntryArg) -> Self {
        match entry {
            EntryArg::Unit => EntryContext::CompilationUnit,
            EntryArg::TopLevel => EntryContext::TopLevelNode,
            EntryArg::Statement => EntryContext::Statement,
            EntryArg::Expression => EntryContext::Expression,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented outline, one node per line
    Tree,
    /// JSON document with the tree and its diagnostics
    Json,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Initialize structured logging with an env-based filter.
///
/// Defaults to `warn`, or `info` with `--verbose`; `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .try_init();
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Parse {
            file,
            entry,
            format,
            quiet,
            max_depth,
        } => {
            let options = commands::ParseOptions {
                entry: entry.into(),
                format,
                quiet,
                config: ParserConfig::new().with_max_nesting_depth(max_depth),
            };
            commands::parse_file(&file.to_string_lossy(), &options)
        }
        Command::Lex { file } => commands::lex_file(&file.to_string_lossy()),
        Command::Reference => commands::print_reference(),
    }
}

// ============================================================================
// Tests
// ============================================================================
