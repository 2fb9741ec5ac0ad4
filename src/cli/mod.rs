//! CLI module for muster
//!
//! `muster --func=Name[,Name...] [--output=file] [--tags=a,b] [directory | files...]`
//!
//! With no path the package in the current directory is used. Go-style single-dash flags (`-func=Name`) are
//! accepted so existing `//go:generate muster -func=Name` lines keep working.
//!
//! ## Modules
//!
//! - `commands` - Command implementations
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

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
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

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Long flags that may also be spelled with a single dash, the way Go's flag package accepts them.
const GO_STYLE_FLAGS: &[&str] = &["func", "output", "tags", "lex", "parse", "help", "version"];

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate Must wrappers for error-returning Go functions
#[derive(Parser, Debug)]
#[command(name = "muster")]
#[command(version = VERSION)]
#[command(about = "Generate Must wrappers that panic instead of returning an error", long_about = None)]
pub struct Cli {
    /// Comma-separated list of function names; use Type.Method to pick a method
    #[arg(
        long = "func",
        value_name = "NAMES",
        value_delimiter = ',',
        required_unless_present_any = ["lex_file", "parse_file"]
    )]
    pub funcs: Vec<String>,

    /// Output file name; default <dir>/<func>_must.go
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Comma-separated list of build tags to apply
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// A package directory or a list of .go files of one package (default: current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["funcs", "parse_file"])]
    pub lex_file: Option<PathBuf>,

    /// Parse only and list declarations (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "funcs")]
    pub parse_file: Option<PathBuf>,
}

/// Rewrite Go-style `-flag` spellings to `--flag`. The program name and positional arguments are untouched.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || arg.starts_with("--") || !arg.starts_with('-') {
                return arg;
            }
            let name = arg[1..].split('=').next().unwrap_or_default();
            if GO_STYLE_FLAGS.contains(&name) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let args: Vec<String> = env::args().collect();
    let invocation = args.iter().skip(1).cloned().collect::<Vec<_>>().join(" ");
    let cli = Cli::parse_from(normalize_args(args));

    match execute(cli, &invocation) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("muster: {}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
///
/// `invocation` is the argument list as typed, recorded in the generated file's header.
pub fn execute(cli: Cli, invocation: &str) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }

    let names: Vec<String> = cli
        .funcs
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Err(CliError::failure("--func must name at least one function"));
    }

    commands::generate(&commands::GenerateOptions {
        names,
        output: cli.output,
        tags: cli.tags,
        paths: cli.paths,
        invocation: invocation.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
