//! Go source formatter
//!
//! Normalizes generated wrappers the way gofmt would for the constructs muster emits:
//! - tab indentation and canonical operator spacing
//! - empty `()` result lists dropped, single unnamed results unparenthesized
//! - blank-line runs collapsed
//!
//! A source with a package clause is formatted as a file and ends with a newline. A bare list of declarations
//! keeps the leading and trailing whitespace of its input.

mod config;
mod formatter;
mod writer;

pub use config::{FormatConfig, IndentStyle};
pub use formatter::Formatter;

use crate::frontend::diagnostics::{CompileError, line_col};
use crate::frontend::{lexer, parser};

/// Errors that stop formatting. Callers fall back to the unformatted text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("{line}:{column}: {message}")]
    Syntax { line: usize, column: usize, message: String },

    #[error("{line}:{column}: comment inside a function signature")]
    CommentInSignature { line: usize, column: usize },
}

impl FormatError {
    fn from_errors(source: &str, errors: &[CompileError]) -> Self {
        match errors.first() {
            Some(err) => {
                let (line, column) = line_col(source, err.span.start);
                FormatError::Syntax {
                    line,
                    column,
                    message: err.message.clone(),
                }
            }
            None => FormatError::Syntax {
                line: 1,
                column: 1,
                message: "invalid source".to_string(),
            },
        }
    }
}

/// Format Go source with default settings
pub fn format_source(source: &str) -> Result<String, FormatError> {
    format_source_with_config(source, FormatConfig::default())
}

/// Format Go source with custom configuration
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn format_source_with_config(source: &str, config: FormatConfig) -> Result<String, FormatError> {
    let tokens = lexer::lex(source).map_err(|e| FormatError::from_errors(source, &e))?;
    let ast = parser::parse(&tokens).map_err(|e| FormatError::from_errors(source, &e))?;

    let formatted = Formatter::new(source, &tokens, &ast, config).format()?;
    if ast.package.is_some() {
        return Ok(formatted);
    }

    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];
    let body = formatted.trim_end_matches('\n');
    if body.is_empty() {
        return Ok(source.to_string());
    }
    Ok(format!("{leading}{body}{trailing}"))
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str) -> Result<bool, FormatError> {
    Ok(format_source(source)? == source)
}
