//! Diagnostics for lexing and parsing Go sources.
//!
//! [`CompileError`] carries a byte span into the source it was produced from. Rendering with a source snippet goes
//! through miette's graphical handler (see [`format_error`]).

use crate::ast::Span;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, Report};
use std::fmt;

/// A syntax-level error with location information
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Lex,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Syntax,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lex error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            ErrorKind::Lex => "muster::lex",
            ErrorKind::Syntax => "muster::syntax",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.notes.is_empty() && self.hints.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .notes
            .iter()
            .map(|n| format!("note: {}", n))
            .chain(self.hints.iter().map(|h| format!("hint: {}", h)))
            .collect();
        Some(Box::new(lines.join("\n")))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let len = self.span.end.saturating_sub(self.span.start);
        let label = LabeledSpan::new(Some(self.kind.to_string()), self.span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Render an error against its source file as a plain-text (uncolored) report.
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let report = Report::new(error.clone()).with_source_code(NamedSource::new(file_name, source.to_string()));
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, &*report).is_err() {
        // Fall back to a one-line location when rendering fails.
        let (line, col) = line_col(source, error.span.start);
        return format!("{}:{}:{}: {}", file_name, line, col, error.message);
    }
    out
}

/// 1-based line and column for a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    (line, offset - line_start + 1)
}
