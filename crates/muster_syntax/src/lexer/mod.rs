//! Lexer for Go source files.
//!
//! Handles tokenization including:
//! - Keywords and identifiers (Unicode letters allowed)
//! - Numeric, rune, interpreted string and raw string literals
//! - Operators and punctuation
//! - Line and block comments (kept as tokens)
//! - Automatic semicolon insertion at line ends
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, vocabulary IDs)
//!
//! Raw scanning is done by a `logos`-derived DFA; the [`Lexer`] wrapper turns raw tokens into [`Token`]s and applies
//! the semicolon rules.

pub mod tokens;

pub use tokens::{KeywordId, OperatorId, PunctuationId, Symbol, Token, TokenKind, keyword_id, symbol, tokens_text};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use logos::Logos;

// ============================================================================
// RAW TOKENS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    #[error("comment not terminated")]
    UnterminatedComment,
    #[error("string literal not terminated")]
    UnterminatedString,
    #[error("raw string literal not terminated")]
    UnterminatedRawString,
    #[error("rune literal not terminated")]
    UnterminatedRune,
    #[error("empty rune literal or unescaped ' in rune literal")]
    EmptyRune,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
enum RawTok {
    #[token("\u{feff}")]
    Bom,

    // Kept to drive semicolon insertion.
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Keywords are split off in the adapter.
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")]
    Word,

    // Int, float and imaginary literals share one raw kind; the adapter classifies by spelling.
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+")]
    #[regex(r"([0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?|0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+)i")]
    Number,

    #[token("'", rune_literal)]
    Rune,

    #[token("\"", interpreted_string)]
    String,

    #[token("`", raw_string)]
    RawString,

    #[token("...")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    #[token(",")]
    #[token(";")]
    #[token(":")]
    #[token(".")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("&^")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    #[token("&&")]
    #[token("||")]
    #[token("<-")]
    #[token("++")]
    #[token("--")]
    #[token("==")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    #[token("!")]
    #[token("~")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token(":=")]
    Symbol,
}

fn block_comment(lex: &mut logos::Lexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

fn raw_string(lex: &mut logos::Lexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    match lex.remainder().find('`') {
        Some(end) => {
            lex.bump(end + 1);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedRawString)
        }
    }
}

fn interpreted_string(lex: &mut logos::Lexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, '"', LexErrorKind::UnterminatedString)
}

fn rune_literal(lex: &mut logos::Lexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    if lex.remainder().starts_with('\'') {
        lex.bump(1);
        return Err(LexErrorKind::EmptyRune);
    }
    scan_quoted(lex, '\'', LexErrorKind::UnterminatedRune)
}

/// Consume up to and including the closing `quote`, honoring backslash escapes. Stops at a newline.
fn scan_quoted(lex: &mut logos::Lexer<'_, RawTok>, quote: char, unterminated: LexErrorKind) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if c == '\n' {
            lex.bump(i);
            return Err(unterminated);
        }
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            lex.bump(i + c.len_utf8());
            return Ok(());
        }
    }
    lex.bump(rest.len());
    Err(unterminated)
}

fn number_kind(text: &str) -> TokenKind {
    let is_hex = text.starts_with("0x") || text.starts_with("0X");
    if text.ends_with('i') {
        TokenKind::Imaginary(text.to_string())
    } else if text.contains('.')
        || (is_hex && (text.contains('p') || text.contains('P')))
        || (!is_hex && (text.contains('e') || text.contains('E')))
    {
        TokenKind::Float(text.to_string())
    } else {
        TokenKind::Int(text.to_string())
    }
}

// ============================================================================
// LEXER
// ============================================================================

/// Lexer for Go source code.
///
/// Wraps the raw `logos` scanner and applies Go's semicolon rule: a newline (or a comment spanning one, or end of
/// input) after an identifier, literal, `break`/`continue`/`fallthrough`/`return`, `++`/`--` or a closing bracket
/// becomes an [`TokenKind::AutoSemi`].
pub struct Lexer<'a> {
    source: &'a str,
    insert_semi: bool,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            insert_semi: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token. All lexical errors are collected before returning.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        let mut raw = RawTok::lexer(self.source);
        while let Some(result) = raw.next() {
            let range = raw.span();
            let span = Span::new(range.start, range.end);
            let slice = raw.slice();
            match result {
                Ok(tok) => self.push_raw(tok, slice, span),
                Err(kind) => {
                    self.insert_semi = false;
                    let message = match kind {
                        LexErrorKind::InvalidCharacter => {
                            let ch = slice.chars().next().unwrap_or('\0');
                            format!("invalid character {:?} (U+{:04X})", ch, ch as u32)
                        }
                        other => other.to_string(),
                    };
                    self.errors.push(CompileError::lex(message, span));
                }
            }
        }

        let end = self.source.len();
        if self.insert_semi {
            self.push(TokenKind::AutoSemi, Span::new(end, end));
        }
        self.push(TokenKind::Eof, Span::new(end, end));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }

    /// Emit the pending semicolon at `at`, if any.
    fn flush_semi(&mut self, at: usize) {
        if self.insert_semi {
            self.insert_semi = false;
            self.push(TokenKind::AutoSemi, Span::new(at, at));
        }
    }

    fn push_raw(&mut self, raw: RawTok, slice: &str, span: Span) {
        let kind = match raw {
            RawTok::Bom => {
                if span.start != 0 {
                    self.errors
                        .push(CompileError::lex("invalid BOM in the middle of the file", span));
                }
                return;
            }
            RawTok::Newline => {
                self.flush_semi(span.start);
                return;
            }
            RawTok::LineComment => {
                self.flush_semi(span.start);
                self.push(TokenKind::LineComment(slice.trim_end_matches('\r').to_string()), span);
                return;
            }
            RawTok::BlockComment => {
                if slice.contains('\n') {
                    self.flush_semi(span.start);
                }
                self.push(TokenKind::BlockComment(slice.to_string()), span);
                return;
            }
            RawTok::Word => match keyword_id(slice) {
                Some(id) => TokenKind::Keyword(id),
                None => TokenKind::Ident(slice.to_string()),
            },
            RawTok::Number => number_kind(slice),
            RawTok::Rune => TokenKind::Rune(slice.to_string()),
            RawTok::String => TokenKind::String(slice.to_string()),
            RawTok::RawString => TokenKind::RawString(slice.to_string()),
            RawTok::Symbol => match symbol(slice) {
                Some(Symbol::Operator(id)) => TokenKind::Operator(id),
                Some(Symbol::Punctuation(id)) => TokenKind::Punctuation(id),
                None => {
                    self.errors.push(CompileError::lex(format!("unknown symbol '{}'", slice), span));
                    return;
                }
            },
        };
        self.insert_semi = kind.ends_statement();
        self.push(kind, span);
    }
}

/// Convenience function to tokenize source code.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}
