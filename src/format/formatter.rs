//! Core formatting logic for Go source
//!
//! Function headers are printed from the parsed declaration, which is where empty result lists and redundant result
//! parentheses disappear. Everything else is re-spaced token by token while keeping the input's line structure:
//! - one output line per source line, indented by the enclosing multi-line brackets
//! - gofmt spacing around operators, commas and braces
//! - comments kept in place, trailing comments separated by one space
//! - runs of blank lines collapsed, and dropped right after an opening or before a closing bracket

use std::collections::HashMap;

use crate::frontend::ast::{Decl, Field, FieldList, FuncDecl, SourceFile, Span, TypeExpr, TypeShape};
use crate::frontend::diagnostics::line_col;
use crate::frontend::lexer::{KeywordId, OperatorId, PunctuationId, Token, TokenKind, tokens_text};

use super::FormatError;
use super::config::FormatConfig;
use super::writer::FormatWriter;

/// Formatter that re-prints lexed and parsed Go source
pub struct Formatter<'a> {
    source: &'a str,
    tokens: &'a [Token],
    /// Top-level function declarations keyed by the offset of their `func` keyword
    signatures: HashMap<usize, (Span, &'a FuncDecl)>,
    writer: FormatWriter,
    line: Line,
    stack: Vec<Open>,
    pending_blanks: usize,
    after_open: bool,
    last_end: Option<usize>,
}

/// A bracket that is still open.
#[derive(Debug, Clone, Copy)]
struct Open {
    indented: bool,
    /// `import (`, `const (`, `type (` or `var (`
    decl_group: bool,
}

/// A bracket opened and not yet closed on the current line.
#[derive(Debug, Clone, Copy)]
struct Inline {
    punct: PunctuationId,
    /// Composite literal brace, printed without inner padding
    literal: bool,
    /// Parameter list of a function literal or type
    params: bool,
}

/// The output line under construction.
#[derive(Debug, Default)]
struct Line {
    text: String,
    first: Option<TokenKind>,
    prev: Option<TokenKind>,
    prev_binary: bool,
    /// Line heads a block (`if`, `for`, `switch`, `select`, `else`, function header)
    control: bool,
    /// Line declares names, so `*` after a name starts a pointer type
    decl: bool,
    inline: Vec<Inline>,
    comment: Option<String>,
}

impl<'a> Formatter<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token], ast: &'a SourceFile, config: FormatConfig) -> Self {
        let signatures = ast
            .decls
            .iter()
            .filter_map(|decl| match &decl.node {
                Decl::Func(func) => Some((decl.span.start, (decl.span, func))),
                Decl::Gen(_) => None,
            })
            .collect();
        Self {
            source,
            tokens,
            signatures,
            writer: FormatWriter::new(config),
            line: Line::default(),
            stack: Vec::new(),
            pending_blanks: 0,
            after_open: false,
            last_end: None,
        }
    }

    /// Format the whole token stream. The result always ends with a newline unless it is empty.
    pub fn format(mut self) -> Result<String, FormatError> {
        let mut i = 0;
        while i < self.tokens.len() {
            i = self.step(i)?;
        }
        self.end_line();
        Ok(self.writer.finish())
    }

    // ========================================================================
    // Token dispatch
    // ========================================================================

    fn step(&mut self, i: usize) -> Result<usize, FormatError> {
        let tokens = self.tokens;
        let tok = &tokens[i];
        match &tok.kind {
            TokenKind::Eof => return Ok(tokens.len()),
            // line breaks come from the source layout
            TokenKind::AutoSemi => return Ok(i + 1),
            _ => {}
        }
        self.note_gap(tok.span.start);

        if tok.kind.is_keyword(KeywordId::Func) && self.stack.is_empty() && self.line.is_empty() {
            if let Some(&(span, decl)) = self.signatures.get(&tok.span.start) {
                let next = self.signature(i, span, decl)?;
                self.last_end = Some(tokens[next - 1].span.end);
                return Ok(next);
            }
        }

        let consumed = match &tok.kind {
            TokenKind::LineComment(text) => {
                self.line.comment = Some(text.clone());
                1
            }
            TokenKind::Punctuation(p @ (PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)) => {
                self.open(i, *p)
            }
            TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                self.close(i)?;
                1
            }
            _ => {
                self.check_statement_start(tok)?;
                self.push(i);
                1
            }
        };
        self.last_end = Some(tokens[i + consumed - 1].span.end);
        Ok(i + consumed)
    }

    /// End the current line if the source breaks the line before `start`, remembering blank lines.
    fn note_gap(&mut self, start: usize) {
        let Some(last) = self.last_end else {
            return;
        };
        let newlines = self.source[last..start].matches('\n').count();
        if newlines > 0 {
            self.end_line();
        }
        if newlines > 1 {
            self.pending_blanks = self.pending_blanks.max(newlines - 1);
        }
    }

    fn push(&mut self, i: usize) {
        let next = self.next_code(i);
        if self.line.is_empty() && self.in_decl_group() {
            self.line.decl = true;
        }
        self.line.push(&self.tokens[i].kind, next, true);
    }

    fn open(&mut self, i: usize, punct: PunctuationId) -> usize {
        let tokens = self.tokens;
        let indented = self.breaks_after(i);
        let decl_group = punct == PunctuationId::LParen
            && matches!(
                self.line.prev,
                Some(TokenKind::Keyword(
                    KeywordId::Import | KeywordId::Const | KeywordId::Type | KeywordId::Var
                ))
            );
        let next = self.next_code(i);
        if self.line.is_empty() && self.in_decl_group() {
            self.line.decl = true;
        }
        self.line.push(&tokens[i].kind, next, !indented);
        self.stack.push(Open { indented, decl_group });
        if !indented {
            return 1;
        }

        // keep `{ // comment` together
        let mut consumed = 1;
        if let Some(tok) = tokens.get(i + 1) {
            if let TokenKind::LineComment(text) = &tok.kind {
                if !self.source[tokens[i].span.end..tok.span.start].contains('\n') {
                    self.line.comment = Some(text.clone());
                    consumed = 2;
                }
            }
        }
        self.end_line();
        self.writer.indent();
        self.after_open = true;
        consumed
    }

    fn close(&mut self, i: usize) -> Result<(), FormatError> {
        let tokens = self.tokens;
        let tok = &tokens[i];
        let Some(open) = self.stack.pop() else {
            let (line, column) = line_col(self.source, tok.span.start);
            return Err(FormatError::Syntax {
                line,
                column,
                message: format!("unexpected '{}'", tok.kind.text()),
            });
        };
        if open.indented {
            self.end_line();
            self.writer.dedent();
        }
        let next = self.next_code(i);
        self.line.push(&tok.kind, next, false);
        Ok(())
    }

    /// Print a top-level function header from its declaration and skip its tokens.
    fn signature(&mut self, i: usize, span: Span, decl: &FuncDecl) -> Result<usize, FormatError> {
        let tokens = self.tokens;
        let end = tokens[i..]
            .iter()
            .position(|t| match decl.body {
                Some(body) => t.span.start == body.start && t.kind.is_punctuation(PunctuationId::LBrace),
                None => t.span.start >= span.end,
            })
            .map_or(tokens.len(), |p| p + i);

        if let Some(comment) = tokens[i..end].iter().find(|t| t.kind.is_comment()) {
            let (line, column) = line_col(self.source, comment.span.start);
            return Err(FormatError::CommentInSignature { line, column });
        }

        let header = self.signature_text(decl);
        self.line.push_header(header);
        Ok(end)
    }

    fn signature_text(&self, decl: &FuncDecl) -> String {
        let mut out = String::from("func ");
        if let Some(recv) = &decl.recv {
            out.push_str(&format!("({}) ", fields_text(recv)));
        }
        out.push_str(&decl.name.node);
        if let Some(span) = decl.type_params {
            let inner: Vec<Token> = self
                .tokens
                .iter()
                .filter(|t| span.contains(t.span) && !matches!(t.kind, TokenKind::AutoSemi))
                .cloned()
                .collect();
            out.push_str(&tokens_text(&inner));
        }
        out.push_str(&format!("({})", fields_text(&decl.params)));
        if let Some(results) = &decl.results {
            out.push_str(&results_text(results));
        }
        out
    }

    /// A statement cannot start with a binary operator or separator; gofmt rejects such input.
    fn check_statement_start(&self, tok: &Token) -> Result<(), FormatError> {
        if !self.line.is_empty() || !self.stack.last().is_some_and(|o| o.indented) {
            return Ok(());
        }
        let invalid = match &tok.kind {
            TokenKind::Operator(op) => !matches!(
                op,
                OperatorId::Plus
                    | OperatorId::Minus
                    | OperatorId::Star
                    | OperatorId::Amp
                    | OperatorId::Caret
                    | OperatorId::Bang
                    | OperatorId::Arrow
                    | OperatorId::Tilde
            ),
            TokenKind::Punctuation(p) => matches!(
                p,
                PunctuationId::Comma | PunctuationId::Dot | PunctuationId::Colon | PunctuationId::Semicolon
            ),
            _ => false,
        };
        if invalid {
            let (line, column) = line_col(self.source, tok.span.start);
            return Err(FormatError::Syntax {
                line,
                column,
                message: format!("expected statement, found '{}'", tok.kind.text()),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn end_line(&mut self) {
        let Some((text, first)) = self.line.take() else {
            return;
        };
        let closer = matches!(
            first,
            Some(TokenKind::Punctuation(
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace
            ))
        );
        if self.pending_blanks > 0 && !self.after_open && !closer {
            self.writer.blank_lines(self.pending_blanks);
        }
        self.pending_blanks = 0;
        self.after_open = false;

        let label = matches!(first, Some(TokenKind::Keyword(KeywordId::Case | KeywordId::Default)));
        if label && self.writer.current_indent() > 0 {
            self.writer.writeln_outdented(&text);
        } else {
            self.writer.writeln(&text);
        }
    }

    fn in_decl_group(&self) -> bool {
        self.stack.last().is_some_and(|o| o.decl_group)
    }

    /// Return `true` if the source breaks the line right after the opener at `i` (comments aside).
    fn breaks_after(&self, i: usize) -> bool {
        let end = self.tokens[i].span.end;
        match self.tokens[i + 1..]
            .iter()
            .find(|t| !matches!(t.kind, TokenKind::AutoSemi) && !t.kind.is_comment())
        {
            Some(t) if !matches!(t.kind, TokenKind::Eof) => self.source[end..t.span.start].contains('\n'),
            _ => false,
        }
    }

    /// Next token that prints code.
    fn next_code(&self, i: usize) -> Option<&'a TokenKind> {
        let tokens = self.tokens;
        tokens[i + 1..]
            .iter()
            .map(|t| &t.kind)
            .find(|k| !matches!(k, TokenKind::AutoSemi | TokenKind::Eof) && !k.is_comment())
    }
}

fn fields_text(list: &FieldList) -> String {
    list.fields.iter().map(field_text).collect::<Vec<_>>().join(", ")
}

fn field_text(field: &Field) -> String {
    if field.names.is_empty() {
        return field.ty.node.to_string();
    }
    let names: Vec<&str> = field.names.iter().map(|n| n.node.as_str()).collect();
    format!("{} {}", names.join(", "), field.ty.node)
}

/// Results: dropped when empty, bare for a single unnamed non-function type, parenthesized otherwise.
fn results_text(list: &FieldList) -> String {
    match list.fields.as_slice() {
        [] => String::new(),
        [single]
            if single.names.is_empty()
                && !matches!(
                    single.ty.node,
                    TypeExpr::Unsupported {
                        shape: TypeShape::Func,
                        ..
                    }
                ) =>
        {
            format!(" {}", single.ty.node)
        }
        _ => format!(" ({})", fields_text(list)),
    }
}

// ============================================================================
// Spacing
// ============================================================================

fn operand_end(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Imaginary(_)
            | TokenKind::Rune(_)
            | TokenKind::String(_)
            | TokenKind::RawString(_)
            | TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)
    )
}

impl Line {
    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.comment.is_none()
    }

    fn take(&mut self) -> Option<(String, Option<TokenKind>)> {
        if self.is_empty() {
            return None;
        }
        let line = std::mem::take(self);
        let mut text = line.text;
        if let Some(comment) = line.comment {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&comment);
        }
        Some((text, line.first))
    }

    fn push_header(&mut self, header: String) {
        self.text = header;
        self.first = Some(TokenKind::Keyword(KeywordId::Func));
        self.prev = Some(TokenKind::Punctuation(PunctuationId::RParen));
        self.prev_binary = false;
        self.control = true;
    }

    /// Append one token. `inline` tells whether an opening bracket closes on this line.
    fn push(&mut self, kind: &TokenKind, next: Option<&TokenKind>, inline: bool) {
        let binary = match kind {
            TokenKind::Operator(op) => self.is_binary(*op),
            _ => false,
        };
        if self.space_before(kind, next, binary) {
            self.text.push(' ');
        }
        self.text.push_str(kind.text());

        match kind {
            TokenKind::Keyword(KeywordId::If | KeywordId::For | KeywordId::Switch | KeywordId::Select | KeywordId::Else) => {
                self.control = true;
            }
            TokenKind::Keyword(KeywordId::Var | KeywordId::Const | KeywordId::Type) if self.first.is_none() => {
                self.decl = true;
            }
            TokenKind::Punctuation(p @ (PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace))
                if inline =>
            {
                let literal = *p == PunctuationId::LBrace && self.brace_is_literal(next);
                let params = *p == PunctuationId::LParen && matches!(self.prev, Some(TokenKind::Keyword(KeywordId::Func)));
                self.inline.push(Inline {
                    punct: *p,
                    literal,
                    params,
                });
            }
            TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                self.inline.pop();
            }
            _ => {}
        }

        if self.first.is_none() {
            self.first = Some(kind.clone());
        }
        self.prev_binary = binary
            || (kind.is_operator(OperatorId::Arrow) && matches!(self.prev, Some(TokenKind::Keyword(KeywordId::Chan))));
        self.prev = Some(kind.clone());
    }

    fn is_binary(&self, op: OperatorId) -> bool {
        if matches!(op, OperatorId::Bang | OperatorId::Tilde | OperatorId::Inc | OperatorId::Dec) {
            return false;
        }
        let Some(prev) = &self.prev else {
            return false;
        };
        if !operand_end(prev) {
            return false;
        }
        if op == OperatorId::Star {
            // `[]*T`, `var p *T`, `func(t *T)`
            let type_star = prev.is_punctuation(PunctuationId::RBracket)
                || (matches!(prev, TokenKind::Ident(_))
                    && (self.decl || self.inline.last().is_some_and(|o| o.params)));
            return !type_star;
        }
        true
    }

    /// A `{` after a name or a type is a composite literal unless the line heads a block. `prev` still holds the
    /// token before the brace.
    fn brace_is_literal(&self, next: Option<&TokenKind>) -> bool {
        match &self.prev {
            Some(TokenKind::Keyword(KeywordId::Struct | KeywordId::Interface)) => {
                next.is_some_and(|n| n.is_punctuation(PunctuationId::RBrace))
            }
            Some(TokenKind::Ident(_)) | Some(TokenKind::Punctuation(PunctuationId::RBracket | PunctuationId::RBrace)) => {
                !self.block_context()
            }
            _ => false,
        }
    }

    fn block_context(&self) -> bool {
        self.control
            && !self
                .inline
                .iter()
                .any(|o| matches!(o.punct, PunctuationId::LParen | PunctuationId::LBracket))
    }

    fn inline_literal(&self) -> bool {
        self.inline
            .last()
            .is_some_and(|o| o.punct == PunctuationId::LBrace && o.literal)
    }

    fn in_brackets(&self) -> bool {
        self.inline.last().is_some_and(|o| o.punct == PunctuationId::LBracket)
    }

    fn space_before(&self, kind: &TokenKind, next: Option<&TokenKind>, binary: bool) -> bool {
        use PunctuationId as P;
        use TokenKind as K;

        let Some(prev) = &self.prev else {
            return false;
        };

        match kind {
            K::Punctuation(P::Comma | P::Semicolon | P::RParen | P::RBracket | P::Dot | P::Colon) => return false,
            K::Punctuation(P::Ellipsis) if operand_end(prev) => return false,
            K::Operator(OperatorId::Inc | OperatorId::Dec) => return false,
            K::Operator(OperatorId::Arrow) if prev.is_keyword(KeywordId::Chan) => return false,
            K::Keyword(KeywordId::Chan) if prev.is_operator(OperatorId::Arrow) => return false,
            _ => {}
        }

        match prev {
            K::Punctuation(P::LParen | P::LBracket | P::Dot | P::Ellipsis) => return false,
            K::Punctuation(P::LBrace) => {
                return !kind.is_punctuation(P::RBrace) && !self.inline_literal();
            }
            K::Punctuation(P::Comma | P::Semicolon) => return true,
            K::Punctuation(P::Colon) => return !self.in_brackets(),
            K::Operator(OperatorId::Inc | OperatorId::Dec) => return true,
            K::Operator(_) => return self.prev_binary,
            _ => {}
        }

        match kind {
            K::Punctuation(P::LBrace) => match prev {
                K::Keyword(KeywordId::Struct | KeywordId::Interface) => {
                    !next.is_some_and(|n| n.is_punctuation(P::RBrace))
                }
                K::Ident(_) | K::Punctuation(P::RBracket | P::RBrace) => self.block_context(),
                _ => true,
            },
            K::Punctuation(P::RBrace) => !self.inline_literal(),
            K::Punctuation(P::LParen) => matches!(prev, K::Keyword(k) if *k != KeywordId::Func),
            K::Punctuation(P::LBracket) => matches!(prev, K::Keyword(k) if *k != KeywordId::Map),
            K::Operator(_) => binary || !operand_end(prev) || matches!(prev, K::Ident(_)),
            _ => !prev.is_punctuation(P::RBracket),
        }
    }
}
