/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Statement terminators (`expect_semicolon`, `skip_semicolons`)
/// - Bracket skipping and error recovery (`skip_balanced`, `synchronize`)
impl Parser {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Return the token `n` positions ahead, clamped to `Eof`.
    fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<Span, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("'{}'", id.as_str())))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<Span, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("'{}'", id.as_str())))
        }
    }

    /// Build an "expected X, found Y" error at the current token.
    fn unexpected(&self, expected: &str) -> CompileError {
        CompileError::syntax(
            format!("expected {}, found {}", expected, describe(&self.peek().kind)),
            self.current_span(),
        )
    }

    /// Consume a statement terminator. End of input also terminates.
    fn expect_semicolon(&mut self, after: &str) -> Result<(), CompileError> {
        if self.peek().kind.is_semicolon() {
            self.advance();
            Ok(())
        } else if self.is_at_end() || self.check_punct(PunctuationId::RParen) || self.check_punct(PunctuationId::RBrace)
        {
            Ok(())
        } else {
            Err(CompileError::syntax(
                format!("expected ';' after {}, found {}", after, describe(&self.peek().kind)),
                self.current_span(),
            ))
        }
    }

    fn skip_semicolons(&mut self) {
        while self.peek().kind.is_semicolon() {
            self.advance();
        }
    }

    /// Consume a bracketed group starting at the current `open` token, through its matching
    /// closer. All three bracket kinds are tracked so a stray closer is reported where it is.
    ///
    /// Returns the span from the opener to the closer inclusive.
    fn skip_balanced(&mut self, open: PunctuationId) -> Result<Span, CompileError> {
        let start = self.expect_punct(open)?;
        let mut stack = vec![open];
        while let Some(&top) = stack.last() {
            let tok = self.peek().clone();
            match &tok.kind {
                TokenKind::Eof => {
                    return Err(CompileError::syntax(
                        format!("expected '{}', found EOF", closer(top).as_str()),
                        tok.span,
                    ));
                }
                TokenKind::Punctuation(p @ (PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)) => {
                    stack.push(*p);
                }
                TokenKind::Punctuation(p @ (PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)) => {
                    if *p != closer(top) {
                        return Err(CompileError::syntax(
                            format!("expected '{}', found '{}'", closer(top).as_str(), p.as_str()),
                            tok.span,
                        ));
                    }
                    stack.pop();
                }
                _ => {}
            }
            self.advance();
        }
        Ok(start.merge(self.previous_span()))
    }

    /// Skip to the start of the next top-level declaration.
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        let mut at_statement_start = false;
        while !self.is_at_end() {
            let kind = &self.peek().kind;
            if depth == 0
                && at_statement_start
                && matches!(
                    kind,
                    TokenKind::Keyword(
                        KeywordId::Func | KeywordId::Import | KeywordId::Type | KeywordId::Var | KeywordId::Const
                    )
                )
            {
                return;
            }
            match kind {
                TokenKind::Punctuation(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => {
                    depth += 1
                }
                TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            at_statement_start = kind.is_semicolon();
            self.advance();
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.tokens[0].span
        } else {
            self.tokens[self.pos - 1].span
        }
    }
}

/// Matching closer for an opening bracket.
fn closer(open: PunctuationId) -> PunctuationId {
    match open {
        PunctuationId::LParen => PunctuationId::RParen,
        PunctuationId::LBracket => PunctuationId::RBracket,
        _ => PunctuationId::RBrace,
    }
}

/// Human-readable token description for error messages.
fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::AutoSemi => "newline".to_string(),
        TokenKind::Eof => "EOF".to_string(),
        TokenKind::Ident(name) => format!("identifier '{}'", name),
        TokenKind::Keyword(k) => format!("keyword '{}'", k.as_str()),
        other => format!("'{}'", other.text()),
    }
}
