/// Type-expression parsing methods.
///
/// This chunk recognizes the full Go type grammar:
/// - Names and pointers (`T`, `*T`), kept structurally
/// - Qualified names and instantiations (`pkg.T`, `List[int]`)
/// - Array, slice, map, channel and function types
/// - Struct and interface literals (skipped by brace matching)
///
/// ## Notes
/// - Only names, pointers and variadics have a structural [`TypeExpr`]; every other shape is
///   returned as [`TypeExpr::Unsupported`] with its compact source text.
impl Parser {
    // ========================================================================
    // Types
    // ========================================================================

    /// Return `true` if the current token can begin a type.
    fn at_type_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_)
                | TokenKind::Operator(OperatorId::Star | OperatorId::Arrow)
                | TokenKind::Punctuation(PunctuationId::LBracket | PunctuationId::LParen)
                | TokenKind::Keyword(
                    KeywordId::Map | KeywordId::Chan | KeywordId::Func | KeywordId::Struct | KeywordId::Interface
                )
        )
    }

    fn type_expr(&mut self) -> Result<Spanned<TypeExpr>, CompileError> {
        let start_idx = self.pos;
        let start = self.current_span().start;

        let shape = match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                if self.match_punct(PunctuationId::Dot) {
                    self.identifier()?;
                    if self.check_punct(PunctuationId::LBracket) {
                        self.skip_balanced(PunctuationId::LBracket)?;
                    }
                    TypeShape::Qualified
                } else if self.check_punct(PunctuationId::LBracket) {
                    self.skip_balanced(PunctuationId::LBracket)?;
                    TypeShape::Generic
                } else {
                    return Ok(Spanned::new(TypeExpr::Ident(name), Span::new(start, self.previous_span().end)));
                }
            }
            TokenKind::Operator(OperatorId::Star) => {
                self.advance();
                let inner = self.type_expr()?;
                let end = inner.span.end;
                return Ok(Spanned::new(
                    TypeExpr::Pointer(Box::new(inner.node)),
                    Span::new(start, end),
                ));
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                self.type_expr()?;
                self.expect_punct(PunctuationId::RParen)?;
                TypeShape::Paren
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                let is_slice = self.peek_at(1).kind.is_punctuation(PunctuationId::RBracket);
                self.skip_balanced(PunctuationId::LBracket)?;
                self.type_expr()?;
                if is_slice { TypeShape::Slice } else { TypeShape::Array }
            }
            TokenKind::Keyword(KeywordId::Map) => {
                self.advance();
                self.expect_punct(PunctuationId::LBracket)?;
                self.type_expr()?;
                self.expect_punct(PunctuationId::RBracket)?;
                self.type_expr()?;
                TypeShape::Map
            }
            TokenKind::Keyword(KeywordId::Chan) => {
                self.advance();
                self.match_op(OperatorId::Arrow);
                self.type_expr()?;
                TypeShape::Chan
            }
            TokenKind::Operator(OperatorId::Arrow) => {
                self.advance();
                self.expect_keyword(KeywordId::Chan)?;
                self.type_expr()?;
                TypeShape::Chan
            }
            TokenKind::Keyword(KeywordId::Func) => {
                self.advance();
                self.parameters()?;
                self.results()?;
                TypeShape::Func
            }
            TokenKind::Keyword(KeywordId::Struct) => {
                self.advance();
                self.skip_balanced(PunctuationId::LBrace)?;
                TypeShape::Struct
            }
            TokenKind::Keyword(KeywordId::Interface) => {
                self.advance();
                self.skip_balanced(PunctuationId::LBrace)?;
                TypeShape::Interface
            }
            _ => return Err(self.unexpected("type")),
        };

        let end = self.previous_span().end;
        let text = tokens_text(&self.tokens[start_idx..self.pos]);
        Ok(Spanned::new(TypeExpr::Unsupported { shape, text }, Span::new(start, end)))
    }
}
