/// Declaration parsing methods.
///
/// This chunk parses:
/// - The package clause
/// - Function and method declarations (signature in full, body skipped)
/// - `import`, `const`, `type` and `var` declarations (skipped, recorded by kind)
/// - Parameter, receiver and result lists, including Go's grouped-name syntax
impl Parser {
    // ========================================================================
    // Declarations
    // ========================================================================

    fn package_clause(&mut self) -> Result<Spanned<Ident>, CompileError> {
        self.expect_keyword(KeywordId::Package)?;
        let name = self.identifier_spanned()?;
        if name.node == "_" {
            return Err(CompileError::syntax("invalid package name _", name.span));
        }
        self.expect_semicolon("package clause")?;
        Ok(name)
    }

    fn declaration(&mut self) -> Result<Spanned<Decl>, CompileError> {
        let start = self.current_span().start;
        let kind = match self.peek().kind.clone() {
            TokenKind::Keyword(KeywordId::Func) => {
                let func = self.func_decl()?;
                let end = self.previous_span().end;
                self.expect_semicolon("function declaration")?;
                return Ok(Spanned::new(Decl::Func(func), Span::new(start, end)));
            }
            TokenKind::Keyword(KeywordId::Import) => GenKind::Import,
            TokenKind::Keyword(KeywordId::Const) => GenKind::Const,
            TokenKind::Keyword(KeywordId::Type) => GenKind::Type,
            TokenKind::Keyword(KeywordId::Var) => GenKind::Var,
            TokenKind::Keyword(KeywordId::Package) => {
                return Err(CompileError::syntax("unexpected package clause", self.current_span())
                    .with_note("a file has exactly one package clause, before all declarations"));
            }
            _ => {
                return Err(CompileError::syntax(
                    format!(
                        "non-declaration statement outside function body, found {}",
                        describe(&self.peek().kind)
                    ),
                    self.current_span(),
                ));
            }
        };
        self.advance();
        self.skip_gen_spec()?;
        let end = self.previous_span().end;
        self.expect_semicolon("declaration")?;
        Ok(Spanned::new(Decl::Gen(GenDecl { kind }), Span::new(start, end)))
    }

    /// Skip the body of a generic declaration: either a parenthesized group or a single spec
    /// running up to the next top-level semicolon.
    fn skip_gen_spec(&mut self) -> Result<(), CompileError> {
        if self.check_punct(PunctuationId::LParen) {
            self.skip_balanced(PunctuationId::LParen)?;
            return Ok(());
        }
        let start = self.pos;
        while !self.is_at_end() && !self.peek().kind.is_semicolon() {
            match self.peek().kind.clone() {
                TokenKind::Punctuation(PunctuationId::LParen) => {
                    self.skip_balanced(PunctuationId::LParen)?;
                }
                TokenKind::Punctuation(PunctuationId::LBracket) => {
                    self.skip_balanced(PunctuationId::LBracket)?;
                }
                TokenKind::Punctuation(PunctuationId::LBrace) => {
                    self.skip_balanced(PunctuationId::LBrace)?;
                }
                TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    return Err(self.unexpected("declaration"));
                }
                _ => {
                    self.advance();
                }
            }
        }
        if self.pos == start {
            return Err(self.unexpected("declaration"));
        }
        Ok(())
    }

    /// `func [recv] Name [TypeParams] (params) [results] [body]`
    fn func_decl(&mut self) -> Result<FuncDecl, CompileError> {
        self.expect_keyword(KeywordId::Func)?;

        let recv = if self.check_punct(PunctuationId::LParen) {
            Some(self.parameters()?)
        } else {
            None
        };

        let name = self.identifier_spanned()?;

        let type_params = if self.check_punct(PunctuationId::LBracket) {
            Some(self.skip_balanced(PunctuationId::LBracket)?)
        } else {
            None
        };

        if !self.check_punct(PunctuationId::LParen) {
            return Err(self.unexpected("'('"));
        }
        let params = self.parameters()?;
        let results = self.results()?;

        let body = if self.check_punct(PunctuationId::LBrace) {
            Some(self.skip_balanced(PunctuationId::LBrace)?)
        } else {
            None
        };

        Ok(FuncDecl {
            recv,
            name,
            type_params,
            params,
            results,
            body,
        })
    }

    /// Result list: parenthesized list, a single bare type, or nothing.
    fn results(&mut self) -> Result<Option<FieldList>, CompileError> {
        if self.check_punct(PunctuationId::LParen) {
            return Ok(Some(self.parameters()?));
        }
        if !self.at_type_start() {
            return Ok(None);
        }
        let ty = self.type_expr()?;
        let span = ty.span;
        Ok(Some(FieldList {
            fields: vec![Field { names: Vec::new(), ty }],
            span,
            parenthesized: false,
        }))
    }

    /// Parenthesized receiver/parameter/result list.
    fn parameters(&mut self) -> Result<FieldList, CompileError> {
        let open = self.expect_punct(PunctuationId::LParen)?;
        let mut items = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            items.push(self.param_item()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        if !self.check_punct(PunctuationId::RParen) {
            return Err(self.unexpected("',' or ')'"));
        }
        let close = self.advance().span;
        let fields = self.resolve_params(items)?;
        Ok(FieldList {
            fields,
            span: open.merge(close),
            parenthesized: true,
        })
    }

    fn param_item(&mut self) -> Result<ParamItem, CompileError> {
        let name = match self.peek().kind.clone() {
            TokenKind::Ident(name) => name,
            _ => return Ok(ParamItem::Type(self.param_type()?)),
        };
        let span = self.current_span();
        let next = self.peek_at(1).kind.clone();
        match next {
            TokenKind::Punctuation(PunctuationId::Comma | PunctuationId::RParen) => {
                self.advance();
                Ok(ParamItem::Bare(Spanned::new(name, span)))
            }
            // pkg.Type
            TokenKind::Punctuation(PunctuationId::Dot) => Ok(ParamItem::Type(self.type_expr()?)),
            // `name [N]T` / `name []T` versus the instantiated type `T[int]`
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                if self.bracket_ends_item(self.pos + 1) {
                    Ok(ParamItem::Type(self.type_expr()?))
                } else {
                    self.advance();
                    let ty = self.param_type()?;
                    Ok(ParamItem::Named {
                        name: Spanned::new(name, span),
                        ty,
                    })
                }
            }
            _ => {
                self.advance();
                let ty = self.param_type()?;
                Ok(ParamItem::Named {
                    name: Spanned::new(name, span),
                    ty,
                })
            }
        }
    }

    /// Return `true` if the `[` at token index `open` closes right before a `,` or `)`,
    /// i.e. the brackets are type arguments ending a parameter item.
    fn bracket_ends_item(&self, open: usize) -> bool {
        let mut depth = 0usize;
        let mut idx = open;
        while idx < self.tokens.len() {
            match &self.tokens[idx].kind {
                TokenKind::Punctuation(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => {
                    depth += 1
                }
                TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return matches!(
                            self.tokens.get(idx + 1).map(|t| &t.kind),
                            Some(TokenKind::Punctuation(PunctuationId::Comma | PunctuationId::RParen))
                        );
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            idx += 1;
        }
        false
    }

    /// Parameter type, allowing a leading `...`.
    fn param_type(&mut self) -> Result<Spanned<TypeExpr>, CompileError> {
        let start = self.current_span().start;
        if self.match_punct(PunctuationId::Ellipsis) {
            let inner = self.type_expr()?;
            let end = inner.span.end;
            return Ok(Spanned::new(
                TypeExpr::Variadic(Box::new(inner.node)),
                Span::new(start, end),
            ));
        }
        self.type_expr()
    }

    /// Turn the raw items of one list into fields.
    ///
    /// If any item carries a name, lone identifiers are names grouped with the next named
    /// item's type (`a, b int`). Otherwise every item is a type.
    fn resolve_params(&mut self, items: Vec<ParamItem>) -> Result<Vec<Field>, CompileError> {
        let any_named = items.iter().any(|i| matches!(i, ParamItem::Named { .. }));
        if !any_named {
            return Ok(items
                .into_iter()
                .map(|item| {
                    let ty = match item {
                        ParamItem::Bare(name) => Spanned::new(TypeExpr::Ident(name.node), name.span),
                        ParamItem::Type(ty) => ty,
                        ParamItem::Named { ty, .. } => ty,
                    };
                    Field { names: Vec::new(), ty }
                })
                .collect());
        }

        let mut fields = Vec::new();
        let mut pending: Vec<Spanned<Ident>> = Vec::new();
        for item in items {
            match item {
                ParamItem::Bare(name) => pending.push(name),
                ParamItem::Named { name, ty } => {
                    pending.push(name);
                    fields.push(Field {
                        names: std::mem::take(&mut pending),
                        ty,
                    });
                }
                ParamItem::Type(ty) => {
                    return Err(CompileError::syntax("mixed named and unnamed parameters", ty.span));
                }
            }
        }
        if let Some(last) = pending.last() {
            return Err(CompileError::syntax("mixed named and unnamed parameters", last.span)
                .with_hint(format!("give '{}' a type", last.node)));
        }
        Ok(fields)
    }
}
