/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint, plus the
/// intermediate [`ParamItem`] used while resolving Go's grouped parameter syntax.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module.

/// One comma-separated item of a parameter list, before grouping is resolved.
///
/// Go's `(a, b int)` and `(int, string)` are only distinguishable once the whole list has
/// been read: a lone identifier is a parameter name if any item in the list is named, and a
/// type otherwise.
#[derive(Debug)]
enum ParamItem {
    /// `name Type`
    Named { name: Spanned<Ident>, ty: Spanned<TypeExpr> },
    /// A lone identifier
    Bare(Spanned<Ident>),
    /// A type that cannot be a name (`*T`, `[]T`, `pkg.T`, ...)
    Type(Spanned<TypeExpr>),
}

/// Parser state.
///
/// ## Notes
/// - Comment tokens are dropped on construction; the parser never sees them.
/// - The parser recovers at top-level declaration boundaries so one pass reports every
///   broken declaration.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<CompileError>,
}

impl Parser {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `muster_syntax::lexer`.
    pub fn new(tokens: &[Token]) -> Self {
        let mut tokens: Vec<Token> = tokens.iter().filter(|t| !t.kind.is_comment()).cloned().collect();
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`SourceFile`].
    ///
    /// ## Errors
    /// Returns every [`CompileError`] found; the parser resynchronizes at the next
    /// top-level declaration after each error.
    pub fn parse(mut self) -> Result<SourceFile, Vec<CompileError>> {
        self.skip_semicolons();

        let package = if self.check_keyword(KeywordId::Package) {
            match self.package_clause() {
                Ok(name) => Some(name),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                    None
                }
            }
        } else {
            None
        };

        let mut decls = Vec::new();
        loop {
            self.skip_semicolons();
            if self.is_at_end() {
                break;
            }
            match self.declaration() {
                Ok(decl) => decls.push(decl),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(SourceFile { package, decls })
        } else {
            Err(self.errors)
        }
    }
}
