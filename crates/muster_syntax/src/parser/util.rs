/// Miscellaneous parser utilities.
///
/// Identifier parsing shared by declarations and types.
impl Parser {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        Ok(self.identifier_spanned()?.node)
    }

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let span = self.current_span();
                let name = name.clone();
                self.advance();
                Ok(Spanned::new(name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }
}
