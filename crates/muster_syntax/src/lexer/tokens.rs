//! Token types for the Go lexer.
//!
//! Vocabulary tokens carry small IDs instead of strings:
//! - `Keyword(KeywordId)` for the 25 reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters
//!
//! Literal tokens keep their exact source spelling so the formatter can print them back unchanged.

use crate::ast::Span;

// ============================================================================
// VOCABULARY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl KeywordId {
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordId::Break => "break",
            KeywordId::Case => "case",
            KeywordId::Chan => "chan",
            KeywordId::Const => "const",
            KeywordId::Continue => "continue",
            KeywordId::Default => "default",
            KeywordId::Defer => "defer",
            KeywordId::Else => "else",
            KeywordId::Fallthrough => "fallthrough",
            KeywordId::For => "for",
            KeywordId::Func => "func",
            KeywordId::Go => "go",
            KeywordId::Goto => "goto",
            KeywordId::If => "if",
            KeywordId::Import => "import",
            KeywordId::Interface => "interface",
            KeywordId::Map => "map",
            KeywordId::Package => "package",
            KeywordId::Range => "range",
            KeywordId::Return => "return",
            KeywordId::Select => "select",
            KeywordId::Struct => "struct",
            KeywordId::Switch => "switch",
            KeywordId::Type => "type",
            KeywordId::Var => "var",
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    let id = match name {
        "break" => KeywordId::Break,
        "case" => KeywordId::Case,
        "chan" => KeywordId::Chan,
        "const" => KeywordId::Const,
        "continue" => KeywordId::Continue,
        "default" => KeywordId::Default,
        "defer" => KeywordId::Defer,
        "else" => KeywordId::Else,
        "fallthrough" => KeywordId::Fallthrough,
        "for" => KeywordId::For,
        "func" => KeywordId::Func,
        "go" => KeywordId::Go,
        "goto" => KeywordId::Goto,
        "if" => KeywordId::If,
        "import" => KeywordId::Import,
        "interface" => KeywordId::Interface,
        "map" => KeywordId::Map,
        "package" => KeywordId::Package,
        "range" => KeywordId::Range,
        "return" => KeywordId::Return,
        "select" => KeywordId::Select,
        "struct" => KeywordId::Struct,
        "switch" => KeywordId::Switch,
        "type" => KeywordId::Type,
        "var" => KeywordId::Var,
        _ => return None,
    };
    Some(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    AndNot,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    AndNotEq,
    AndAnd,
    OrOr,
    Arrow,
    Inc,
    Dec,
    EqEq,
    Lt,
    Gt,
    Eq,
    Bang,
    Tilde,
    NotEq,
    LtEq,
    GtEq,
    Define,
}

impl OperatorId {
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorId::Plus => "+",
            OperatorId::Minus => "-",
            OperatorId::Star => "*",
            OperatorId::Slash => "/",
            OperatorId::Percent => "%",
            OperatorId::Amp => "&",
            OperatorId::Pipe => "|",
            OperatorId::Caret => "^",
            OperatorId::Shl => "<<",
            OperatorId::Shr => ">>",
            OperatorId::AndNot => "&^",
            OperatorId::PlusEq => "+=",
            OperatorId::MinusEq => "-=",
            OperatorId::StarEq => "*=",
            OperatorId::SlashEq => "/=",
            OperatorId::PercentEq => "%=",
            OperatorId::AmpEq => "&=",
            OperatorId::PipeEq => "|=",
            OperatorId::CaretEq => "^=",
            OperatorId::ShlEq => "<<=",
            OperatorId::ShrEq => ">>=",
            OperatorId::AndNotEq => "&^=",
            OperatorId::AndAnd => "&&",
            OperatorId::OrOr => "||",
            OperatorId::Arrow => "<-",
            OperatorId::Inc => "++",
            OperatorId::Dec => "--",
            OperatorId::EqEq => "==",
            OperatorId::Lt => "<",
            OperatorId::Gt => ">",
            OperatorId::Eq => "=",
            OperatorId::Bang => "!",
            OperatorId::Tilde => "~",
            OperatorId::NotEq => "!=",
            OperatorId::LtEq => "<=",
            OperatorId::GtEq => ">=",
            OperatorId::Define => ":=",
        }
    }

    /// Binary operators that gofmt surrounds with spaces.
    pub fn is_binary_spaced(self) -> bool {
        !matches!(
            self,
            OperatorId::Inc | OperatorId::Dec | OperatorId::Bang | OperatorId::Tilde | OperatorId::Arrow
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
}

impl PunctuationId {
    pub fn as_str(self) -> &'static str {
        match self {
            PunctuationId::LParen => "(",
            PunctuationId::RParen => ")",
            PunctuationId::LBracket => "[",
            PunctuationId::RBracket => "]",
            PunctuationId::LBrace => "{",
            PunctuationId::RBrace => "}",
            PunctuationId::Comma => ",",
            PunctuationId::Semicolon => ";",
            PunctuationId::Colon => ":",
            PunctuationId::Dot => ".",
            PunctuationId::Ellipsis => "...",
        }
    }
}

/// Operator or punctuation, as classified from a symbol spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Operator(OperatorId),
    Punctuation(PunctuationId),
}

/// Classify an operator/punctuation spelling.
pub fn symbol(text: &str) -> Option<Symbol> {
    use OperatorId as O;
    use PunctuationId as P;
    let sym = match text {
        "(" => Symbol::Punctuation(P::LParen),
        ")" => Symbol::Punctuation(P::RParen),
        "[" => Symbol::Punctuation(P::LBracket),
        "]" => Symbol::Punctuation(P::RBracket),
        "{" => Symbol::Punctuation(P::LBrace),
        "}" => Symbol::Punctuation(P::RBrace),
        "," => Symbol::Punctuation(P::Comma),
        ";" => Symbol::Punctuation(P::Semicolon),
        ":" => Symbol::Punctuation(P::Colon),
        "." => Symbol::Punctuation(P::Dot),
        "..." => Symbol::Punctuation(P::Ellipsis),
        "+" => Symbol::Operator(O::Plus),
        "-" => Symbol::Operator(O::Minus),
        "*" => Symbol::Operator(O::Star),
        "/" => Symbol::Operator(O::Slash),
        "%" => Symbol::Operator(O::Percent),
        "&" => Symbol::Operator(O::Amp),
        "|" => Symbol::Operator(O::Pipe),
        "^" => Symbol::Operator(O::Caret),
        "<<" => Symbol::Operator(O::Shl),
        ">>" => Symbol::Operator(O::Shr),
        "&^" => Symbol::Operator(O::AndNot),
        "+=" => Symbol::Operator(O::PlusEq),
        "-=" => Symbol::Operator(O::MinusEq),
        "*=" => Symbol::Operator(O::StarEq),
        "/=" => Symbol::Operator(O::SlashEq),
        "%=" => Symbol::Operator(O::PercentEq),
        "&=" => Symbol::Operator(O::AmpEq),
        "|=" => Symbol::Operator(O::PipeEq),
        "^=" => Symbol::Operator(O::CaretEq),
        "<<=" => Symbol::Operator(O::ShlEq),
        ">>=" => Symbol::Operator(O::ShrEq),
        "&^=" => Symbol::Operator(O::AndNotEq),
        "&&" => Symbol::Operator(O::AndAnd),
        "||" => Symbol::Operator(O::OrOr),
        "<-" => Symbol::Operator(O::Arrow),
        "++" => Symbol::Operator(O::Inc),
        "--" => Symbol::Operator(O::Dec),
        "==" => Symbol::Operator(O::EqEq),
        "<" => Symbol::Operator(O::Lt),
        ">" => Symbol::Operator(O::Gt),
        "=" => Symbol::Operator(O::Eq),
        "!" => Symbol::Operator(O::Bang),
        "~" => Symbol::Operator(O::Tilde),
        "!=" => Symbol::Operator(O::NotEq),
        "<=" => Symbol::Operator(O::LtEq),
        ">=" => Symbol::Operator(O::GtEq),
        ":=" => Symbol::Operator(O::Define),
        _ => return None,
    };
    Some(sym)
}

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
///
/// ## Notes
/// - Literal payloads are the raw source text, quotes included.
/// - `AutoSemi` is a semicolon inserted by the lexer at a line break; an explicit `;` is
///   `Punctuation(Semicolon)`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    Ident(String),
    Int(String),
    Float(String),
    Imaginary(String),
    Rune(String),
    String(String),
    RawString(String),

    LineComment(String),
    BlockComment(String),

    AutoSemi,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Explicit or inserted statement terminator.
    pub fn is_semicolon(&self) -> bool {
        matches!(self, TokenKind::AutoSemi | TokenKind::Punctuation(PunctuationId::Semicolon))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment(_) | TokenKind::BlockComment(_))
    }

    /// Source spelling of this token. `AutoSemi` and `Eof` have none.
    pub fn text(&self) -> &str {
        match self {
            TokenKind::Keyword(k) => k.as_str(),
            TokenKind::Operator(o) => o.as_str(),
            TokenKind::Punctuation(p) => p.as_str(),
            TokenKind::Ident(s)
            | TokenKind::Int(s)
            | TokenKind::Float(s)
            | TokenKind::Imaginary(s)
            | TokenKind::Rune(s)
            | TokenKind::String(s)
            | TokenKind::RawString(s)
            | TokenKind::LineComment(s)
            | TokenKind::BlockComment(s) => s,
            TokenKind::AutoSemi | TokenKind::Eof => "",
        }
    }

    /// Tokens after which a newline triggers semicolon insertion.
    pub(crate) fn ends_statement(&self) -> bool {
        match self {
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Imaginary(_)
            | TokenKind::Rune(_)
            | TokenKind::String(_)
            | TokenKind::RawString(_) => true,
            TokenKind::Keyword(k) => matches!(
                k,
                KeywordId::Break | KeywordId::Continue | KeywordId::Fallthrough | KeywordId::Return
            ),
            TokenKind::Operator(o) => matches!(o, OperatorId::Inc | OperatorId::Dec),
            TokenKind::Punctuation(p) => matches!(
                p,
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace
            ),
            _ => false,
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Join tokens back into compact Go spelling.
///
/// Used for the text of type expressions: `map [ string ] int` becomes `map[string]int`, `func ( int ) error`
/// becomes `func(int) error`. Only the spacing rules needed inside types are applied. Inserted semicolons inside
/// struct and interface literals are spelled `;` unless they precede the closing brace.
pub fn tokens_text(tokens: &[Token]) -> String {
    let semi = TokenKind::Punctuation(PunctuationId::Semicolon);
    let visible: Vec<&TokenKind> = tokens
        .iter()
        .map(|t| &t.kind)
        .filter(|k| !k.is_comment() && !matches!(k, TokenKind::Eof))
        .collect();
    let mut out = String::new();
    let mut prev: Option<&TokenKind> = None;
    for (i, kind) in visible.iter().enumerate() {
        let kind = if matches!(kind, TokenKind::AutoSemi) {
            let next = visible.get(i + 1);
            if next.is_none_or(|n| n.is_punctuation(PunctuationId::RBrace)) {
                continue;
            }
            &semi
        } else {
            *kind
        };
        if prev.is_some_and(|p| needs_space(p, kind)) {
            out.push(' ');
        }
        out.push_str(kind.text());
        prev = Some(kind);
    }
    out
}

fn needs_space(prev: &TokenKind, next: &TokenKind) -> bool {
    use PunctuationId as P;
    let word = |k: &TokenKind| {
        matches!(
            k,
            TokenKind::Ident(_) | TokenKind::Keyword(_) | TokenKind::Int(_) | TokenKind::String(_) | TokenKind::RawString(_)
        )
    };
    match (prev, next) {
        (TokenKind::Punctuation(P::Comma | P::Semicolon), _) => true,
        (TokenKind::Keyword(KeywordId::Struct | KeywordId::Interface), TokenKind::Punctuation(P::LBrace)) => false,
        (_, TokenKind::Punctuation(P::LBrace)) => true,
        (TokenKind::Punctuation(P::LBrace), TokenKind::Punctuation(P::RBrace)) => false,
        (TokenKind::Punctuation(P::LBrace), _) => true,
        (_, TokenKind::Punctuation(P::RBrace)) => true,
        (TokenKind::Keyword(KeywordId::Chan), TokenKind::Operator(OperatorId::Arrow)) => false,
        (TokenKind::Operator(OperatorId::Arrow), TokenKind::Keyword(KeywordId::Chan)) => false,
        (TokenKind::Operator(OperatorId::Arrow), _) => true,
        (TokenKind::Operator(OperatorId::Pipe), _) | (_, TokenKind::Operator(OperatorId::Pipe)) => true,
        (TokenKind::Punctuation(P::RParen), _) if word(next) => true,
        (TokenKind::Punctuation(P::RParen), TokenKind::Punctuation(P::LParen)) => true,
        (TokenKind::Punctuation(P::RParen), TokenKind::Operator(OperatorId::Star)) => true,
        (TokenKind::Punctuation(P::RParen), TokenKind::Punctuation(P::LBracket)) => true,
        (a, b) => word(a) && word(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_roundtrip() {
        for kw in ["func", "package", "interface", "fallthrough", "var"] {
            let id = keyword_id(kw).unwrap();
            assert_eq!(id.as_str(), kw);
        }
        assert_eq!(keyword_id("error"), None);
    }

    #[test]
    fn test_symbol_classification() {
        assert_eq!(symbol("..."), Some(Symbol::Punctuation(PunctuationId::Ellipsis)));
        assert_eq!(symbol("&^="), Some(Symbol::Operator(OperatorId::AndNotEq)));
        assert_eq!(symbol("@"), None);
    }

    fn toks(kinds: Vec<TokenKind>) -> Vec<Token> {
        kinds.into_iter().map(|k| Token::new(k, Span::default())).collect()
    }

    #[test]
    fn test_tokens_text_spacing() {
        use PunctuationId as P;
        let map = toks(vec![
            TokenKind::Keyword(KeywordId::Map),
            TokenKind::Punctuation(P::LBracket),
            TokenKind::Ident("string".into()),
            TokenKind::Punctuation(P::RBracket),
            TokenKind::Ident("int".into()),
        ]);
        assert_eq!(tokens_text(&map), "map[string]int");

        let func = toks(vec![
            TokenKind::Keyword(KeywordId::Func),
            TokenKind::Punctuation(P::LParen),
            TokenKind::Ident("int".into()),
            TokenKind::Punctuation(P::Comma),
            TokenKind::Ident("string".into()),
            TokenKind::Punctuation(P::RParen),
            TokenKind::Ident("error".into()),
        ]);
        assert_eq!(tokens_text(&func), "func(int, string) error");

        let empty = toks(vec![
            TokenKind::Keyword(KeywordId::Struct),
            TokenKind::Punctuation(P::LBrace),
            TokenKind::Punctuation(P::RBrace),
        ]);
        assert_eq!(tokens_text(&empty), "struct{}");

        let recv_chan = toks(vec![
            TokenKind::Operator(OperatorId::Arrow),
            TokenKind::Keyword(KeywordId::Chan),
            TokenKind::Ident("int".into()),
        ]);
        assert_eq!(tokens_text(&recv_chan), "<-chan int");
    }

    #[test]
    fn test_ends_statement() {
        assert!(TokenKind::Ident("x".into()).ends_statement());
        assert!(TokenKind::Keyword(KeywordId::Return).ends_statement());
        assert!(!TokenKind::Keyword(KeywordId::Func).ends_statement());
        assert!(TokenKind::Punctuation(PunctuationId::RBrace).ends_statement());
        assert!(!TokenKind::Punctuation(PunctuationId::LBrace).ends_statement());
    }
}
