//! Abstract syntax tree for the parts of a Go file muster cares about.
//!
//! Function and method signatures are represented in full. Everything else at the top level is kept only as a
//! [`GenDecl`] marker with its span, and function bodies are kept as spans.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A parsed Go source file.
///
/// `package` is `None` for partial sources (a bare list of declarations), which the formatter accepts but the
/// package loader rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub package: Option<Spanned<Ident>>,
    pub decls: Vec<Spanned<Decl>>,
}

impl SourceFile {
    /// Top-level function and method declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match &decl.node {
            Decl::Func(func) => Some(func),
            Decl::Gen(_) => None,
        })
    }
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKind {
    Import,
    Const,
    Type,
    Var,
}

/// `import`, `const`, `type` or `var` declaration. The contents are not modeled.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub kind: GenKind,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    /// Receiver list; present only for methods
    pub recv: Option<FieldList>,
    pub name: Spanned<Ident>,
    /// Span of `[...]` type parameters on generic functions
    pub type_params: Option<Span>,
    pub params: FieldList,
    /// `None` when the function has no result at all
    pub results: Option<FieldList>,
    /// Span of the `{ ... }` body including braces; `None` for external (assembly) declarations
    pub body: Option<Span>,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }

    /// Name of the receiver's base type, with any pointer stripped (`*T` → `T`).
    ///
    /// Returns `None` for plain functions and for receivers whose type is not a simple identifier.
    pub fn receiver_base_type(&self) -> Option<&str> {
        let recv = self.recv.as_ref()?;
        let field = recv.fields.first()?;
        let mut ty = &field.ty.node;
        while let TypeExpr::Pointer(inner) = ty {
            ty = inner;
        }
        match ty {
            TypeExpr::Ident(name) => Some(name),
            TypeExpr::Unsupported { shape: TypeShape::Generic, text } => text.split('[').next(),
            _ => None,
        }
    }
}

/// A parenthesized list of receiver, parameter or result fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldList {
    pub fields: Vec<Field>,
    pub span: Span,
    /// `false` only for a single unnamed result written without parentheses (`func f() error`)
    pub parenthesized: bool,
}

impl FieldList {
    /// Flatten the list into one entry per name.
    ///
    /// `(a, b int, c string)` yields three entries; `(int, error)` yields two unnamed entries. The entry index is the
    /// zero-based position in this flattened order.
    pub fn entries(&self) -> Vec<FieldEntry<'_>> {
        let mut entries = Vec::new();
        for field in &self.fields {
            if field.names.is_empty() {
                entries.push(FieldEntry {
                    index: entries.len(),
                    name: None,
                    ty: &field.ty,
                });
            } else {
                for name in &field.names {
                    entries.push(FieldEntry {
                        index: entries.len(),
                        name: Some(name.node.as_str()),
                        ty: &field.ty,
                    });
                }
            }
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One field as written: zero or more names sharing a type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Spanned<Ident>>,
    pub ty: Spanned<TypeExpr>,
}

/// A single (optional name, type) pair of a flattened [`FieldList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEntry<'a> {
    pub index: usize,
    pub name: Option<&'a str>,
    pub ty: &'a Spanned<TypeExpr>,
}

/// Type expression.
///
/// Only identifiers, pointers and variadics are modeled structurally. Every other Go type shape parses into
/// [`TypeExpr::Unsupported`] carrying its shape and source text.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Ident(Ident),
    Pointer(Box<TypeExpr>),
    Variadic(Box<TypeExpr>),
    Unsupported { shape: TypeShape, text: String },
}

impl TypeExpr {
    pub fn is_variadic(&self) -> bool {
        matches!(self, TypeExpr::Variadic(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => write!(f, "{}", name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Variadic(inner) => write!(f, "...{}", inner),
            TypeExpr::Unsupported { text, .. } => write!(f, "{}", text),
        }
    }
}

/// Shapes of Go type expressions that have no structural representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    /// `pkg.Name`
    Qualified,
    /// `Name[T]`
    Generic,
    Array,
    Slice,
    Map,
    Chan,
    Func,
    Struct,
    Interface,
    /// `(T)`
    Paren,
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeShape::Qualified => "qualified identifier",
            TypeShape::Generic => "generic instantiation",
            TypeShape::Array => "array type",
            TypeShape::Slice => "slice type",
            TypeShape::Map => "map type",
            TypeShape::Chan => "channel type",
            TypeShape::Func => "function type",
            TypeShape::Struct => "struct type",
            TypeShape::Interface => "interface type",
            TypeShape::Paren => "parenthesized type",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Spanned<TypeExpr> {
        Spanned::new(TypeExpr::Ident(name.to_string()), Span::default())
    }

    fn name(name: &str) -> Spanned<Ident> {
        Spanned::new(name.to_string(), Span::default())
    }

    #[test]
    fn test_entries_flatten_grouped_names() {
        let list = FieldList {
            fields: vec![
                Field {
                    names: vec![name("a"), name("b")],
                    ty: ident("int"),
                },
                Field {
                    names: vec![name("s")],
                    ty: ident("string"),
                },
            ],
            span: Span::default(),
            parenthesized: true,
        };
        let entries = list.entries();
        let names: Vec<_> = entries.iter().map(|e| e.name).collect();
        assert_eq!(names, vec![Some("a"), Some("b"), Some("s")]);
        assert_eq!(entries[2].index, 2);
        assert_eq!(entries[1].ty.node, TypeExpr::Ident("int".to_string()));
    }

    #[test]
    fn test_entries_unnamed() {
        let list = FieldList {
            fields: vec![
                Field {
                    names: vec![],
                    ty: ident("string"),
                },
                Field {
                    names: vec![],
                    ty: ident("error"),
                },
            ],
            span: Span::default(),
            parenthesized: true,
        };
        let entries = list.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.name.is_none()));
    }

    #[test]
    fn test_type_display() {
        let ty = TypeExpr::Variadic(Box::new(TypeExpr::Pointer(Box::new(TypeExpr::Ident("T".into())))));
        assert_eq!(ty.to_string(), "...*T");
    }

    #[test]
    fn test_span_contains() {
        assert!(Span::new(0, 10).contains(Span::new(2, 5)));
        assert!(!Span::new(3, 10).contains(Span::new(2, 5)));
    }
}
