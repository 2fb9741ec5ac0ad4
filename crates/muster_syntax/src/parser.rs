//! Declaration-level parser for Go source files.
//!
//! Converts a token stream into a [`SourceFile`]: the package clause plus one entry per top-level declaration.
//! Function and method signatures are parsed in full (receiver, type-parameter span, parameters, results); bodies
//! and non-function declarations are skipped by bracket matching.
//!
//! ## Examples
//!
//! ```rust
//! use muster_syntax::{lexer, parser};
//!
//! let source = "package demo\n\nfunc Add(a, b int) (int, error) { return a + b, nil }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! let add = file.functions().next().unwrap();
//! assert_eq!(add.params.entries().len(), 2);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{KeywordId, OperatorId, PunctuationId, Token, TokenKind, tokens_text};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
