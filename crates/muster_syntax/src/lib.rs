//! Go syntax frontend for muster: lexer, declaration parser, AST, diagnostics.
//!
//! This crate only understands as much Go as a wrapper generator needs. Top-level function and method signatures are
//! parsed in full; bodies and non-function declarations are recognized and skipped by bracket matching.
//!
//! ## Notes
//! - The lexer implements Go's automatic semicolon insertion, so the parser sees statement terminators the same way
//!   `go/parser` does.
//! - Comments are kept in the token stream (the formatter needs them); the parser ignores them.
//!
//! ## Examples
//! ```rust
//! use muster_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("package demo\n\nfunc Run() error { return nil }\n").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.package.as_ref().map(|p| p.node.as_str()), Some("demo"));
//! assert_eq!(file.functions().count(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
