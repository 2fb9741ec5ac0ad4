//! muster frontend
//!
//! - `lexer`, `parser`, `ast`, `diagnostics`: Go syntax, provided by the shared `muster_syntax` crate
//! - `constraints`: `//go:build` evaluation and GOOS/GOARCH file-name rules
//! - `loader`: resolving command-line paths to a single parsed package

// Syntax components are provided by the shared muster_syntax crate.
pub use muster_syntax::{ast, diagnostics, lexer, parser};

pub mod constraints;
pub mod loader;
