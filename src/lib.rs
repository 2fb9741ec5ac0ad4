#![forbid(unsafe_code)]
//! muster: `Must` wrapper generator for Go
//!
//! For each requested Go function or method that returns an error as its last result, muster emits a `Must<Name>`
//! wrapper that returns the remaining results and panics if the error is non-nil. It is meant to be run from
//! `//go:generate`.
//!
//! The crate is split into a frontend (Go syntax, build constraints, package loading), a backend (declaration lookup,
//! field formatting, wrapper emission) and a small Go formatter applied to the generated text.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: wrappers call `panic(err)` as *Go source text*. That is the purpose of the tool and has no
//!   bearing on this crate's own panic policy.

pub mod backend;
pub mod cli;
pub mod format;
pub mod frontend;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;

pub use backend::{FormatMode, GenerationError, MustCodegen};
pub use frontend::constraints::BuildContext;
pub use frontend::loader::{LoadError, Package, load_package, load_sources};

pub use format::{FormatConfig, FormatError, check_formatted, format_source, format_source_with_config};
