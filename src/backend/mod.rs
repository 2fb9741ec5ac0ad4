//! muster backend
//!
//! Turns a located Go declaration into a `Must` wrapper.
//!
//! ## Module Organization
//!
//! - `locator.rs` - finds the requested function or method in a loaded package
//! - `fields.rs` - receiver, parameter, result and type formatting under a `FormatMode`
//! - `emitter.rs` - composes one wrapper from the formatted fragments
//! - `go_emitter.rs` - low-level Go source buffer
//! - `codegen.rs` - drives a whole invocation and formats the result
//! - `errors.rs` - `GenerationError`

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod codegen;
pub mod emitter;
pub mod errors;
pub mod fields;
pub mod go_emitter;
pub mod locator;

pub use codegen::MustCodegen;
pub use errors::GenerationError;
pub use fields::FormatMode;
