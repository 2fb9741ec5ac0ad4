//! Errors raised while generating wrappers

use miette::Diagnostic;
use muster_syntax::ast::TypeShape;
use thiserror::Error;

/// Errors that occur while locating a declaration or formatting its signature
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerationError {
    #[error("couldn't find declaration of {name}")]
    #[diagnostic(
        code(muster::not_found),
        help("names are case-sensitive; methods can be written as Type.Method")
    )]
    DeclarationNotFound { name: String },

    #[error("expected exactly one receiver, found {found}")]
    #[diagnostic(code(muster::receiver_count))]
    ReceiverCount { found: usize },

    #[error("{what} has no name")]
    #[diagnostic(
        code(muster::missing_name),
        help("the wrapper forwards its arguments, so every receiver and parameter needs a name")
    )]
    MissingName { what: String },

    #[error("unsupported {shape} '{text}': only names, pointers and variadics can be wrapped")]
    #[diagnostic(code(muster::unsupported_type))]
    UnsupportedType { shape: TypeShape, text: String },

    #[error("cannot wrap generic function {name}: type parameters are not supported")]
    #[diagnostic(code(muster::type_parameters))]
    TypeParameters { name: String },
}

impl GenerationError {
    /// The message followed by its help line, if any.
    pub fn render(&self) -> String {
        match self.help() {
            Some(help) => format!("{}\nhelp: {}", self, help),
            None => self.to_string(),
        }
    }
}
