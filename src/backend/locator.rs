//! Declaration lookup
//!
//! Finds the function or method a wrapper is requested for. Files are searched in load order and declarations in
//! source order; the first match wins.

use muster_syntax::ast::FuncDecl;

use super::errors::GenerationError;
use crate::frontend::loader::Package;

/// A parsed lookup request: `Name` or `Type.Method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub receiver: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> Target<'a> {
    pub fn parse(requested: &'a str) -> Self {
        match requested.split_once('.') {
            Some((receiver, name)) => Self {
                receiver: Some(receiver),
                name,
            },
            None => Self {
                receiver: None,
                name: requested,
            },
        }
    }

    fn matches(&self, decl: &FuncDecl) -> bool {
        decl.name.node == self.name
            && match self.receiver {
                Some(recv) => decl.receiver_base_type() == Some(recv),
                None => true,
            }
    }
}

/// Find the declaration for `requested` in `package`.
pub fn find_declaration<'p>(package: &'p Package, requested: &str) -> Result<&'p FuncDecl, GenerationError> {
    let target = Target::parse(requested);
    let mut candidates = package
        .files
        .iter()
        .flat_map(|file| file.ast.functions().map(move |decl| (file, decl)))
        .filter(|(_, decl)| target.matches(decl));

    let Some((file, found)) = candidates.next() else {
        return Err(GenerationError::DeclarationNotFound {
            name: requested.to_string(),
        });
    };

    let others: Vec<String> = candidates.map(|(_, decl)| describe(decl)).collect();
    if !others.is_empty() {
        tracing::warn!(
            name = requested,
            using = %describe(found),
            others = %others.join(", "),
            "ambiguous name; using the first declaration (qualify it as Type.Method to choose)"
        );
    }
    tracing::debug!(name = requested, file = %file.path.display(), "found declaration");
    Ok(found)
}

fn describe(decl: &FuncDecl) -> String {
    match decl.receiver_base_type() {
        Some(recv) => format!("{}.{}", recv, decl.name.node),
        None => decl.name.node.clone(),
    }
}
