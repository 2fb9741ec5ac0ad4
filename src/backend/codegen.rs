//! Wrapper generation driver
//!
//! `MustCodegen` collects the wrappers of one invocation into a single Go unit:
//!
//! ```text
//! Package → find_declaration → emit_wrapper → raw buffer → format_source → Go source
//! ```
//!
//! Formatting failures are not fatal: the raw buffer is returned and a warning is logged.

use crate::format::format_source;
use crate::frontend::loader::Package;

use super::emitter::emit_wrapper;
use super::errors::GenerationError;
use super::go_emitter::GoEmitter;
use super::locator::find_declaration;

/// Generator for the `Must` wrappers of one package
pub struct MustCodegen<'a> {
    package: &'a Package,
    out: GoEmitter,
    wrappers: usize,
}

impl<'a> MustCodegen<'a> {
    pub fn new(package: &'a Package) -> Self {
        Self {
            package,
            out: GoEmitter::new(),
            wrappers: 0,
        }
    }

    /// Write the generated-code marker and the package clause.
    pub fn write_header(&mut self, args: &str) {
        self.out.comment(&format!("Code generated by \"muster {}\"; DO NOT EDIT.", args));
        self.out.blank_line();
        self.out.line(&format!("package {}", self.package.name));
        self.out.blank_line();
    }

    /// Emit the wrapper for `name` (`Func` or `Type.Method`).
    #[tracing::instrument(skip_all, fields(name = name))]
    pub fn generate(&mut self, name: &str) -> Result<(), GenerationError> {
        let decl = find_declaration(self.package, name)?;
        let mut wrapper = GoEmitter::new();
        emit_wrapper(&mut wrapper, decl)?;
        if self.wrappers > 0 {
            self.out.blank_line();
            self.out.blank_line();
        }
        self.out.write(wrapper.as_str());
        self.wrappers += 1;
        Ok(())
    }

    /// Emit every wrapper in order, stopping at the first failure.
    pub fn generate_all<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), GenerationError> {
        for name in names {
            self.generate(name.as_ref())?;
        }
        Ok(())
    }

    /// The unformatted buffer so far
    pub fn raw(&self) -> &str {
        self.out.as_str()
    }

    /// Format the buffer, falling back to the raw text if it does not format.
    pub fn finish(self) -> String {
        let raw = self.out.finish();
        match format_source(&raw) {
            Ok(formatted) => formatted,
            Err(err) => {
                tracing::warn!("internal error: invalid Go generated: {}", err);
                tracing::warn!("compile the package to analyze the error");
                raw
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::loader::load_sources;
    use std::path::PathBuf;

    fn package(source: &str) -> Package {
        load_sources(PathBuf::from("p"), vec![(PathBuf::from("p/a.go"), source.to_string())]).unwrap()
    }

    #[test]
    fn test_full_file_with_header() {
        let pkg = package("package demo\nfunc Open(name string) (*File, error) { return nil, nil }\n");
        let mut codegen = MustCodegen::new(&pkg);
        codegen.write_header("-func=Open");
        codegen.generate("Open").unwrap();
        assert_eq!(
            codegen.finish(),
            "// Code generated by \"muster -func=Open\"; DO NOT EDIT.\n\
             \n\
             package demo\n\
             \n\
             // MustOpen is like Open except it panics if Open errors.\n\
             func MustOpen(name string) *File {\n\
             \tr0, err := Open(name)\n\
             \tif err != nil {\n\
             \t\tpanic(err)\n\
             \t}\n\
             \treturn r0\n\
             }\n"
        );
    }

    #[test]
    fn test_wrappers_are_separated_by_blank_line() {
        let pkg = package("package p\nfunc A() error { return nil }\nfunc B() error { return nil }\n");
        let mut codegen = MustCodegen::new(&pkg);
        codegen.generate_all(&["A", "B"]).unwrap();
        let out = codegen.finish();
        assert!(out.contains("}\n\n// MustB is like B"), "{out}");
    }

    #[test]
    fn test_missing_declaration_stops_generation() {
        let pkg = package("package p\nfunc A() error { return nil }\n");
        let mut codegen = MustCodegen::new(&pkg);
        let err = codegen.generate_all(&["A", "Nope"]).unwrap_err();
        assert_eq!(err, GenerationError::DeclarationNotFound { name: "Nope".into() });
    }

    #[test]
    fn test_unformattable_output_falls_back_to_raw() {
        // no results at all leaves nothing to bind the call to
        let pkg = package("package p\nfunc F() {}\n");
        let mut codegen = MustCodegen::new(&pkg);
        codegen.generate("F").unwrap();
        let raw = codegen.raw().to_string();
        assert!(raw.contains("\t := F()\n"), "{raw}");
        assert_eq!(codegen.finish(), raw);
    }
}
