//! Wrapper emission
//!
//! Composes the formatted fragments of one declaration into a `Must` wrapper. The raw text keeps empty `()` result
//! lists and stray spaces; the formatter normalizes them afterwards.

use muster_syntax::ast::FuncDecl;

use super::errors::GenerationError;
use super::fields::{FormatMode, format_params, format_receiver, format_results};
use super::go_emitter::GoEmitter;

/// Name of the wrapper generated for `name`.
pub fn must_name(name: &str) -> String {
    format!("Must{}", name)
}

/// Append the wrapper for `decl` to `out`. Nothing is written when formatting fails.
#[tracing::instrument(skip_all, fields(name = %decl.name.node))]
pub fn emit_wrapper(out: &mut GoEmitter, decl: &FuncDecl) -> Result<(), GenerationError> {
    let name = decl.name.node.as_str();
    if decl.type_params.is_some() {
        return Err(GenerationError::TypeParameters { name: name.to_string() });
    }
    let must = must_name(name);
    let both = FormatMode::new().with_name().with_type();

    let recv_decl = format_receiver(decl.recv.as_ref(), both)?;
    let recv_call = format_receiver(decl.recv.as_ref(), FormatMode::new().with_name())?;
    let params_decl = format_params(Some(&decl.params), both)?;
    let params_call = format_params(Some(&decl.params), FormatMode::new().with_name())?;
    let results_decl = format_results(decl.results.as_ref(), FormatMode::new().with_type())?;
    let results_bind = format_results(decl.results.as_ref(), FormatMode::new().with_name().with_error())?;
    let results_ret = format_results(decl.results.as_ref(), FormatMode::new().with_name())?;

    out.comment(&format!("{must} is like {name} except it panics if {name} errors."));
    out.writef(format_args!("func {recv_decl} {must}({params_decl}) ({results_decl}) {{ \n"));
    out.indent();
    out.line(&format!("{results_bind} := {recv_call}{name}({params_call})"));
    out.block("if err != nil", |out| out.line("panic(err)"));
    out.line(&format!("return {results_ret}"));
    out.dedent();
    out.write("}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use muster_syntax::parser::parse_source;

    fn raw(signature: &str) -> Result<String, GenerationError> {
        let file = parse_source(&format!("package p\n{}\n", signature)).unwrap();
        let decl = file.functions().next().cloned().unwrap();
        let mut out = GoEmitter::new();
        emit_wrapper(&mut out, &decl)?;
        Ok(out.finish())
    }

    #[test]
    fn test_raw_template() {
        let text = raw("func Args(str string, n int) error { return nil }").unwrap();
        assert_eq!(
            text,
            "// MustArgs is like Args except it panics if Args errors.\n\
             func  MustArgs(str string, n int) () { \n\
             \terr := Args(str, n)\n\
             \tif err != nil {\n\
             \t\tpanic(err)\n\
             \t}\n\
             \treturn \n\
             }"
        );
    }

    #[test]
    fn test_raw_method_call_site() {
        let text = raw("func (t *T) Open(name string) (*File, error) { return nil, nil }").unwrap();
        assert!(text.contains("func (t *T) MustOpen(name string) (*File) { \n"), "{text}");
        assert!(text.contains("\tr0, err := t.Open(name)\n"), "{text}");
        assert!(text.contains("\treturn r0\n"), "{text}");
    }

    #[test]
    fn test_generic_functions_are_rejected() {
        let err = raw("func Map[T any](x T) (T, error) { return x, nil }").unwrap_err();
        assert_eq!(err, GenerationError::TypeParameters { name: "Map".into() });
    }

    #[test]
    fn test_failure_writes_nothing() {
        let file = parse_source("package p\nfunc F(xs []int) error { return nil }\n").unwrap();
        let decl = file.functions().next().cloned().unwrap();
        let mut out = GoEmitter::new();
        assert!(emit_wrapper(&mut out, &decl).is_err());
        assert!(out.is_empty());
    }
}
