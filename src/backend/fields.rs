//! Field-list and type formatting
//!
//! Each formatter turns a receiver, parameter or result list into one Go source fragment under a [`FormatMode`].
//! An absent list always formats as the empty string.

use muster_syntax::ast::{FieldEntry, FieldList, TypeExpr};

use super::errors::GenerationError;

/// Which parts of a field a formatter should produce.
///
/// The flags are independent. For results, leaving `name` unset never hides a name written in source; it only turns
/// off synthesis of `r<index>` for unnamed entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatMode {
    pub name: bool,
    pub ty: bool,
    pub error: bool,
}

impl FormatMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self) -> Self {
        self.name = true;
        self
    }

    pub fn with_type(mut self) -> Self {
        self.ty = true;
        self
    }

    pub fn with_error(mut self) -> Self {
        self.error = true;
        self
    }
}

/// Format a method receiver.
///
/// With `ty` this is the declaration form `(t *T)`; without it, the call-site prefix `t.`.
pub fn format_receiver(list: Option<&FieldList>, mode: FormatMode) -> Result<String, GenerationError> {
    let Some(list) = list else {
        return Ok(String::new());
    };
    let entries = list.entries();
    let [entry] = entries.as_slice() else {
        return Err(GenerationError::ReceiverCount { found: entries.len() });
    };

    let name = if mode.name {
        entry.name.ok_or_else(|| GenerationError::MissingName {
            what: "receiver".to_string(),
        })?
    } else {
        ""
    };

    if mode.ty {
        let ty = format_type(&entry.ty.node)?;
        Ok(format!("({})", join_pair(name, &ty)))
    } else if name.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("{}.", name))
    }
}

/// Format a parameter list. Parameters are never given synthetic names.
pub fn format_params(list: Option<&FieldList>, mode: FormatMode) -> Result<String, GenerationError> {
    let Some(list) = list else {
        return Ok(String::new());
    };
    let mut params = Vec::new();
    for entry in list.entries() {
        let name = if mode.name {
            entry.name.ok_or_else(|| GenerationError::MissingName {
                what: format!("parameter {}", entry.index),
            })?
        } else {
            ""
        };
        let param = if mode.ty {
            join_pair(name, &format_type(&entry.ty.node)?)
        } else if entry.ty.node.is_variadic() && !name.is_empty() {
            // spread the slice back into the variadic call
            format!("{}...", name)
        } else {
            name.to_string()
        };
        params.push(param);
    }
    Ok(params.join(", "))
}

/// Format a result list, always leaving out the last (error) entry.
pub fn format_results(list: Option<&FieldList>, mode: FormatMode) -> Result<String, GenerationError> {
    let Some(list) = list else {
        return Ok(String::new());
    };
    let entries = list.entries();
    let kept = entries.len().saturating_sub(1);

    let mut results = Vec::with_capacity(entries.len());
    for entry in &entries[..kept] {
        let name = if mode.name {
            result_name(entry, entry.index)
        } else {
            entry.name.map(str::to_string).unwrap_or_default()
        };
        let result = if mode.ty {
            join_pair(&name, &format_type(&entry.ty.node)?)
        } else {
            name
        };
        results.push(result);
    }

    if mode.error {
        results.push(if mode.ty { "err error" } else { "err" }.to_string());
    }
    Ok(results.join(", "))
}

/// The name a result is bound to: its source name, or `r<index>` when unnamed.
pub fn result_name(entry: &FieldEntry<'_>, index: usize) -> String {
    match entry.name {
        Some(name) => name.to_string(),
        None => format!("r{}", index),
    }
}

/// Render a type as Go source. Only names, pointers and variadics are accepted.
pub fn format_type(ty: &TypeExpr) -> Result<String, GenerationError> {
    match ty {
        TypeExpr::Ident(name) => Ok(name.clone()),
        TypeExpr::Pointer(inner) => Ok(format!("*{}", format_type(inner)?)),
        TypeExpr::Variadic(inner) => Ok(format!("...{}", format_type(inner)?)),
        TypeExpr::Unsupported { shape, text } => Err(GenerationError::UnsupportedType {
            shape: *shape,
            text: text.clone(),
        }),
    }
}

fn join_pair(name: &str, ty: &str) -> String {
    format!("{} {}", name, ty).trim().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use muster_syntax::ast::{FuncDecl, TypeShape};
    use muster_syntax::parser::parse_source;

    fn func(signature: &str) -> FuncDecl {
        let file = parse_source(&format!("package p\n{}\n", signature)).unwrap();
        file.functions().next().cloned().unwrap()
    }

    fn both() -> FormatMode {
        FormatMode::new().with_name().with_type()
    }

    #[test]
    fn test_mode_builders_are_orthogonal() {
        let mode = FormatMode::new().with_error();
        assert!(mode.error && !mode.name && !mode.ty);
        assert_eq!(both(), FormatMode { name: true, ty: true, error: false });
    }

    #[test]
    fn test_absent_lists_are_empty() {
        let f = func("func F() {}");
        assert_eq!(format_receiver(f.recv.as_ref(), both()).unwrap(), "");
        assert_eq!(format_results(f.results.as_ref(), both().with_error()).unwrap(), "");
        assert_eq!(format_params(Some(&f.params), both()).unwrap(), "");
    }

    #[test]
    fn test_receiver_forms() {
        let f = func("func (t *T) M() error { return nil }");
        assert_eq!(format_receiver(f.recv.as_ref(), both()).unwrap(), "(t *T)");
        assert_eq!(format_receiver(f.recv.as_ref(), FormatMode::new().with_name()).unwrap(), "t.");
        assert_eq!(format_receiver(f.recv.as_ref(), FormatMode::new().with_type()).unwrap(), "(*T)");
        assert_eq!(format_receiver(f.recv.as_ref(), FormatMode::new()).unwrap(), "");
    }

    #[test]
    fn test_unnamed_receiver_is_error_when_name_needed() {
        let f = func("func (T) M() error { return nil }");
        let err = format_receiver(f.recv.as_ref(), both()).unwrap_err();
        assert_eq!(err, GenerationError::MissingName { what: "receiver".into() });
    }

    #[test]
    fn test_receiver_count_is_checked() {
        let f = func("func (a, b T) M() error { return nil }");
        let err = format_receiver(f.recv.as_ref(), both()).unwrap_err();
        assert_eq!(err, GenerationError::ReceiverCount { found: 2 });

        let f = func("func () M() error { return nil }");
        let err = format_receiver(f.recv.as_ref(), both()).unwrap_err();
        assert_eq!(err, GenerationError::ReceiverCount { found: 0 });
    }

    #[test]
    fn test_params_declaration_and_call_forms() {
        let f = func("func F(a, b int, s *string) error { return nil }");
        assert_eq!(format_params(Some(&f.params), both()).unwrap(), "a int, b int, s *string");
        assert_eq!(format_params(Some(&f.params), FormatMode::new().with_name()).unwrap(), "a, b, s");
        assert_eq!(format_params(Some(&f.params), FormatMode::new().with_type()).unwrap(), "int, int, *string");
    }

    #[test]
    fn test_variadic_params() {
        let f = func("func F(format string, args ...any) error { return nil }");
        assert_eq!(format_params(Some(&f.params), both()).unwrap(), "format string, args ...any");
        assert_eq!(format_params(Some(&f.params), FormatMode::new().with_name()).unwrap(), "format, args...");
    }

    #[test]
    fn test_unnamed_params_are_error_when_name_needed() {
        let f = func("func F(int, string) error { return nil }");
        let err = format_params(Some(&f.params), both()).unwrap_err();
        assert_eq!(err, GenerationError::MissingName { what: "parameter 0".into() });
        assert_eq!(format_params(Some(&f.params), FormatMode::new().with_type()).unwrap(), "int, string");
    }

    #[test]
    fn test_results_skip_last_entry() {
        let f = func("func F() (string, int, error) { return \"\", 0, nil }");
        let results = f.results.as_ref();
        assert_eq!(format_results(results, FormatMode::new().with_type()).unwrap(), "string, int");
        assert_eq!(format_results(results, FormatMode::new().with_name().with_error()).unwrap(), "r0, r1, err");
        assert_eq!(format_results(results, FormatMode::new().with_name()).unwrap(), "r0, r1");
        assert_eq!(format_results(results, both().with_error()).unwrap(), "r0 string, r1 int, err error");
    }

    #[test]
    fn test_named_results_keep_names_without_name_flag() {
        let f = func("func F() (str string, n int, err error) { return }");
        let results = f.results.as_ref();
        assert_eq!(format_results(results, FormatMode::new().with_type()).unwrap(), "str string, n int");
        assert_eq!(format_results(results, FormatMode::new().with_name()).unwrap(), "str, n");
    }

    #[test]
    fn test_error_only_result() {
        let f = func("func F() error { return nil }");
        let results = f.results.as_ref();
        assert_eq!(format_results(results, FormatMode::new().with_type()).unwrap(), "");
        assert_eq!(format_results(results, FormatMode::new().with_name().with_error()).unwrap(), "err");
    }

    #[test]
    fn test_result_name_is_pure() {
        let f = func("func F() (int, error) { return 0, nil }");
        let results = f.results.clone().unwrap();
        let entries = results.entries();
        assert_eq!(result_name(&entries[0], 0), "r0");
        assert_eq!(result_name(&entries[0], 7), "r7");
        // the AST is not touched by formatting
        let _ = format_results(Some(&results), FormatMode::new().with_name()).unwrap();
        assert_eq!(f.results.unwrap(), results);
    }

    #[test]
    fn test_format_type() {
        let ptr = TypeExpr::Pointer(Box::new(TypeExpr::Pointer(Box::new(TypeExpr::Ident("T".into())))));
        assert_eq!(format_type(&ptr).unwrap(), "**T");
        let var = TypeExpr::Variadic(Box::new(TypeExpr::Ident("int".into())));
        assert_eq!(format_type(&var).unwrap(), "...int");
    }

    #[test]
    fn test_unsupported_types_are_errors() {
        let f = func("func F(xs []int) error { return nil }");
        let err = format_params(Some(&f.params), both()).unwrap_err();
        assert_eq!(
            err,
            GenerationError::UnsupportedType {
                shape: TypeShape::Slice,
                text: "[]int".into()
            }
        );

        let f = func("func F(p *pkg.T) error { return nil }");
        let err = format_params(Some(&f.params), both()).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedType { shape: TypeShape::Qualified, .. }));
        // call sites only need names
        assert_eq!(format_params(Some(&f.params), FormatMode::new().with_name()).unwrap(), "p");
    }
}
