#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover signature shapes muster relies on and the parser's recovery behavior
/// (one error per broken declaration, no cascades).
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<SourceFile, Vec<CompileError>> {
        parse_source(source)
    }

    fn only_func(source: &str) -> FuncDecl {
        let file = parse_str(source).unwrap();
        let funcs: Vec<_> = file.functions().cloned().collect();
        assert_eq!(funcs.len(), 1, "expected one function in {source:?}");
        funcs.into_iter().next().unwrap()
    }

    fn names(list: &FieldList) -> Vec<Option<String>> {
        list.entries().iter().map(|e| e.name.map(str::to_string)).collect()
    }

    fn types(list: &FieldList) -> Vec<String> {
        list.entries().iter().map(|e| e.ty.node.to_string()).collect()
    }

    #[test]
    fn test_package_and_decls() {
        let source = r#"package demo

import (
	"errors"
	"fmt"
)

const limit = 3

type Box struct {
	v int
}

var ErrEmpty = errors.New("empty")

func Open(path string) (*Box, error) {
	if path == "" {
		return nil, ErrEmpty
	}
	fmt.Println(path)
	return &Box{}, nil
}
"#;
        let file = parse_str(source).unwrap();
        assert_eq!(file.package.as_ref().unwrap().node, "demo");
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|d| match &d.node {
                Decl::Gen(g) => format!("{:?}", g.kind),
                Decl::Func(f) => format!("func {}", f.name.node),
            })
            .collect();
        assert_eq!(kinds, vec!["Import", "Const", "Type", "Var", "func Open"]);
    }

    #[test]
    fn test_partial_source_without_package() {
        let file = parse_str("func F() {}\n").unwrap();
        assert!(file.package.is_none());
        assert_eq!(file.functions().count(), 1);
    }

    #[test]
    fn test_grouped_names_share_type() {
        let f = only_func("package p\nfunc F(a, b int, s string) {}\n");
        assert_eq!(
            names(&f.params),
            vec![Some("a".into()), Some("b".into()), Some("s".into())]
        );
        assert_eq!(types(&f.params), vec!["int", "int", "string"]);
        assert_eq!(f.params.fields.len(), 2);
    }

    #[test]
    fn test_unnamed_params_are_types() {
        let f = only_func("package p\nfunc F(int, string) (int, error) {}\n");
        assert_eq!(names(&f.params), vec![None, None]);
        assert_eq!(types(&f.params), vec!["int", "string"]);
        let results = f.results.unwrap();
        assert!(results.parenthesized);
        assert_eq!(types(&results), vec!["int", "error"]);
    }

    #[test]
    fn test_single_unparenthesized_result() {
        let f = only_func("package p\nfunc F() error { return nil }\n");
        let results = f.results.unwrap();
        assert!(!results.parenthesized);
        assert_eq!(types(&results), vec!["error"]);
    }

    #[test]
    fn test_no_result() {
        let f = only_func("package p\nfunc F() {}\n");
        assert!(f.results.is_none());
        assert!(f.params.is_empty());
        assert!(f.body.is_some());
    }

    #[test]
    fn test_named_results() {
        let f = only_func("package p\nfunc F() (n int, err error) { return }\n");
        let results = f.results.unwrap();
        assert_eq!(names(&results), vec![Some("n".into()), Some("err".into())]);
    }

    #[test]
    fn test_method_receivers() {
        let source = "package p\nfunc (t T) A() {}\nfunc (t *T) B() {}\nfunc (*T) C() {}\n";
        let file = parse_str(source).unwrap();
        let funcs: Vec<_> = file.functions().collect();
        assert_eq!(types(funcs[0].recv.as_ref().unwrap()), vec!["T"]);
        assert_eq!(types(funcs[1].recv.as_ref().unwrap()), vec!["*T"]);
        assert_eq!(names(funcs[2].recv.as_ref().unwrap()), vec![None]);
        assert!(funcs.iter().all(|f| f.receiver_base_type() == Some("T")));
    }

    #[test]
    fn test_variadic_param() {
        let f = only_func("package p\nfunc F(format string, args ...any) {}\n");
        let entries = f.params.entries();
        assert!(entries[1].ty.node.is_variadic());
        assert_eq!(entries[1].ty.node.to_string(), "...any");
    }

    #[test]
    fn test_unsupported_shapes_are_recorded() {
        let f = only_func(
            "package p\nfunc F(a []int, b map[string]int, c pkg.T, d func(int) error, e chan<- int, g [4]byte, h struct{}) {}\n",
        );
        let shapes: Vec<_> = f
            .params
            .entries()
            .iter()
            .map(|e| match &e.ty.node {
                TypeExpr::Unsupported { shape, text } => (*shape, text.clone()),
                other => panic!("expected unsupported type, got {other:?}"),
            })
            .collect();
        assert_eq!(
            shapes,
            vec![
                (TypeShape::Slice, "[]int".to_string()),
                (TypeShape::Map, "map[string]int".to_string()),
                (TypeShape::Qualified, "pkg.T".to_string()),
                (TypeShape::Func, "func(int) error".to_string()),
                (TypeShape::Chan, "chan<- int".to_string()),
                (TypeShape::Array, "[4]byte".to_string()),
                (TypeShape::Struct, "struct{}".to_string()),
            ]
        );
    }

    #[test]
    fn test_generic_instantiation_vs_array_param() {
        let f = only_func("package p\nfunc F(List[int], Pair[K, V]) {}\n");
        assert_eq!(names(&f.params), vec![None, None]);
        assert_eq!(types(&f.params), vec!["List[int]", "Pair[K, V]"]);

        let g = only_func("package p\nfunc G(buf [8]byte) {}\n");
        assert_eq!(names(&g.params), vec![Some("buf".into())]);
    }

    #[test]
    fn test_type_params_are_recorded() {
        let f = only_func("package p\nfunc Map[T any, U any](x T) U { var u U; return u }\n");
        assert!(f.type_params.is_some());
        assert_eq!(names(&f.params), vec![Some("x".into())]);
    }

    #[test]
    fn test_external_func_without_body() {
        let f = only_func("package p\nfunc add(a, b int) int\n");
        assert!(f.body.is_none());
    }

    #[test]
    fn test_multiline_params_with_trailing_comma() {
        let f = only_func("package p\nfunc F(\n\ta int,\n\tb string,\n) error {\n\treturn nil\n}\n");
        assert_eq!(names(&f.params), vec![Some("a".into()), Some("b".into())]);
    }

    #[test]
    fn test_mixed_named_and_unnamed_is_error() {
        let err = parse_str("package p\nfunc F(a int, string) {}\n").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].message, "mixed named and unnamed parameters");

        let err = parse_str("package p\nfunc F(a, b int, c) {}\n").unwrap_err();
        assert_eq!(err[0].message, "mixed named and unnamed parameters");
    }

    #[test]
    fn test_recovery_reports_each_broken_decl_once() {
        let source = "package p\nfunc A( {}\nfunc B() {}\nfunc C(x) int) {}\n";
        let err = parse_str(source).unwrap_err();
        assert_eq!(err.len(), 2, "{err:?}");
    }

    #[test]
    fn test_statement_at_top_level_is_error() {
        let err = parse_str("package p\nx := 1\n").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].message.starts_with("non-declaration statement outside function body"));
    }

    #[test]
    fn test_unbalanced_body_is_error() {
        let err = parse_str("package p\nfunc F() {\n").unwrap_err();
        assert!(err[0].message.contains("EOF"), "{}", err[0].message);
    }

    #[test]
    fn test_decl_spans_cover_signature_and_body() {
        let source = "package p\n\nfunc F(a int) error { return nil }\n";
        let file = parse_str(source).unwrap();
        let span = file.decls[0].span;
        assert_eq!(&source[span.start..span.end], "func F(a int) error { return nil }");
    }
}
