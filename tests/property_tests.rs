//! Property-based tests for muster
//!
//! These tests use proptest to verify invariants across many randomly
//! generated signatures, catching edge cases that hand-written tests might miss.

use muster::format::format_source;
use muster::frontend::parser::parse_source;
use muster::{MustCodegen, load_sources};
use proptest::prelude::*;
use std::path::PathBuf;

const TYPES: &[&str] = &["int", "string", "bool", "float64", "byte", "*T", "**T"];

/// Identifiers that can never collide with a Go keyword
fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}".prop_map(|s| format!("v_{}", s))
}

fn ty() -> impl Strategy<Value = String> {
    prop::sample::select(TYPES).prop_map(str::to_string)
}

fn generate(source: &str, name: &str) -> String {
    let package = load_sources(PathBuf::from("p"), vec![(PathBuf::from("p/p.go"), source.to_string())])
        .expect("package should load");
    let mut codegen = MustCodegen::new(&package);
    codegen.generate(name).expect("generation should succeed");
    codegen.finish()
}

fn unnamed_results_source(results: &[String]) -> String {
    let mut list = results.to_vec();
    list.push("error".to_string());
    format!("package p\ntype T struct{{}}\nfunc F() ({}) {{ panic(0) }}\n", list.join(", "))
}

// =============================================================================
// Result list properties
// =============================================================================

proptest! {
    /// Property: the wrapper returns exactly the original results minus the error
    #[test]
    fn wrapper_drops_exactly_the_error(results in prop::collection::vec(ty(), 0..6)) {
        let out = generate(&unnamed_results_source(&results), "F");
        let parsed = parse_source(&out).expect("generated wrapper should parse");
        let wrapper = parsed.functions().next().expect("one wrapper");

        prop_assert_eq!(wrapper.name.node.as_str(), "MustF");
        let arity = wrapper.results.as_ref().map_or(0, |r| r.entries().len());
        prop_assert_eq!(arity, results.len());

        let types: Vec<String> = wrapper
            .results
            .iter()
            .flat_map(|r| r.entries().into_iter().map(|e| e.ty.node.to_string()).collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(types, results);
    }

    /// Property: unnamed results are bound to r0..rN and returned in order
    #[test]
    fn unnamed_results_are_synthesized(results in prop::collection::vec(ty(), 0..6)) {
        let out = generate(&unnamed_results_source(&results), "F");
        let names: Vec<String> = (0..results.len()).map(|i| format!("r{}", i)).collect();

        let mut bound = names.clone();
        bound.push("err".to_string());
        let bind = format!("\t{} := F()\n", bound.join(", "));
        prop_assert!(out.contains(&bind), "missing {:?} in {}", bind, out);

        let ret = if names.is_empty() { "\treturn\n".to_string() } else { format!("\treturn {}\n", names.join(", ")) };
        prop_assert!(out.contains(&ret), "missing {:?} in {}", ret, out);
    }

    /// Property: named results keep their names in the binding and the return
    #[test]
    fn named_results_are_reused(fields in prop::collection::vec((ident(), ty()), 1..5)) {
        let mut list: Vec<String> = fields.iter().map(|(n, t)| format!("{} {}", n, t)).collect();
        list.push("err error".to_string());
        let source = format!("package p\ntype T struct{{}}\nfunc F() ({}) {{ return }}\n", list.join(", "));
        let out = generate(&source, "F");

        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        let bind = format!("\t{}, err := F()\n", names.join(", "));
        prop_assert!(out.contains(&bind), "missing {:?} in {}", bind, out);
        let ret = format!("\treturn {}\n", names.join(", "));
        prop_assert!(out.contains(&ret), "missing {:?} in {}", ret, out);
    }

    /// Property: every parameter is forwarded, in order
    #[test]
    fn parameters_are_forwarded(params in prop::collection::vec((ident(), ty()), 0..6)) {
        let decl: Vec<String> = params.iter().map(|(n, t)| format!("{} {}", n, t)).collect();
        let source = format!("package p\ntype T struct{{}}\nfunc F({}) error {{ return nil }}\n", decl.join(", "));
        let out = generate(&source, "F");

        let names: Vec<&str> = params.iter().map(|(n, _)| n.as_str()).collect();
        let call = format!("\terr := F({})\n", names.join(", "));
        prop_assert!(out.contains(&call), "missing {:?} in {}", call, out);
        let header = format!("func MustF({}) {{\n", decl.join(", "));
        prop_assert!(out.contains(&header), "missing {:?} in {}", header, out);
    }
}

// =============================================================================
// Format Properties
// =============================================================================

proptest! {
    /// Property: formatting generated wrappers is idempotent (format(format(x)) == format(x))
    #[test]
    fn format_is_idempotent(
        params in prop::collection::vec((ident(), ty()), 0..4),
        results in prop::collection::vec(ty(), 0..4),
        method in any::<bool>(),
    ) {
        let decl: Vec<String> = params.iter().map(|(n, t)| format!("{} {}", n, t)).collect();
        let mut res = results.clone();
        res.push("error".to_string());
        let recv = if method { "(t *T) " } else { "" };
        let source = format!(
            "package p\ntype T struct{{}}\nfunc {}F({}) ({}) {{ panic(0) }}\n",
            recv,
            decl.join(", "),
            res.join(", ")
        );
        let formatted = generate(&source, "F");
        let again = format_source(&formatted).expect("formatted output should format");
        prop_assert_eq!(again, formatted);
    }
}

#[test]
fn format_preserves_declarations() {
    let source = "package p\n\nfunc  A() () {\nreturn\n}\nfunc (t *T) B(x int) (int) { return x }\n";
    let formatted = format_source(source).expect("format failed");

    let before = parse_source(source).expect("parse original failed");
    let after = parse_source(&formatted).expect("parse formatted failed");
    assert_eq!(before.functions().count(), after.functions().count());
    assert_eq!(formatted, format_source(&formatted).expect("second format failed"));
}
