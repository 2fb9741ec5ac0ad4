//! Golden snapshot tests for codegen
//!
//! These tests generate complete `_must.go` files from the Go packages under
//! `tests/codegen_snapshots/` and compare them against stored snapshots. This
//! ensures output changes are reviewed and intentional.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use muster::{MustCodegen, load_sources};
use std::fs;
use std::path::PathBuf;

/// Generate the full output file for one fixture, using the names from its `//go:generate` line
fn generate_go(fixture: &str) -> String {
    let path = PathBuf::from(format!("tests/codegen_snapshots/{}.go", fixture));
    let source = fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {}", path.display()));
    let args = source
        .lines()
        .find_map(|line| line.strip_prefix("//go:generate muster "))
        .expect("fixture needs a //go:generate line")
        .to_string();
    let names: Vec<&str> = args.trim_start_matches("-func=").split(',').collect();

    let package = load_sources(PathBuf::from("tests/codegen_snapshots"), vec![(path, source)])
        .expect("load failed");
    let mut codegen = MustCodegen::new(&package);
    codegen.write_header(&args);
    codegen.generate_all(&names).expect("codegen failed");
    codegen.finish()
}

#[test]
fn test_file_ops_codegen() {
    let go_code = generate_go("file_ops");
    insta::assert_snapshot!("file_ops", go_code);
}

#[test]
fn test_variadic_and_grouped_codegen() {
    let go_code = generate_go("variadic");
    insta::assert_snapshot!("variadic", go_code);
}
