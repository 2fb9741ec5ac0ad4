//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::MustCodegen;
use crate::frontend::ast::{FieldList, FuncDecl};
use crate::frontend::constraints::BuildContext;
use crate::frontend::loader::{self, load_package};
use crate::frontend::{diagnostics, lexer, parser};

use super::{CliError, CliResult, ExitCode};

/// Everything one generation run needs, already validated by the CLI layer.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Requested names, `Func` or `Type.Method`; never empty
    pub names: Vec<String>,
    pub output: Option<PathBuf>,
    pub tags: Vec<String>,
    pub paths: Vec<String>,
    /// Arguments as typed, recorded in the generated header
    pub invocation: String,
}

// ============================================================================
// Generation
// ============================================================================

/// Load the package, emit every requested wrapper and write the output file.
///
/// Nothing is written unless every wrapper was generated.
pub fn generate(opts: &GenerateOptions) -> CliResult<ExitCode> {
    let ctx = BuildContext::from_env(&opts.tags);
    let package = load_package(&opts.paths, &ctx).map_err(|e| CliError::failure(e.to_string()))?;

    let mut codegen = MustCodegen::new(&package);
    codegen.write_header(&opts.invocation);
    codegen
        .generate_all(&opts.names)
        .map_err(|e| CliError::failure(e.render()))?;
    let source = codegen.finish();

    let first = opts
        .names
        .first()
        .ok_or_else(|| CliError::failure("no function names given"))?;
    let output = output_path(&package.dir, first, opts.output.as_deref());
    fs::write(&output, source)
        .map_err(|e| CliError::failure(format!("writing output '{}': {}", output.display(), e)))?;

    tracing::debug!(path = %output.display(), wrappers = opts.names.len(), "wrote output");
    Ok(ExitCode::SUCCESS)
}

/// Where the generated file goes: `output` if given, else `<dir>/<first>_must.go` lower-cased.
///
/// A qualified `Type.Method` name becomes `type_method_must.go`.
pub fn output_path(dir: &Path, first: &str, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            let base = format!("{}_must.go", first.replace('.', "_")).to_lowercase();
            dir.join(base)
        }
    }
}

// ============================================================================
// Debug commands
// ============================================================================

fn read_source(file_path: &str) -> CliResult<String> {
    loader::read_source(Path::new(file_path)).map_err(|e| CliError::failure(e.to_string()))
}

/// Tokenize a file and print the tokens
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;

    let tokens = match lexer::lex(&source) {
        Ok(toks) => toks,
        Err(errs) => {
            let mut msg = String::new();
            for err in &errs {
                msg.push_str(&diagnostics::format_error(file_path, &source, err));
            }
            return Err(CliError::failure(msg.trim_end()));
        }
    };

    for tok in &tokens {
        println!("{:?}", tok);
    }

    Ok(ExitCode::SUCCESS)
}

/// Parse a file and print its package clause and function declarations
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;

    let ast = match parser::parse_source(&source) {
        Ok(ast) => ast,
        Err(errs) => {
            let mut msg = String::new();
            for err in &errs {
                msg.push_str(&diagnostics::format_error(file_path, &source, err));
            }
            return Err(CliError::failure(msg.trim_end()));
        }
    };

    match &ast.package {
        Some(pkg) => println!("package {}", pkg.node),
        None => println!("(no package clause)"),
    }
    for decl in ast.functions() {
        println!("{}", describe_func(decl));
    }

    Ok(ExitCode::SUCCESS)
}

/// One-line signature of a declaration, with grouped names flattened.
pub fn describe_func(decl: &FuncDecl) -> String {
    let mut out = String::from("func ");
    if let Some(recv) = &decl.recv {
        out.push_str(&format!("({}) ", describe_fields(recv)));
    }
    out.push_str(&decl.name.node);
    if decl.type_params.is_some() {
        out.push_str("[...]");
    }
    out.push_str(&format!("({})", describe_fields(&decl.params)));
    if let Some(results) = &decl.results {
        if results.parenthesized {
            out.push_str(&format!(" ({})", describe_fields(results)));
        } else {
            out.push_str(&format!(" {}", describe_fields(results)));
        }
    }
    if decl.body.is_none() {
        out.push_str(" // no body");
    }
    out
}

fn describe_fields(list: &FieldList) -> String {
    list.entries()
        .iter()
        .map(|entry| match entry.name {
            Some(name) => format!("{} {}", name, entry.ty.node),
            None => entry.ty.node.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
