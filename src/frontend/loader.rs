//! Package loading for muster
//!
//! Turns the command-line arguments into exactly one parsed Go package:
//! - no arguments: the current directory
//! - one directory: every buildable `.go` file in it
//! - a list of `.go` files: those files, which must form one package
//!
//! Directory mode skips `_test.go` files and files excluded by build constraints. Explicit files are taken as given.

use std::fs;
use std::path::{Path, PathBuf};

use super::ast::SourceFile;
use super::constraints::{BuildContext, ConstraintError};
use super::diagnostics::{CompileError, format_error};
use super::parser;

/// Maximum source file size (10 MiB)
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// One parsed file of a package
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub ast: SourceFile,
}

/// A loaded Go package: its name, directory and parsed files in load order.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<ParsedFile>,
}

/// Errors that stop a package from loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read '{}': {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("'{}' is too large ({size} bytes, max {max} bytes)", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("no buildable Go source files in {}", dir.display())]
    NoGoFiles { dir: PathBuf },

    #[error("named files must be .go files: {}", path.display())]
    NotGoFile { path: PathBuf },

    #[error("named files must all be in one directory; have {} and {}", first.display(), second.display())]
    MixedDirectories { first: PathBuf, second: PathBuf },

    /// Lex or parse errors; `rendered` holds every diagnostic with source context.
    #[error("{rendered}")]
    Parse {
        path: PathBuf,
        errors: Vec<CompileError>,
        rendered: String,
    },

    #[error("{}: {error}", path.display())]
    Constraint {
        path: PathBuf,
        #[source]
        error: ConstraintError,
    },

    #[error("{}: expected 'package', found no package clause", path.display())]
    NoPackage { path: PathBuf },

    #[error("found packages {first} ({}) and {second} ({}) in {}", first_file.display(), second_file.display(), dir.display())]
    MultiplePackages {
        dir: PathBuf,
        first: String,
        first_file: PathBuf,
        second: String,
        second_file: PathBuf,
    },
}

/// Load the package named by `args` under the given build context.
#[tracing::instrument(skip_all, fields(args = ?args, goos = %ctx.goos, goarch = %ctx.goarch))]
pub fn load_package(args: &[String], ctx: &BuildContext) -> Result<Package, LoadError> {
    let (dir, paths) = match args {
        [] => {
            let dir = PathBuf::from(".");
            let paths = scan_directory(&dir, ctx)?;
            (dir, paths)
        }
        [single] if Path::new(single).is_dir() => {
            let dir = PathBuf::from(single);
            let paths = scan_directory(&dir, ctx)?;
            (dir, paths)
        }
        files => named_files(files)?,
    };

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let source = read_source(&path)?;
        sources.push((path, source));
    }
    load_sources(dir, sources)
}

/// Build a package from already-read sources. Files are kept in the given order.
pub fn load_sources(dir: PathBuf, sources: Vec<(PathBuf, String)>) -> Result<Package, LoadError> {
    if sources.is_empty() {
        return Err(LoadError::NoGoFiles { dir });
    }

    let mut files = Vec::with_capacity(sources.len());
    for (path, source) in sources {
        let ast = parse_file(&path, &source)?;
        files.push(ParsedFile { path, source, ast });
    }

    let mut name: Option<(String, PathBuf)> = None;
    for file in &files {
        let Some(pkg) = &file.ast.package else {
            return Err(LoadError::NoPackage {
                path: file.path.clone(),
            });
        };
        match &name {
            None => name = Some((pkg.node.clone(), file.path.clone())),
            Some((first, first_file)) if *first != pkg.node => {
                return Err(LoadError::MultiplePackages {
                    dir,
                    first: first.clone(),
                    first_file: first_file.clone(),
                    second: pkg.node.clone(),
                    second_file: file.path.clone(),
                });
            }
            Some(_) => {}
        }
    }

    let name = name.map(|(n, _)| n).unwrap_or_default();
    tracing::debug!(package = %name, files = files.len(), "loaded package");
    Ok(Package { name, dir, files })
}

fn parse_file(path: &Path, source: &str) -> Result<SourceFile, LoadError> {
    parser::parse_source(source).map_err(|errors| {
        let file_name = path.display().to_string();
        let rendered = errors
            .iter()
            .map(|e| format_error(&file_name, source, e))
            .collect::<Vec<_>>()
            .join("\n");
        LoadError::Parse {
            path: path.to_path_buf(),
            errors,
            rendered,
        }
    })
}

/// Read a source file, refusing anything over [`MAX_SOURCE_SIZE`].
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    let metadata = fs::metadata(path).map_err(|error| LoadError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(|error| LoadError::Io {
        path: path.to_path_buf(),
        error,
    })
}

/// Collect the buildable `.go` files of a directory, sorted by name.
fn scan_directory(dir: &Path, ctx: &BuildContext) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|error| LoadError::Io {
        path: dir.to_path_buf(),
        error,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|error| LoadError::Io {
            path: dir.to_path_buf(),
            error,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.ends_with(".go") || file_name.starts_with('.') || file_name.starts_with('_') {
            continue;
        }
        if file_name.ends_with("_test.go") {
            tracing::debug!(file = file_name, "skipping test file");
            continue;
        }
        if !ctx.file_name_matches(file_name) {
            tracing::debug!(file = file_name, "skipping file: name suffix excludes target");
            continue;
        }
        let source = read_source(&path)?;
        let included = ctx.header_matches(&source).map_err(|error| LoadError::Constraint {
            path: path.clone(),
            error,
        })?;
        if !included {
            tracing::debug!(file = file_name, "skipping file: //go:build excludes target");
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    if paths.is_empty() {
        return Err(LoadError::NoGoFiles { dir: dir.to_path_buf() });
    }
    Ok(paths)
}

/// Validate an explicit file list: all `.go`, all in one directory.
fn named_files(files: &[String]) -> Result<(PathBuf, Vec<PathBuf>), LoadError> {
    let mut dir: Option<PathBuf> = None;
    let mut paths = Vec::with_capacity(files.len());
    for file in files {
        let path = PathBuf::from(file);
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            return Err(LoadError::NotGoFile { path });
        }
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        match &dir {
            None => dir = Some(parent),
            Some(first) if *first != parent => {
                return Err(LoadError::MixedDirectories {
                    first: first.clone(),
                    second: parent,
                });
            }
            Some(_) => {}
        }
        paths.push(path);
    }
    Ok((dir.unwrap_or_else(|| PathBuf::from(".")), paths))
}
