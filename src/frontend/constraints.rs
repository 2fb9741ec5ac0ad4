//! Build constraints: `//go:build` lines and `_GOOS`/`_GOARCH` file name suffixes.
//!
//! A [`BuildContext`] answers whether a tag is satisfied. Tags that hold:
//! - every user tag passed with `--tags`
//! - the target `GOOS` and `GOARCH` (from the environment, else the host)
//! - `gc`, every `go1.N` release tag, and `unix` on unix-like targets
//!
//! Only the `//go:build` form is understood; legacy `// +build` lines are ignored.

use std::env;

/// Operating systems Go knows about, used to recognize file name suffixes.
const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux", "nacl", "netbsd",
    "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// Architectures Go knows about, used to recognize file name suffixes.
const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle", "mips64",
    "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv", "riscv64", "s390", "s390x", "sparc",
    "sparc64", "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux", "netbsd", "openbsd",
    "solaris",
];

/// Error in a `//go:build` expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid //go:build expression '{expr}': {reason}")]
pub struct ConstraintError {
    pub expr: String,
    pub reason: String,
}

/// Target platform and tags used to select files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub tags: Vec<String>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

impl BuildContext {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            tags: Vec::new(),
        }
    }

    /// Context for the machine muster runs on, spelled the way Go spells it.
    pub fn host() -> Self {
        Self::new(go_os(env::consts::OS), go_arch(env::consts::ARCH))
    }

    /// Host context with `GOOS`/`GOARCH` overrides from the environment and the given user tags.
    pub fn from_env(tags: &[String]) -> Self {
        let mut ctx = Self::host();
        if let Some(goos) = env::var("GOOS").ok().filter(|v| !v.is_empty()) {
            ctx.goos = goos;
        }
        if let Some(goarch) = env::var("GOARCH").ok().filter(|v| !v.is_empty()) {
            ctx.goarch = goarch;
        }
        ctx.with_tags(tags.iter().cloned())
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags.extend(tags.into_iter().filter(|t| !t.is_empty()));
        self
    }

    /// Return `true` if a single build tag is satisfied.
    pub fn matches_tag(&self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) || tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "gc" => true,
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            _ => tag
                .strip_prefix("go1.")
                .is_some_and(|minor| !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit())),
        }
    }

    /// Evaluate a `//go:build` expression (the text after the directive).
    pub fn eval(&self, expr: &str) -> Result<bool, ConstraintError> {
        let tokens = tokenize(expr).map_err(|reason| ConstraintError {
            expr: expr.to_string(),
            reason,
        })?;
        let mut parser = ExprParser {
            tokens: &tokens,
            pos: 0,
            ctx: self,
        };
        let value = parser.or_expr().map_err(|reason| ConstraintError {
            expr: expr.to_string(),
            reason,
        })?;
        if parser.pos != tokens.len() {
            return Err(ConstraintError {
                expr: expr.to_string(),
                reason: format!("unexpected '{}'", tokens[parser.pos]),
            });
        }
        Ok(value)
    }

    /// Apply Go's `name_GOOS_GOARCH.go` convention. Files without a recognized suffix always match.
    pub fn file_name_matches(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        let Some(idx) = stem.find('_') else {
            return true;
        };
        let rest = &stem[idx..];
        let mut parts: Vec<&str> = rest.split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }
        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches_tag(parts[n - 2]) && self.matches_tag(parts[n - 1]);
        }
        if n >= 1 {
            let last = parts[n - 1];
            if KNOWN_OS.contains(&last) || KNOWN_ARCH.contains(&last) {
                return self.matches_tag(last);
            }
        }
        true
    }

    /// Evaluate the `//go:build` line in a file's header, if any. Files without one match.
    pub fn header_matches(&self, source: &str) -> Result<bool, ConstraintError> {
        match build_expr(source)? {
            Some(expr) => self.eval(&expr),
            None => Ok(true),
        }
    }
}

/// Find the `//go:build` expression among the comments before the package clause.
pub fn build_expr(source: &str) -> Result<Option<String>, ConstraintError> {
    let mut found: Option<String> = None;
    let mut in_block = false;
    for line in source.lines() {
        let line = line.trim();
        if in_block {
            if line.contains("*/") {
                in_block = false;
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("//go:build") {
            if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
                continue;
            }
            if found.is_some() {
                return Err(ConstraintError {
                    expr: rest.trim().to_string(),
                    reason: "multiple //go:build comments".to_string(),
                });
            }
            found = Some(rest.trim().to_string());
            continue;
        }
        if line.starts_with("//") {
            continue;
        }
        if line.starts_with("/*") {
            in_block = !line.contains("*/");
            continue;
        }
        break;
    }
    Ok(found)
}

fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        other => other,
    }
}

// ============================================================================
// Expression parsing
// ============================================================================

fn tokenize(expr: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            ' ' | '\t' => {}
            '(' | ')' | '!' => tokens.push(c.to_string()),
            '&' | '|' => {
                if chars.peek().map(|(_, n)| *n) == Some(c) {
                    chars.next();
                    tokens.push(format!("{c}{c}"));
                } else {
                    return Err(format!("unexpected '{}' at offset {}", c, i));
                }
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut tag = c.to_string();
                while let Some(&(_, n)) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' || n == '.' {
                        tag.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(tag);
            }
            other => return Err(format!("unexpected '{}' at offset {}", other, i)),
        }
    }
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }
    Ok(tokens)
}

/// Recursive-descent evaluator: `||` binds loosest, then `&&`, then `!`.
struct ExprParser<'a> {
    tokens: &'a [String],
    pos: usize,
    ctx: &'a BuildContext,
}

impl ExprParser<'_> {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn or_expr(&mut self) -> Result<bool, String> {
        let mut value = self.and_expr()?;
        while self.peek() == Some("||") {
            self.pos += 1;
            let rhs = self.and_expr()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn and_expr(&mut self) -> Result<bool, String> {
        let mut value = self.not_expr()?;
        while self.peek() == Some("&&") {
            self.pos += 1;
            let rhs = self.not_expr()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn not_expr(&mut self) -> Result<bool, String> {
        if self.peek() == Some("!") {
            self.pos += 1;
            return Ok(!self.not_expr()?);
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<bool, String> {
        match self.peek() {
            Some("(") => {
                self.pos += 1;
                let value = self.or_expr()?;
                if self.peek() != Some(")") {
                    return Err("missing ')'".to_string());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(tok @ (")" | "&&" | "||")) => Err(format!("unexpected '{}'", tok)),
            Some(tag) => {
                let value = self.ctx.matches_tag(tag);
                self.pos += 1;
                Ok(value)
            }
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> BuildContext {
        BuildContext::new("linux", "amd64")
    }

    #[test]
    fn test_eval_operators() {
        let ctx = linux();
        assert!(ctx.eval("linux").unwrap());
        assert!(!ctx.eval("windows").unwrap());
        assert!(ctx.eval("linux && amd64").unwrap());
        assert!(ctx.eval("windows || linux").unwrap());
        assert!(ctx.eval("!windows").unwrap());
        assert!(ctx.eval("(darwin || linux) && !arm64").unwrap());
        assert!(!ctx.eval("ignore").unwrap());
    }

    #[test]
    fn test_precedence_and_binds_tighter() {
        // windows || (linux && arm64) -> false
        assert!(!linux().eval("windows || linux && arm64").unwrap());
    }

    #[test]
    fn test_builtin_tags() {
        let ctx = linux();
        assert!(ctx.eval("unix").unwrap());
        assert!(ctx.eval("gc").unwrap());
        assert!(ctx.eval("go1.21").unwrap());
        assert!(!ctx.eval("gccgo").unwrap());
        assert!(!BuildContext::new("windows", "amd64").eval("unix").unwrap());
        assert!(BuildContext::new("android", "arm64").eval("linux").unwrap());
    }

    #[test]
    fn test_user_tags() {
        let ctx = linux().with_tags(vec!["integration".to_string()]);
        assert!(ctx.eval("integration && !windows").unwrap());
    }

    #[test]
    fn test_eval_errors() {
        let ctx = linux();
        assert!(ctx.eval("").is_err());
        assert!(ctx.eval("linux &&").is_err());
        assert!(ctx.eval("(linux").is_err());
        assert!(ctx.eval("linux & amd64").is_err());
        assert!(ctx.eval("linux amd64").is_err());
    }

    #[test]
    fn test_file_name_suffixes() {
        let ctx = linux();
        assert!(ctx.file_name_matches("gen.go"));
        assert!(ctx.file_name_matches("linux.go"));
        assert!(ctx.file_name_matches("file_linux.go"));
        assert!(!ctx.file_name_matches("file_windows.go"));
        assert!(ctx.file_name_matches("file_linux_amd64.go"));
        assert!(!ctx.file_name_matches("file_linux_arm64.go"));
        assert!(!ctx.file_name_matches("file_arm64.go"));
        assert!(!ctx.file_name_matches("file_windows_test.go"));
        assert!(ctx.file_name_matches("my_helper.go"));
    }

    #[test]
    fn test_build_expr_scan() {
        let src = "// Copyright\n\n//go:build linux && !cgo\n\npackage x\n//go:build windows\n";
        assert_eq!(build_expr(src).unwrap().as_deref(), Some("linux && !cgo"));
        assert_eq!(build_expr("package x\n").unwrap(), None);
        assert_eq!(build_expr("/* a\n//go:build windows\n*/\npackage x\n").unwrap(), None);
        assert!(build_expr("//go:build a\n//go:build b\npackage x\n").is_err());
    }

    #[test]
    fn test_header_matches() {
        let ctx = linux();
        assert!(!ctx.header_matches("//go:build ignore\n\npackage main\n").unwrap());
        assert!(ctx.header_matches("//go:build linux\n\npackage x\n").unwrap());
        assert!(ctx.header_matches("package x\n").unwrap());
    }
}
