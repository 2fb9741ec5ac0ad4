//! Go code emitter - accumulates generated Go source
//!
//! A thin text buffer with tab indentation. Output is not expected to be pretty; the formatter cleans it up.

use std::fmt::Write;

/// A buffer for building Go source code
#[derive(Debug, Default)]
pub struct GoEmitter {
    buffer: String,
    indent_level: usize,
}

impl GoEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the emitter and return the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write text without newline
    pub fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Write formatted text
    pub fn writef(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.buffer.write_fmt(args);
    }

    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push('\t');
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a `// text` line comment
    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {}", text));
    }

    /// Write `header {`, the indented body, and a closing `}` line.
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{} {{", header));
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }
}
