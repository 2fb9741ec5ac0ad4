//! Output writer with indentation tracking
//!
//! Lines are written whole; the writer prefixes indentation and collapses blank-line runs.

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    output: String,
    indent_level: usize,
    unit: String,
    config: FormatConfig,
}

impl FormatWriter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            unit: config.indent_style.unit(),
            config,
        }
    }

    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Write one line at the current indentation. Trailing whitespace is dropped.
    pub fn writeln(&mut self, text: &str) {
        self.writeln_at(self.indent_level, text);
    }

    /// Write one line one level left of the current indentation (`case` and `default` labels).
    pub fn writeln_outdented(&mut self, text: &str) {
        self.writeln_at(self.indent_level.saturating_sub(1), text);
    }

    fn writeln_at(&mut self, level: usize, text: &str) {
        let text = text.trim_end();
        if !text.is_empty() {
            for _ in 0..level {
                self.output.push_str(&self.unit);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Write up to `count` blank lines, capped by the configured maximum. Nothing is written at the start of output.
    pub fn blank_lines(&mut self, count: usize) {
        if self.output.is_empty() {
            return;
        }
        for _ in 0..count.min(self.config.max_blank_lines) {
            self.output.push('\n');
        }
    }
}
