//! Formatting configuration for generated Go
//!
//! The defaults follow gofmt: tab indentation and at most one consecutive blank line.

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// How one indentation level is written
    pub indent_style: IndentStyle,
    /// Maximum number of consecutive blank lines kept from the input
    pub max_blank_lines: usize,
}

/// Indentation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Tabs,
    Spaces(usize),
}

impl IndentStyle {
    pub fn unit(self) -> String {
        match self {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces(width) => " ".repeat(width),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Tabs,
            max_blank_lines: 1,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_style(mut self, style: IndentStyle) -> Self {
        self.indent_style = style;
        self
    }

    pub fn with_max_blank_lines(mut self, count: usize) -> Self {
        self.max_blank_lines = count;
        self
    }
}
