//! Indentation-based block formatter (Python family).

use super::{CodeFormatter, dedent, normalize_trailing_newline};

pub struct IndentFormatter {
    indent_size: usize,
}

impl IndentFormatter {
    pub fn new(indent_size: usize) -> Self {
        Self { indent_size }
    }
}

impl Default for IndentFormatter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl CodeFormatter for IndentFormatter {
    fn indent_unit(&self) -> String {
        " ".repeat(self.indent_size)
    }

    fn indent_size(&self) -> usize {
        self.indent_size
    }

    /// Normalize the block so its minimum indentation is zero; relative
    /// indentation and blank lines are preserved as-is.
    fn format_block(&self, code: &str) -> String {
        normalize_trailing_newline(dedent(code.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_keeps_relative_indent() {
        let f = IndentFormatter::default();
        let out = f.format_block("    def f(self):\n        if x:\n            y()\n");
        assert_eq!(out, "def f(self):\n    if x:\n        y()\n");
    }
}
