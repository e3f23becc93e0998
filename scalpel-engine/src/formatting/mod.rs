//! Language-family formatting.
//!
//! Two concrete block formatters exist: indentation-based
//! ([`indent::IndentFormatter`], Python family) and brace-based
//! ([`brace::BraceFormatter`], TypeScript family). Language services wrap
//! one of them and add per-element-kind hooks (`format_method`,
//! `format_class`, ...) where the language needs them.

pub mod brace;
pub mod indent;

use crate::model::element::ElementKind;

pub use brace::BraceFormatter;
pub use indent::IndentFormatter;

/// Formatting capability shared by all language formatters.
///
/// All output ends with exactly one trailing newline, so formatting an
/// already-formatted element is a no-op.
pub trait CodeFormatter: Send + Sync {
    /// One indentation level, e.g. four spaces.
    fn indent_unit(&self) -> String;

    fn indent_size(&self) -> usize;

    /// Remove the common leading whitespace of all non-blank lines.
    fn dedent(&self, code: &str) -> String {
        dedent(code)
    }

    /// Re-indent `content` so its minimum indentation becomes `base`,
    /// preserving relative indentation. Blank lines stay unindented.
    fn apply_indent(&self, content: &str, base: &str) -> String {
        apply_indent(content, base)
    }

    /// Generic block formatting for this family.
    fn format_block(&self, code: &str) -> String;

    /// Per-kind hook; defaults to the generic block formatter.
    fn format_element(&self, _kind: ElementKind, code: &str) -> String {
        self.format_block(code)
    }
}

/// Leading whitespace of a line.
pub fn indentation_of(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..end]
}

/// Common minimum indentation width of non-blank lines.
fn min_indent_width(code: &str) -> usize {
    code.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indentation_of(l).len())
        .min()
        .unwrap_or(0)
}

/// Strip the common leading whitespace; blank lines become empty.
pub fn dedent(code: &str) -> String {
    let min = min_indent_width(code);
    let mut out: Vec<String> = Vec::new();
    for line in code.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.push(line[min.min(line.len())..].to_string());
        }
    }
    out.join("\n")
}

/// Apply `base` indentation while preserving relative indentation.
pub fn apply_indent(content: &str, base: &str) -> String {
    let min = min_indent_width(content);
    let mut out: Vec<String> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            let relative = &indentation_of(line)[min.min(indentation_of(line).len())..];
            out.push(format!("{base}{relative}{}", line.trim_start()));
        }
    }
    out.join("\n")
}

/// Exactly one trailing newline.
pub fn normalize_trailing_newline(mut s: String) -> String {
    while s.ends_with('\n') {
        s.pop();
    }
    s.push('\n');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_preserves_relative_structure() {
        let code = "    def f(self):\n        return 1\n";
        assert_eq!(dedent(code), "def f(self):\n    return 1");
    }

    #[test]
    fn apply_indent_keeps_blank_lines_empty() {
        let code = "def f():\n\n    return 1";
        let out = apply_indent(code, "  ");
        assert_eq!(out, "  def f():\n\n      return 1");
    }

    #[test]
    fn trailing_newline_is_idempotent() {
        assert_eq!(normalize_trailing_newline("x\n\n\n".into()), "x\n");
        assert_eq!(normalize_trailing_newline("x".into()), "x\n");
    }
}
