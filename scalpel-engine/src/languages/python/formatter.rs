//! Python-specific formatter: the indent-based block formatter plus
//! per-kind hooks.
//!
//! Definition blocks are re-anchored on their `def`/`class` header line:
//! content extracted from an indented context keeps the original
//! (absolute) body indentation while its first line was sliced at the
//! definition column, so the suite indentation is normalized relative to
//! the header instead of the raw minimum. Getter/setter hooks guarantee
//! the marker decorator is present; import formatting strips stray
//! indentation per statement.

use crate::formatting::{
    CodeFormatter, IndentFormatter, indentation_of, normalize_trailing_newline,
};
use crate::model::element::ElementKind;
use regex::Regex;

pub struct PythonFormatter {
    inner: IndentFormatter,
}

impl PythonFormatter {
    pub fn new(indent_size: usize) -> Self {
        Self {
            inner: IndentFormatter::new(indent_size),
        }
    }

    fn is_header(line: &str) -> bool {
        let trimmed = line.trim_start();
        trimmed.starts_with("def ")
            || trimmed.starts_with("async def ")
            || trimmed.starts_with("class ")
    }

    /// Re-anchor a definition block: decorators/comments and the header
    /// line at level zero, the suite re-based so its shallowest line sits
    /// one indent unit deep, relative indentation preserved.
    fn format_def_block(&self, code: &str) -> String {
        let lines: Vec<&str> = code.trim_end().lines().collect();
        let Some(header_idx) = lines.iter().position(|l| Self::is_header(l)) else {
            return self.inner.format_block(code);
        };

        let body_min = lines[header_idx + 1..]
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| indentation_of(l).len())
            .min();

        let unit = self.inner.indent_size();
        let mut out: Vec<String> = Vec::new();
        for line in &lines[..=header_idx] {
            out.push(line.trim().to_string());
        }
        if let Some(body_min) = body_min {
            for line in &lines[header_idx + 1..] {
                if line.trim().is_empty() {
                    out.push(String::new());
                    continue;
                }
                let depth = indentation_of(line).len().saturating_sub(body_min) + unit;
                out.push(format!("{}{}", " ".repeat(depth), line.trim_start()));
            }
        }
        normalize_trailing_newline(out.join("\n"))
    }

    fn has_decorator(code: &str, marker: &str) -> bool {
        code.lines().any(|l| l.trim() == marker)
    }

    fn format_getter(&self, code: &str) -> String {
        let block = self.format_def_block(code);
        if Self::has_decorator(&block, "@property") {
            block
        } else {
            normalize_trailing_newline(format!("@property\n{block}"))
        }
    }

    fn format_setter(&self, code: &str) -> String {
        let block = self.format_def_block(code);
        let name = Regex::new(r"def\s+(\w+)")
            .ok()
            .and_then(|re| re.captures(&block).map(|c| c[1].to_string()));
        match name {
            Some(name) if !Self::has_decorator(&block, &format!("@{name}.setter")) => {
                normalize_trailing_newline(format!("@{name}.setter\n{block}"))
            }
            _ => block,
        }
    }

    fn format_import(&self, code: &str) -> String {
        let stripped: Vec<&str> = code
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        normalize_trailing_newline(stripped.join("\n"))
    }
}

impl Default for PythonFormatter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl CodeFormatter for PythonFormatter {
    fn indent_unit(&self) -> String {
        self.inner.indent_unit()
    }

    fn indent_size(&self) -> usize {
        self.inner.indent_size()
    }

    fn format_block(&self, code: &str) -> String {
        self.inner.format_block(code)
    }

    fn format_element(&self, kind: ElementKind, code: &str) -> String {
        match kind {
            ElementKind::PropertyGetter => self.format_getter(code),
            ElementKind::PropertySetter => self.format_setter(code),
            ElementKind::Import => self.format_import(code),
            ElementKind::Function | ElementKind::Method | ElementKind::Class => {
                self.format_def_block(code)
            }
            _ => self.inner.format_block(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_rebased_to_one_unit() {
        let f = PythonFormatter::default();
        // Body sliced out of a class keeps absolute indentation.
        let out = f.format_element(ElementKind::Method, "def m(self):\n        return 1");
        assert_eq!(out, "def m(self):\n    return 1\n");
    }

    #[test]
    fn relative_body_structure_is_preserved() {
        let f = PythonFormatter::default();
        let out = f.format_element(
            ElementKind::Method,
            "def m(self):\n        if x:\n            y()",
        );
        assert_eq!(out, "def m(self):\n    if x:\n        y()\n");
    }

    #[test]
    fn decorated_member_content_is_reanchored() {
        let f = PythonFormatter::default();
        let out = f.format_element(
            ElementKind::PropertyGetter,
            "@property\n    def x(self):\n        return self._x",
        );
        assert_eq!(out, "@property\ndef x(self):\n    return self._x\n");
    }

    #[test]
    fn getter_gains_property_decorator() {
        let f = PythonFormatter::default();
        let out = f.format_element(
            ElementKind::PropertyGetter,
            "def x(self):\n    return self._x",
        );
        assert!(out.starts_with("@property\n"));
    }

    #[test]
    fn setter_gains_named_marker() {
        let f = PythonFormatter::default();
        let out = f.format_element(
            ElementKind::PropertySetter,
            "def x(self, v):\n    self._x = v",
        );
        assert!(out.starts_with("@x.setter\n"));
    }

    #[test]
    fn class_body_members_keep_depth() {
        let f = PythonFormatter::default();
        let out = f.format_element(
            ElementKind::Class,
            "class C:\n    def m(self):\n        return 1",
        );
        assert_eq!(out, "class C:\n    def m(self):\n        return 1\n");
    }
}
