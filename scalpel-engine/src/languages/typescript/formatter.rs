//! TypeScript-specific formatter: the brace-based block formatter plus a
//! small import hook.

use crate::formatting::{BraceFormatter, CodeFormatter, normalize_trailing_newline};
use crate::model::element::ElementKind;

pub struct TypeScriptFormatter {
    inner: BraceFormatter,
}

impl TypeScriptFormatter {
    pub fn new(indent_size: usize) -> Self {
        Self {
            inner: BraceFormatter::new(indent_size),
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

impl Default for TypeScriptFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CodeFormatter for TypeScriptFormatter {
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
            ElementKind::Import => self.format_import(code),
            _ => self.inner.format_block(code),
        }
    }
}
