//! Python manipulators: format-preserving upsert/remove/add per kind.
//!
//! One value per element kind, all sharing the same machinery:
//! 1. locate the target through the extraction service;
//! 2. sweep decorators/comments above it into the replacement window;
//! 3. format the new element at the inferred indent level;
//! 4. splice lines, never leaving a partial edit behind.
//!
//! Insertion points: imports below the module docstring or at the top,
//! top-level definitions at end of file, members at the end of their
//! container body (replacing a lone `pass` placeholder).

use crate::engine::edit::{
    insert_after_line, last_nonblank_line, line_indentation, replace_lines, sweep_start_line,
    tidy_after_removal, window_marker_prefix,
};
use crate::engine::traits::{ElementManipulator, ManipulationContext};
use crate::formatting::normalize_trailing_newline;
use crate::model::element::{ElementKind, IMPORTS_AGGREGATE_NAME};
use tracing::{debug, warn};

const COMMENT_MARKERS: &[&str] = &["#"];
const DECORATOR_MARKERS: &[&str] = &["@"];

pub struct PythonManipulator {
    kind: ElementKind,
}

impl PythonManipulator {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind }
    }

    /// Split a dotted parent path into the class leaf and its own parent.
    fn split_parent(parent: &str) -> (Option<&str>, &str) {
        match parent.rsplit_once('.') {
            Some((prefix, leaf)) => (Some(prefix), leaf),
            None => (None, parent),
        }
    }

    fn find_class(
        ctx: &ManipulationContext<'_>,
        code: &str,
        parent: &str,
    ) -> Option<(usize, usize)> {
        let (outer, leaf) = Self::split_parent(parent);
        ctx.extraction
            .find_element(code, ElementKind::Class, Some(leaf), outer)
    }

    fn replace(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        start: usize,
        end: usize,
        new_code: &str,
    ) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let adjusted = sweep_start_line(&lines, start, DECORATOR_MARKERS, COMMENT_MARKERS);

        // Decorator/comment lines leading the window (the range itself
        // includes attached decorators). A replacement that carries no
        // decorators of its own keeps them.
        let preserved = window_marker_prefix(&lines, adjusted, end, DECORATOR_MARKERS, COMMENT_MARKERS);

        let indent = line_indentation(&lines, adjusted).to_string();
        let formatted = ctx.formatter.format_element(self.kind, new_code);
        let mut block = ctx.formatter.apply_indent(&formatted, &indent);

        let brings_decorators = formatted
            .lines()
            .any(|l| l.trim_start().starts_with('@'));
        if !preserved.is_empty() && !brings_decorators {
            block = format!("{}\n{}", preserved.join("\n"), block);
        }
        replace_lines(code, adjusted, end, &block)
    }

    fn add_import(&self, ctx: &ManipulationContext<'_>, code: &str, new_code: &str) -> String {
        let formatted = ctx.formatter.format_element(ElementKind::Import, new_code);
        let formatted = formatted.trim_end_matches('\n');

        if let Some((_, last)) = ctx.extraction.imports_range(code) {
            return insert_after_line(code, last, formatted);
        }

        let lines: Vec<&str> = code.lines().collect();
        let after = module_docstring_end(&lines);
        let mut content: Vec<&str> = Vec::new();
        if after > 0 {
            content.push("");
        }
        content.extend(formatted.lines());
        let next_is_code = lines
            .get(after)
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false);
        if next_is_code {
            content.push("");
        }
        insert_after_line(code, after, &content.join("\n"))
    }

    fn add_top_level(&self, ctx: &ManipulationContext<'_>, code: &str, new_code: &str) -> String {
        let formatted = ctx.formatter.format_element(self.kind, new_code);
        let lines: Vec<&str> = code.lines().collect();
        let last = last_nonblank_line(&lines);
        if last == 0 {
            return normalize_trailing_newline(formatted);
        }
        let mut kept: Vec<&str> = lines[..last].to_vec();
        kept.push("");
        kept.extend(formatted.trim_end_matches('\n').lines());
        normalize_trailing_newline(kept.join("\n"))
    }

    fn add_member(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        new_code: &str,
        parent: &str,
    ) -> String {
        let Some((class_start, class_end)) = Self::find_class(ctx, code, parent) else {
            warn!(parent, "container not found; cannot add member");
            return code.to_string();
        };
        let lines: Vec<&str> = code.lines().collect();
        let base = format!(
            "{}{}",
            line_indentation(&lines, class_start),
            ctx.formatter.indent_unit()
        );
        let formatted = ctx.formatter.format_element(self.kind, new_code);
        let block = ctx.formatter.apply_indent(&formatted, &base);

        // A placeholder-only body is replaced by the first real member.
        let body_lines: Vec<usize> = (class_start + 1..=class_end)
            .filter(|&n| {
                lines
                    .get(n - 1)
                    .map(|l| !l.trim().is_empty())
                    .unwrap_or(false)
            })
            .collect();
        if let [only] = body_lines.as_slice() {
            if lines[only - 1].trim() == "pass" {
                return replace_lines(code, *only, *only, &block);
            }
        }

        let prev_nonblank = lines
            .get(class_end - 1)
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false);
        let content = if prev_nonblank {
            format!("\n{block}")
        } else {
            block
        };
        insert_after_line(code, class_end, &content)
    }

    /// Replace the whole import block (the reserved `imports` address).
    fn replace_imports(&self, ctx: &ManipulationContext<'_>, code: &str, new_code: &str) -> String {
        match ctx.extraction.imports_range(code) {
            Some((first, last)) => {
                let formatted = ctx.formatter.format_element(ElementKind::Import, new_code);
                replace_lines(code, first, last, formatted.trim_end_matches('\n'))
            }
            None => self.add_import(ctx, code, new_code),
        }
    }
}

impl ElementManipulator for PythonManipulator {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn upsert(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        name: &str,
        new_code: &str,
        parent: Option<&str>,
    ) -> String {
        if self.kind == ElementKind::Import && name == IMPORTS_AGGREGATE_NAME {
            return self.replace_imports(ctx, code, new_code);
        }
        match ctx.extraction.find_element(code, self.kind, Some(name), parent) {
            Some((start, end)) => {
                debug!(kind = %self.kind, name, start, end, "replacing element");
                self.replace(ctx, code, start, end, new_code)
            }
            None => {
                let can_add = parent.is_some()
                    || matches!(
                        self.kind,
                        ElementKind::Function | ElementKind::Class | ElementKind::Import
                    );
                if can_add {
                    debug!(kind = %self.kind, name, "target missing; adding instead");
                    self.add(ctx, code, new_code, parent)
                } else {
                    warn!(
                        kind = %self.kind,
                        name,
                        "target missing and insertion needs a parent; source unchanged"
                    );
                    code.to_string()
                }
            }
        }
    }

    fn add(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        new_code: &str,
        parent: Option<&str>,
    ) -> String {
        match (self.kind, parent) {
            (ElementKind::Import, _) => self.add_import(ctx, code, new_code),
            (_, Some(parent)) => self.add_member(ctx, code, new_code, parent),
            (ElementKind::Function | ElementKind::Class, None) => {
                self.add_top_level(ctx, code, new_code)
            }
            _ => {
                warn!(kind = %self.kind, "cannot add without a parent; source unchanged");
                code.to_string()
            }
        }
    }

    fn remove(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        name: &str,
        parent: Option<&str>,
    ) -> String {
        if self.kind == ElementKind::Import && name == IMPORTS_AGGREGATE_NAME {
            if let Some((first, last)) = ctx.extraction.imports_range(code) {
                return tidy_after_removal(replace_lines(code, first, last, ""), first);
            }
            return code.to_string();
        }
        match ctx.extraction.find_element(code, self.kind, Some(name), parent) {
            Some((start, end)) => {
                let lines: Vec<&str> = code.lines().collect();
                let adjusted = sweep_start_line(&lines, start, DECORATOR_MARKERS, COMMENT_MARKERS);
                tidy_after_removal(replace_lines(code, adjusted, end, ""), adjusted)
            }
            None => {
                debug!(kind = %self.kind, name, "target missing; nothing to remove");
                code.to_string()
            }
        }
    }
}

/// Find the last line of a leading module docstring, 0 when absent.
fn module_docstring_end(lines: &[&str]) -> usize {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let Some(idx) = first else { return 0 };
    let trimmed = lines[idx].trim();
    let delimiter = if trimmed.starts_with("\"\"\"") {
        "\"\"\""
    } else if trimmed.starts_with("'''") {
        "'''"
    } else {
        return 0;
    };
    // One-line docstring.
    if trimmed.len() >= 6 && trimmed.ends_with(delimiter) {
        return idx + 1;
    }
    for (offset, line) in lines.iter().enumerate().skip(idx + 1) {
        if line.contains(delimiter) {
            return offset + 1;
        }
    }
    0
}

