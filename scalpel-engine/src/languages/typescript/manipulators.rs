//! TypeScript manipulators: format-preserving upsert/remove/add per kind.
//!
//! Same machinery as the Python manipulators with brace-language
//! placement: members land before the container's closing brace,
//! top-level declarations at end of file, imports below the last import
//! or at the top.

use crate::engine::edit::{
    insert_after_line, last_nonblank_line, line_indentation, replace_lines, sweep_start_line,
    tidy_after_removal, window_marker_prefix,
};
use crate::engine::traits::{ElementManipulator, ManipulationContext};
use crate::formatting::normalize_trailing_newline;
use crate::model::element::{ElementKind, IMPORTS_AGGREGATE_NAME};
use tracing::{debug, warn};

const COMMENT_MARKERS: &[&str] = &["//", "/*", "*"];
const DECORATOR_MARKERS: &[&str] = &["@"];

/// Container kinds a member parent may resolve to, most common first.
const CONTAINER_KINDS: &[ElementKind] = &[
    ElementKind::Class,
    ElementKind::Interface,
    ElementKind::Namespace,
    ElementKind::Enum,
];

pub struct TypeScriptManipulator {
    kind: ElementKind,
}

impl TypeScriptManipulator {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind }
    }

    fn split_parent(parent: &str) -> (Option<&str>, &str) {
        match parent.rsplit_once('.') {
            Some((prefix, leaf)) => (Some(prefix), leaf),
            None => (None, parent),
        }
    }

    fn find_container(
        ctx: &ManipulationContext<'_>,
        code: &str,
        parent: &str,
    ) -> Option<(usize, usize)> {
        let (outer, leaf) = Self::split_parent(parent);
        CONTAINER_KINDS
            .iter()
            .find_map(|&kind| ctx.extraction.find_element(code, kind, Some(leaf), outer))
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

        // Decorator/comment lines leading the window; kept when the
        // replacement brings no decorators of its own.
        let preserved =
            window_marker_prefix(&lines, adjusted, end, DECORATOR_MARKERS, COMMENT_MARKERS);

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
        let mut content: Vec<&str> = formatted.lines().collect();
        let next_is_code = lines
            .first()
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false);
        if next_is_code {
            content.push("");
        }
        insert_after_line(code, 0, &content.join("\n"))
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
        let Some((container_start, container_end)) = Self::find_container(ctx, code, parent)
        else {
            warn!(parent, "container not found; cannot add member");
            return code.to_string();
        };
        let lines: Vec<&str> = code.lines().collect();
        let container_indent = line_indentation(&lines, container_start).to_string();
        let base = format!("{container_indent}{}", ctx.formatter.indent_unit());
        let formatted = ctx.formatter.format_element(self.kind, new_code);
        let block = ctx.formatter.apply_indent(&formatted, &base);

        if container_start == container_end {
            return self.expand_single_line_container(
                code,
                &lines,
                container_start,
                &container_indent,
                &block,
            );
        }

        // Members go right before the closing delimiter.
        let prev_nonblank = lines
            .get(container_end.saturating_sub(2))
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false);
        let content = if prev_nonblank && container_end - container_start > 1 {
            format!("\n{block}")
        } else {
            block
        };
        insert_after_line(code, container_end - 1, &content)
    }

    /// Expand `class K {}` so the new member gets its own body lines. A
    /// single-line container that already has members is left untouched.
    fn expand_single_line_container(
        &self,
        code: &str,
        lines: &[&str],
        container_line: usize,
        container_indent: &str,
        block: &str,
    ) -> String {
        let line = lines[container_line - 1];
        let Some(open) = line.find('{') else {
            warn!(container_line, "no body delimiter on container line");
            return code.to_string();
        };
        let Some(close) = line.rfind('}') else {
            warn!(container_line, "unterminated single-line container");
            return code.to_string();
        };
        if !line[open + 1..close].trim().is_empty() {
            warn!(
                container_line,
                "single-line container already has members; not expanding"
            );
            return code.to_string();
        }
        let head = line[..open + 1].trim_end();
        let tail = &line[close..];
        let replacement = format!("{head}\n{block}\n{container_indent}{tail}");
        replace_lines(code, container_line, container_line, &replacement)
    }

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

impl ElementManipulator for TypeScriptManipulator {
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
                        ElementKind::Function
                            | ElementKind::Class
                            | ElementKind::Interface
                            | ElementKind::Enum
                            | ElementKind::TypeAlias
                            | ElementKind::Namespace
                            | ElementKind::Import
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
            (
                ElementKind::Function
                | ElementKind::Class
                | ElementKind::Interface
                | ElementKind::Enum
                | ElementKind::TypeAlias
                | ElementKind::Namespace,
                None,
            ) => self.add_top_level(ctx, code, new_code),
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

