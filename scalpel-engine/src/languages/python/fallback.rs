//! Regex fallbacks for Python extraction.
//!
//! Used when a query fails to compile for the active grammar version or
//! yields nothing. Ranges are approximated from indentation: a block ends
//! at the first following non-blank line indented at or below the
//! definition line.

use crate::engine::traits::ExtractionContext;
use crate::formatting::indentation_of;
use crate::languages::python::queries;
use crate::model::element::ElementKind;
use crate::model::raw::{RawDecorator, RawElement};
use crate::model::span::Span;
use regex::Regex;
use tracing::debug;

/// End line (1-based) of the indentation block opened at `start_idx`.
fn block_end_line(lines: &[&str], start_idx: usize) -> usize {
    let base = indentation_of(lines[start_idx]).len();
    let mut end = start_idx + 1;
    for (i, line) in lines.iter().enumerate().skip(start_idx + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if indentation_of(line).len() <= base {
            break;
        }
        end = i + 1;
    }
    end
}

/// Nearest `class <Name>` above `def_idx` with a smaller indent.
fn enclosing_class(lines: &[&str], def_idx: usize) -> Option<String> {
    let class_re = Regex::new(r"^class[ \t]+([A-Za-z_]\w*)").ok()?;
    let def_indent = indentation_of(lines[def_idx]).len();
    for i in (0..def_idx).rev() {
        let line = lines[i];
        if line.trim().is_empty() {
            continue;
        }
        let indent = indentation_of(line).len();
        if indent < def_indent {
            if let Some(cap) = class_re.captures(line.trim_start()) {
                return Some(cap[1].to_string());
            }
            // Some other statement opens this block; keep looking upward
            // for a shallower class.
            if indent == 0 {
                break;
            }
        }
    }
    None
}

/// Decorator lines directly above a definition line.
fn leading_decorators(lines: &[&str], def_idx: usize) -> (usize, Vec<RawDecorator>) {
    let mut start_idx = def_idx;
    let mut decorators = Vec::new();
    for i in (0..def_idx).rev() {
        let trimmed = lines[i].trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            start_idx = i;
            let name = rest
                .split('(')
                .next()
                .unwrap_or(rest)
                .trim()
                .to_string();
            decorators.insert(
                0,
                RawDecorator {
                    name,
                    content: trimmed.to_string(),
                    range: Span::lines(i + 1, i + 1),
                },
            );
        } else if !trimmed.is_empty() {
            break;
        }
    }
    (start_idx, decorators)
}

fn record_from_lines(
    lines: &[&str],
    kind: ElementKind,
    name: &str,
    start_idx: usize,
    def_idx: usize,
    end_line: usize,
) -> RawElement {
    let mut record = RawElement::new(kind, name, Span::lines(start_idx + 1, end_line));
    record.content = lines[start_idx..end_line].join("\n");
    record.definition_start_line = def_idx + 1;
    record.definition_start_col = indentation_of(lines[def_idx]).len();
    record
}

/// Regex-based callable extraction for one kind.
pub(crate) fn callables_by_regex(ctx: &ExtractionContext<'_>, kind: ElementKind) -> Vec<RawElement> {
    let pattern = match kind {
        ElementKind::Function => queries::FUNCTION_PATTERN,
        _ => queries::METHOD_PATTERN,
    };
    let Ok(re) = Regex::new(pattern) else {
        return Vec::new();
    };
    let def_re = Regex::new(r"(?:async[ \t]+)?def[ \t]+([A-Za-z_]\w*)").ok();
    let lines: Vec<&str> = ctx.code.lines().collect();
    let mut out = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !re.is_match(line) {
            continue;
        }
        let Some(name) = def_re
            .as_ref()
            .and_then(|r| r.captures(line))
            .map(|c| c[1].to_string())
        else {
            continue;
        };

        let class_name = enclosing_class(&lines, idx);
        let is_member = class_name.is_some();
        match kind {
            ElementKind::Function if is_member => continue,
            ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter
                if !is_member =>
            {
                continue;
            }
            _ => {}
        }
        if let Some(filter) = ctx.class_name {
            if class_name.as_deref() != Some(filter) {
                continue;
            }
        }

        let (start_idx, decorators) = leading_decorators(&lines, idx);
        match kind {
            ElementKind::PropertyGetter if !decorators.iter().any(|d| d.name == "property") => {
                continue;
            }
            ElementKind::PropertySetter
                if !decorators
                    .iter()
                    .any(|d| d.name == format!("{name}.setter")) =>
            {
                continue;
            }
            _ => {}
        }

        let end_line = block_end_line(&lines, idx);
        let mut record = record_from_lines(&lines, kind, &name, start_idx, idx, end_line);
        record.class_name = class_name;
        record.decorators = decorators;
        out.push(record);
    }
    debug!(%kind, count = out.len(), "python regex fallback");
    out
}

/// Regex-based import extraction.
pub(crate) fn imports_by_regex(ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
    let Ok(re) = Regex::new(queries::IMPORT_PATTERN) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for m in re.find_iter(ctx.code) {
        let line = ctx.code[..m.start()].bytes().filter(|&b| b == b'\n').count() + 1;
        let text = m.as_str().trim();
        let name = import_name_from_text(text);
        let mut record = RawElement::new(ElementKind::Import, name, Span::lines(line, line));
        record.content = text.to_string();
        out.push(record);
    }
    out
}

/// Best-effort module name of an import statement.
pub(crate) fn import_name_from_text(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("from ") {
        rest.split_whitespace().next().unwrap_or(rest).to_string()
    } else if let Some(rest) = trimmed.strip_prefix("import ") {
        rest.split(',')
            .next()
            .unwrap_or(rest)
            .split_whitespace()
            .next()
            .unwrap_or(rest)
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Regex-based class extraction.
pub(crate) fn classes_by_regex(ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
    let Ok(re) = Regex::new(queries::CLASS_PATTERN) else {
        return Vec::new();
    };
    let lines: Vec<&str> = ctx.code.lines().collect();
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let Some(cap) = re.captures(line) else {
            continue;
        };
        if !indentation_of(line).is_empty() {
            continue;
        }
        let name = cap[1].to_string();
        let (start_idx, decorators) = leading_decorators(&lines, idx);
        let end_line = block_end_line(&lines, idx);
        let mut record =
            record_from_lines(&lines, ElementKind::Class, &name, start_idx, idx, end_line);
        record.decorators = decorators;
        out.push(record);
    }
    out
}
