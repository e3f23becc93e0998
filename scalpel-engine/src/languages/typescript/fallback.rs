//! Regex fallbacks for TypeScript extraction.
//!
//! Activated when a query fails to compile for the active grammar or
//! yields nothing. Ranges are approximated by brace matching from the
//! declaration line.

use crate::engine::traits::ExtractionContext;
use crate::languages::typescript::queries;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use crate::model::span::Span;
use regex::Regex;
use tracing::debug;

/// End line (1-based) of the brace block opening at `start_idx`, or the
/// statement line itself when no brace opens.
fn block_end_line(lines: &[&str], start_idx: usize) -> usize {
    let mut depth = 0i32;
    let mut opened = false;
    for (i, line) in lines.iter().enumerate().skip(start_idx) {
        for c in line.chars() {
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        if opened && depth <= 0 {
            return i + 1;
        }
    }
    if opened { lines.len() } else { start_idx + 1 }
}

fn records_from_pattern(
    ctx: &ExtractionContext<'_>,
    pattern: &str,
    kind: ElementKind,
) -> Vec<RawElement> {
    let Ok(re) = Regex::new(pattern) else {
        return Vec::new();
    };
    let lines: Vec<&str> = ctx.code.lines().collect();
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let Some(cap) = re.captures(line) else {
            continue;
        };
        let Some(name) = cap.get(1).map(|m| m.as_str().trim_matches(['\'', '"'])) else {
            continue;
        };
        let end_line = block_end_line(&lines, idx);
        let mut record = RawElement::new(kind, name, Span::lines(idx + 1, end_line));
        record.content = lines[idx..end_line].join("\n");
        out.push(record);
    }
    debug!(%kind, count = out.len(), "typescript regex fallback");
    out
}

pub(crate) fn imports_by_regex(ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
    let Ok(re) = Regex::new(queries::IMPORT_PATTERN) else {
        return Vec::new();
    };
    let Ok(source_re) = Regex::new(r#"['"]([^'"]+)['"]"#) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for m in re.find_iter(ctx.code) {
        let line = ctx.code[..m.start()].bytes().filter(|&b| b == b'\n').count() + 1;
        let text = m.as_str().trim();
        let name = source_re
            .captures(text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| text.to_string());
        let mut record = RawElement::new(ElementKind::Import, name, Span::lines(line, line));
        record.content = text.to_string();
        out.push(record);
    }
    out
}

pub(crate) fn functions_by_regex(ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
    let mut out = records_from_pattern(ctx, queries::FUNCTION_PATTERN, ElementKind::Function);
    out.extend(records_from_pattern(
        ctx,
        queries::ARROW_FUNCTION_PATTERN,
        ElementKind::Function,
    ));
    out
}

pub(crate) fn containers_by_regex(
    ctx: &ExtractionContext<'_>,
    kind: ElementKind,
) -> Vec<RawElement> {
    let pattern = match kind {
        ElementKind::Interface => queries::INTERFACE_PATTERN,
        ElementKind::Enum => queries::ENUM_PATTERN,
        ElementKind::TypeAlias => queries::TYPE_ALIAS_PATTERN,
        ElementKind::Namespace => queries::NAMESPACE_PATTERN,
        _ => queries::CLASS_PATTERN,
    };
    records_from_pattern(ctx, pattern, kind)
}
