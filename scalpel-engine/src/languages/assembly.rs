//! Shared building blocks for language post-processors.
//!
//! Per-language post-processors orchestrate these helpers with their own
//! classification rules; the mechanics of import aggregation, child
//! synthesis, container attachment and specificity dedup are identical
//! across languages.

use crate::config::EngineConfig;
use crate::model::element::{CodeElement, ElementKind, IMPORTS_AGGREGATE_NAME};
use crate::model::raw::RawElement;
use crate::model::span::Span;
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::warn;

/// Collapse individual import records into the single synthetic
/// `imports` element spanning the first through last statement.
pub fn aggregate_imports(code: &str, imports: &[RawElement]) -> Option<CodeElement> {
    if imports.is_empty() {
        return None;
    }
    let mut sorted: Vec<&RawElement> = imports.iter().collect();
    sorted.sort_by_key(|r| (r.range.start_line, r.range.start_col));

    let range = sorted
        .iter()
        .map(|r| r.range)
        .reduce(|a, b| Span::merge(&a, &b))?;

    let lines: Vec<&str> = code.lines().collect();
    let start = range.start_line.saturating_sub(1);
    let end = range.end_line.min(lines.len());
    let content = if start < end {
        lines[start..end].join("\n")
    } else {
        String::new()
    };

    let mut element = CodeElement::new(ElementKind::Import, IMPORTS_AGGREGATE_NAME);
    element.content = content;
    element.range = range;
    element.additional_data.insert(
        "individual_imports".to_string(),
        Value::Array(
            sorted
                .iter()
                .map(|r| {
                    json!({
                        "name": r.name,
                        "content": r.content,
                        "start_line": r.range.start_line,
                        "end_line": r.range.end_line,
                    })
                })
                .collect(),
        ),
    );
    Some(element)
}

/// Build a `CodeElement` from a raw record, synthesizing decorator,
/// parameter and return-value children.
pub fn element_from_raw(raw: &RawElement, config: &EngineConfig) -> CodeElement {
    let mut element = CodeElement::new(raw.kind, raw.name.clone());
    element.content = raw.content.clone();
    element.range = raw.range;
    element.parent_name = raw.class_name.clone();
    element.value_type = raw.value_type.clone();
    element.additional_data = raw.additional_data.clone();

    let own_path = element.xpath();

    for decorator in &raw.decorators {
        let mut child = CodeElement::new(ElementKind::Decorator, decorator.name.clone());
        child.content = decorator.content.clone();
        child.range = decorator.range;
        child.parent_name = Some(own_path.clone());
        element.children.push(child);
    }

    let definition_span = Span::lines(raw.definition_start_line, raw.definition_start_line);

    if config.extract.extract_parameters {
        for parameter in &raw.parameters {
            let mut child = CodeElement::new(ElementKind::Parameter, parameter.name.clone());
            child.value_type = parameter.value_type.clone();
            child.range = parameter.span.unwrap_or(definition_span);
            child.content = parameter.name.clone();
            child.parent_name = Some(own_path.clone());
            if let Some(default) = &parameter.default_value {
                child
                    .additional_data
                    .insert("default".to_string(), Value::String(default.clone()));
            }
            if parameter.optional {
                child
                    .additional_data
                    .insert("optional".to_string(), Value::Bool(true));
            }
            element.children.push(child);
        }
    }

    if config.extract.extract_return_values
        && (raw.return_info.return_type.is_some() || !raw.return_info.return_values.is_empty())
    {
        let mut child = CodeElement::new(ElementKind::ReturnValue, "return");
        child.value_type = raw.return_info.return_type.clone();
        child.range = definition_span;
        child.parent_name = Some(own_path);
        if !raw.return_info.return_values.is_empty() {
            child.additional_data.insert(
                "return_values".to_string(),
                Value::Array(
                    raw.return_info
                        .return_values
                        .iter()
                        .map(|v| Value::String(v.clone()))
                        .collect(),
                ),
            );
        }
        element.children.push(child);
    }

    element
}

/// Keep the most specific record when several share the same container,
/// name and definition line (a getter also surfaces as a plain method,
/// and so on). Input order is preserved otherwise.
pub fn dedup_by_specificity(records: Vec<RawElement>) -> Vec<RawElement> {
    let mut best: HashMap<(Option<String>, String, usize), RawElement> = HashMap::new();
    let mut order: Vec<(Option<String>, String, usize)> = Vec::new();
    for record in records {
        let key = (
            record.class_name.clone(),
            record.name.clone(),
            record.definition_start_line,
        );
        let keep = match best.get(&key) {
            Some(existing) => existing.kind.specificity() < record.kind.specificity(),
            None => {
                order.push(key.clone());
                true
            }
        };
        if keep {
            best.insert(key, record);
        }
    }
    order.into_iter().filter_map(|k| best.remove(&k)).collect()
}

/// Find a container element by its dotted path.
pub fn find_container_mut<'a>(
    roots: &'a mut Vec<CodeElement>,
    path: &str,
) -> Option<&'a mut CodeElement> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = roots
        .iter_mut()
        .find(|e| e.kind.is_container() && e.name == first)?;
    for segment in segments {
        current = current
            .children
            .iter_mut()
            .find(|e| e.kind.is_container() && e.name == segment)?;
    }
    Some(current)
}

/// Attach a member element to its container; orphaned members are
/// dropped with a warning.
pub fn attach_member(roots: &mut Vec<CodeElement>, member: CodeElement) {
    let Some(parent_path) = member.parent_name.clone() else {
        warn!(name = %member.name, "member without a container; dropping");
        return;
    };
    match find_container_mut(roots, &parent_path) {
        Some(container) => container.children.push(member),
        None => warn!(
            name = %member.name,
            parent = %parent_path,
            "no matching container for member; dropping"
        ),
    }
}
