//! TypeScript extractors, one per element kind.
//!
//! Shared helpers resolve the export/ambient wrapper (the range node vs.
//! the inner definition), decorator lists, container chains, parameters
//! and return values.

pub mod callables;
pub mod containers;
pub mod declarations;
pub mod decorators;
pub mod imports;
pub mod properties;

pub use callables::{
    TypeScriptFunctionExtractor, TypeScriptGetterExtractor, TypeScriptMethodExtractor,
    TypeScriptSetterExtractor,
};
pub use containers::{TypeScriptClassExtractor, TypeScriptInterfaceExtractor};
pub use declarations::{
    TypeScriptEnumExtractor, TypeScriptNamespaceExtractor, TypeScriptTypeAliasExtractor,
};
pub use decorators::TypeScriptDecoratorExtractor;
pub use imports::TypeScriptImportExtractor;
pub use properties::{TypeScriptPropertyExtractor, TypeScriptStaticPropertyExtractor};

use crate::engine::ast::span_of;
use crate::engine::traits::ExtractionContext;
use crate::model::raw::{RawDecorator, RawParameter, RawReturnInfo};
use tree_sitter::Node;

/// The sentinel recorded for `return;`, `return null` and
/// `return undefined`.
pub(crate) const RETURN_NULL_SENTINEL: &str = "null";

pub(crate) const CONTAINER_KINDS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
    "internal_module",
    "module",
    "enum_declaration",
];

pub(crate) const CLASS_LIKE_KINDS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
];

/// The outermost wrapper of a definition: enclosing `export_statement` /
/// `ambient_declaration` chains are part of the reported range.
pub(crate) fn range_node<'t>(def_node: Node<'t>) -> Node<'t> {
    let mut current = def_node;
    while let Some(parent) = current.parent() {
        if matches!(parent.kind(), "export_statement" | "ambient_declaration") {
            current = parent;
        } else {
            break;
        }
    }
    current
}

/// Decorators attached to a definition, in source order. Grammar
/// versions differ on whether member decorators are children of the
/// definition or preceding siblings in the class body, so both shapes
/// are accepted.
pub(crate) fn decorators_of(ctx: &ExtractionContext<'_>, node: Node<'_>) -> Vec<RawDecorator> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut prev = node.prev_named_sibling();
    while let Some(p) = prev {
        if p.kind() != "decorator" {
            break;
        }
        nodes.push(p);
        prev = p.prev_named_sibling();
    }
    nodes.reverse();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "decorator" {
            nodes.push(child);
        }
    }
    nodes
        .into_iter()
        .map(|n| RawDecorator {
            name: decorator_name(ctx, n),
            content: ctx.handler.node_text(n, ctx.code).to_string(),
            range: span_of(n),
        })
        .collect()
}

/// Extend a record's span/content backwards over sibling decorators that
/// sit above the definition. No-op when decorators already lie inside
/// the span.
pub(crate) fn include_decorators(
    code: &str,
    span: crate::model::span::Span,
    decorators: &[RawDecorator],
) -> (crate::model::span::Span, Option<String>) {
    let Some(first) = decorators.first() else {
        return (span, None);
    };
    if first.range.start_byte >= span.start_byte {
        return (span, None);
    }
    let mut extended = span;
    extended.start_line = first.range.start_line;
    extended.start_col = first.range.start_col;
    extended.start_byte = first.range.start_byte;
    let content = code
        .get(extended.start_byte..extended.end_byte)
        .map(|s| s.to_string());
    (extended, content)
}

/// Best-effort decorator name: identifier, member expression, or the
/// callee of a call form; raw text otherwise.
pub(crate) fn decorator_name(ctx: &ExtractionContext<'_>, decorator: Node<'_>) -> String {
    let Some(expr) = decorator.named_child(0) else {
        return ctx
            .handler
            .node_text(decorator, ctx.code)
            .trim_start_matches('@')
            .to_string();
    };
    match expr.kind() {
        "identifier" | "member_expression" => ctx.handler.node_text(expr, ctx.code).to_string(),
        "call_expression" => expr
            .child_by_field_name("function")
            .map(|f| ctx.handler.node_text(f, ctx.code).to_string())
            .unwrap_or_else(|| ctx.handler.node_text(expr, ctx.code).to_string()),
        _ => ctx
            .handler
            .node_text(decorator, ctx.code)
            .trim_start_matches('@')
            .to_string(),
    }
}

/// Name of a container node; module string names lose their quotes.
pub(crate) fn container_name(ctx: &ExtractionContext<'_>, node: Node<'_>) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    let text = ctx.handler.node_text(name_node, ctx.code);
    Some(text.trim_matches(['\'', '"']).to_string())
}

/// Dotted chain of enclosing container names, outermost first.
pub(crate) fn container_chain(ctx: &ExtractionContext<'_>, node: Node<'_>) -> Option<String> {
    let mut names: Vec<String> = Vec::new();
    let mut current = node.parent();
    while let Some(n) = current {
        if CONTAINER_KINDS.contains(&n.kind()) {
            if let Some(name) = container_name(ctx, n) {
                names.push(name);
            }
        }
        current = n.parent();
    }
    if names.is_empty() {
        None
    } else {
        names.reverse();
        Some(names.join("."))
    }
}

/// Whether any enclosing container is a class or interface.
pub(crate) fn inside_class_like(node: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if CLASS_LIKE_KINDS.contains(&n.kind()) {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Whether the definition is nested inside another callable body.
pub(crate) fn inside_callable(node: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        match n.kind() {
            "function_declaration"
            | "generator_function_declaration"
            | "method_definition"
            | "arrow_function"
            | "function_expression" => return true,
            k if CLASS_LIKE_KINDS.contains(&k) => return false,
            _ => {}
        }
        current = n.parent();
    }
    false
}

/// Unnamed keyword children of a definition (`static`, `get`, `set`,
/// `async`, `readonly`, ...).
pub(crate) fn keyword_children(ctx: &ExtractionContext<'_>, node: Node<'_>) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.is_named() {
            out.push(ctx.handler.node_text(child, ctx.code).to_string());
        }
    }
    out
}

/// Strip the leading colon of a `type_annotation` slice.
pub(crate) fn annotation_text(ctx: &ExtractionContext<'_>, node: Node<'_>) -> String {
    ctx.handler
        .node_text(node, ctx.code)
        .trim_start_matches(':')
        .trim()
        .to_string()
}

/// Parameters of a callable's `formal_parameters`.
pub(crate) fn parameters_of(ctx: &ExtractionContext<'_>, callable: Node<'_>) -> Vec<RawParameter> {
    let Some(params) = callable.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for child in ctx.handler.named_children(params) {
        match child.kind() {
            "required_parameter" | "optional_parameter" => {
                let Some(pattern) = child.child_by_field_name("pattern") else {
                    continue;
                };
                let name = ctx.handler.node_text(pattern, ctx.code).to_string();
                if name.is_empty() {
                    continue;
                }
                out.push(RawParameter {
                    name,
                    value_type: child
                        .child_by_field_name("type")
                        .map(|t| annotation_text(ctx, t)),
                    default_value: child
                        .child_by_field_name("value")
                        .map(|v| ctx.handler.node_text(v, ctx.code).to_string()),
                    optional: child.kind() == "optional_parameter"
                        || child.child_by_field_name("value").is_some(),
                    span: Some(span_of(child)),
                });
            }
            // Bare identifier parameters (single-arg arrow functions).
            "identifier" => out.push(RawParameter {
                name: ctx.handler.node_text(child, ctx.code).to_string(),
                span: Some(span_of(child)),
                ..RawParameter::default()
            }),
            _ => {}
        }
    }
    out
}

/// Return info: annotated return type plus distinct returned expressions
/// of the immediate body (nested callables excluded).
pub(crate) fn return_info_of(ctx: &ExtractionContext<'_>, callable: Node<'_>) -> RawReturnInfo {
    let return_type = callable
        .child_by_field_name("return_type")
        .map(|t| annotation_text(ctx, t));

    let mut values: Vec<String> = Vec::new();
    if let Some(body) = callable.child_by_field_name("body") {
        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            if node.kind() == "return_statement" {
                let value = node
                    .named_child(0)
                    .map(|v| ctx.handler.node_text(v, ctx.code).to_string())
                    .filter(|t| t != "null" && t != "undefined")
                    .unwrap_or_else(|| RETURN_NULL_SENTINEL.to_string());
                if !values.contains(&value) {
                    values.push(value);
                }
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            for child in children.into_iter().rev() {
                if !matches!(
                    child.kind(),
                    "function_declaration"
                        | "generator_function_declaration"
                        | "function_expression"
                        | "arrow_function"
                        | "method_definition"
                        | "class_declaration"
                ) {
                    stack.push(child);
                }
            }
        }
    }
    RawReturnInfo {
        return_type,
        return_values: values,
    }
}

/// Dedup guard shared by the query-based extractors.
pub(crate) struct ProcessedNodes(std::collections::HashSet<usize>);

impl ProcessedNodes {
    pub(crate) fn new() -> Self {
        Self(std::collections::HashSet::new())
    }

    pub(crate) fn insert(&mut self, node: Node<'_>) -> bool {
        self.0.insert(node.id())
    }
}
