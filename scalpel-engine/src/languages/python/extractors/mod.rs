//! Python extractors, one per element kind.
//!
//! Shared helpers here resolve the wrapper/definition split (a
//! `decorated_definition` is the range node, the inner definition is the
//! identity node), decorator names, container chains, parameters and
//! return values. The per-kind extractors live in the sibling modules.

pub mod callables;
pub mod containers;
pub mod decorators;
pub mod imports;
pub mod properties;

pub use callables::{
    PythonFunctionExtractor, PythonGetterExtractor, PythonMethodExtractor, PythonSetterExtractor,
};
pub use containers::PythonClassExtractor;
pub use decorators::PythonDecoratorExtractor;
pub use imports::PythonImportExtractor;
pub use properties::{PythonPropertyExtractor, PythonStaticPropertyExtractor};

use crate::engine::ast::span_of;
use crate::engine::traits::ExtractionContext;
use crate::model::raw::{RawDecorator, RawParameter, RawReturnInfo};
use tree_sitter::Node;

/// The sentinel recorded for `return`, `return None` and friends.
pub(crate) const RETURN_NONE_SENTINEL: &str = "None";

/// The outermost wrapper of a definition (its range node): the enclosing
/// `decorated_definition` when present, else the definition itself.
pub(crate) fn range_node<'t>(def_node: Node<'t>) -> Node<'t> {
    match def_node.parent() {
        Some(p) if p.kind() == "decorated_definition" => p,
        _ => def_node,
    }
}

/// Decorators attached to a definition, in source order.
pub(crate) fn decorators_of(ctx: &ExtractionContext<'_>, def_node: Node<'_>) -> Vec<RawDecorator> {
    let wrapper = range_node(def_node);
    if wrapper == def_node {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut cursor = wrapper.walk();
    for child in wrapper.children(&mut cursor) {
        if child.kind() == "decorator" {
            out.push(RawDecorator {
                name: decorator_name(ctx, child),
                content: ctx.handler.node_text(child, ctx.code).to_string(),
                range: span_of(child),
            });
        }
    }
    out
}

/// Best-effort decorator name: identifier (`@foo`), attribute (`@a.b`),
/// call (`@foo(...)` keeps `foo`), raw text otherwise.
pub(crate) fn decorator_name(ctx: &ExtractionContext<'_>, decorator: Node<'_>) -> String {
    let expr = match decorator.named_child(0) {
        Some(e) => e,
        None => return ctx.handler.node_text(decorator, ctx.code).trim_start_matches('@').to_string(),
    };
    match expr.kind() {
        "identifier" | "attribute" => ctx.handler.node_text(expr, ctx.code).to_string(),
        "call" => expr
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

/// Nearest enclosing scope: a class or function definition, whichever
/// comes first walking upward. Definitions nested in a function body are
/// neither top-level functions nor methods.
pub(crate) fn nearest_scope<'t>(node: Node<'t>) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if matches!(n.kind(), "class_definition" | "function_definition") {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Dotted chain of enclosing class names, outermost first.
pub(crate) fn class_chain(ctx: &ExtractionContext<'_>, node: Node<'_>) -> Option<String> {
    let mut names: Vec<String> = Vec::new();
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "class_definition" {
            if let Some(name) = n.child_by_field_name("name") {
                names.push(ctx.handler.node_text(name, ctx.code).to_string());
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

/// Parameters of a function definition. Recognizes plain, typed, default,
/// typed-default and splat forms; drops the `self`/`cls` receiver when
/// `skip_receiver` is set.
pub(crate) fn parameters_of(
    ctx: &ExtractionContext<'_>,
    def_node: Node<'_>,
    skip_receiver: bool,
) -> Vec<RawParameter> {
    let Some(params) = def_node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for (index, child) in ctx.handler.named_children(params).into_iter().enumerate() {
        let param = match child.kind() {
            "identifier" => Some(RawParameter {
                name: ctx.handler.node_text(child, ctx.code).to_string(),
                span: Some(span_of(child)),
                ..RawParameter::default()
            }),
            "typed_parameter" => {
                let name = child
                    .named_child(0)
                    .map(|n| ctx.handler.node_text(n, ctx.code).to_string())
                    .unwrap_or_default();
                Some(RawParameter {
                    name,
                    value_type: child
                        .child_by_field_name("type")
                        .map(|t| ctx.handler.node_text(t, ctx.code).to_string()),
                    span: Some(span_of(child)),
                    ..RawParameter::default()
                })
            }
            "default_parameter" => Some(RawParameter {
                name: child
                    .child_by_field_name("name")
                    .map(|n| ctx.handler.node_text(n, ctx.code).to_string())
                    .unwrap_or_default(),
                default_value: child
                    .child_by_field_name("value")
                    .map(|v| ctx.handler.node_text(v, ctx.code).to_string()),
                optional: true,
                span: Some(span_of(child)),
                ..RawParameter::default()
            }),
            "typed_default_parameter" => Some(RawParameter {
                name: child
                    .child_by_field_name("name")
                    .map(|n| ctx.handler.node_text(n, ctx.code).to_string())
                    .unwrap_or_default(),
                value_type: child
                    .child_by_field_name("type")
                    .map(|t| ctx.handler.node_text(t, ctx.code).to_string()),
                default_value: child
                    .child_by_field_name("value")
                    .map(|v| ctx.handler.node_text(v, ctx.code).to_string()),
                optional: true,
                span: Some(span_of(child)),
                ..RawParameter::default()
            }),
            "list_splat_pattern" | "dictionary_splat_pattern" => Some(RawParameter {
                name: ctx.handler.node_text(child, ctx.code).to_string(),
                span: Some(span_of(child)),
                ..RawParameter::default()
            }),
            _ => None,
        };
        if let Some(param) = param {
            if skip_receiver && index == 0 && matches!(param.name.as_str(), "self" | "cls") {
                continue;
            }
            if !param.name.is_empty() {
                out.push(param);
            }
        }
    }
    out
}

/// Return info of a function definition: the annotated return type plus
/// the distinct returned expressions of the immediate body (nested
/// definitions excluded). Bare `return` and `return None` coalesce into
/// one sentinel entry.
pub(crate) fn return_info_of(ctx: &ExtractionContext<'_>, def_node: Node<'_>) -> RawReturnInfo {
    let return_type = def_node
        .child_by_field_name("return_type")
        .map(|t| ctx.handler.node_text(t, ctx.code).to_string());

    let mut values: Vec<String> = Vec::new();
    if let Some(body) = def_node.child_by_field_name("body") {
        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            if node.kind() == "return_statement" {
                let value = node
                    .named_child(0)
                    .map(|v| ctx.handler.node_text(v, ctx.code).to_string())
                    .filter(|t| t != "None")
                    .unwrap_or_else(|| RETURN_NONE_SENTINEL.to_string());
                if !values.contains(&value) {
                    values.push(value);
                }
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            for child in children.into_iter().rev() {
                if !matches!(child.kind(), "function_definition" | "class_definition") {
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

/// Dedup guard: captures may arrive multiple times for the same node.
pub(crate) struct ProcessedNodes(std::collections::HashSet<usize>);

impl ProcessedNodes {
    pub(crate) fn new() -> Self {
        Self(std::collections::HashSet::new())
    }

    /// True the first time a node id is seen.
    pub(crate) fn insert(&mut self, node: Node<'_>) -> bool {
        self.0.insert(node.id())
    }
}
