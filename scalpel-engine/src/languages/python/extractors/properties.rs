//! Class-level and instance-level property extraction for Python.
//!
//! Both extractors are walk-based (`custom_extract`): queries buy nothing
//! over a direct scan of class bodies.
//!
//! - static properties: simple or annotated assignments that are direct
//!   statements of a class body;
//! - instance properties: assignments to `self.<name>` inside a
//!   constructor-like method (`__init__`).
//!
//! Private/dunder names are skipped unless configured otherwise.

use super::class_chain;
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::python::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use serde_json::Value;
use tree_sitter::Node;

fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

fn class_nodes<'t>(root: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "class_definition" {
            out.push(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    out
}

fn container_path(ctx: &ExtractionContext<'_>, class_node: Node<'_>) -> Option<String> {
    let name = ctx
        .handler
        .node_text(class_node.child_by_field_name("name")?, ctx.code)
        .to_string();
    Some(match class_chain(ctx, class_node) {
        Some(outer) => format!("{outer}.{name}"),
        None => name,
    })
}

fn class_filter_matches(ctx: &ExtractionContext<'_>, container: &str) -> bool {
    ctx.class_name
        .is_none_or(|f| container == f || container.rsplit('.').next() == Some(f))
}

/// Class variables: direct `name = value` / `name: T = value` statements
/// of a class body.
pub struct PythonStaticPropertyExtractor {
    descriptor: ElementDescriptor,
}

impl PythonStaticPropertyExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::StaticProperty)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for PythonStaticPropertyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for PythonStaticPropertyExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::StaticProperty
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let mut out = Vec::new();
        for class_node in class_nodes(ctx.tree.root_node()) {
            let Some(container) = container_path(ctx, class_node) else {
                continue;
            };
            if !class_filter_matches(ctx, &container) {
                continue;
            }
            let Some(body) = class_node.child_by_field_name("body") else {
                continue;
            };
            for statement in ctx.handler.named_children(body) {
                if statement.kind() != "expression_statement" {
                    continue;
                }
                let Some(assignment) = statement.named_child(0) else {
                    continue;
                };
                if assignment.kind() != "assignment" {
                    continue;
                }
                let Some(left) = assignment.child_by_field_name("left") else {
                    continue;
                };
                if left.kind() != "identifier" {
                    continue;
                }
                let name = ctx.handler.node_text(left, ctx.code).to_string();
                if is_private(&name) && !ctx.config.extract.include_private_members {
                    continue;
                }
                let mut record =
                    RawElement::new(ElementKind::StaticProperty, name, span_of(statement));
                record.content = ctx.handler.node_text(statement, ctx.code).to_string();
                record.class_name = Some(container.clone());
                record.value_type = assignment
                    .child_by_field_name("type")
                    .map(|t| ctx.handler.node_text(t, ctx.code).to_string());
                if let Some(value) = assignment.child_by_field_name("right") {
                    record.additional_data.insert(
                        "value".to_string(),
                        Value::String(ctx.handler.node_text(value, ctx.code).to_string()),
                    );
                }
                record
                    .additional_data
                    .insert("is_static".to_string(), Value::Bool(true));
                out.push(record);
            }
        }
        out
    }
}

/// Instance attributes: `self.<name> = value` inside `__init__`.
pub struct PythonPropertyExtractor {
    descriptor: ElementDescriptor,
}

impl PythonPropertyExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Property)
                .expect("descriptor table entry"),
        }
    }

    fn constructor_of<'t>(
        ctx: &ExtractionContext<'_>,
        class_node: Node<'t>,
    ) -> Option<Node<'t>> {
        let body = class_node.child_by_field_name("body")?;
        for statement in ctx.handler.named_children(body) {
            let def = match statement.kind() {
                "function_definition" => Some(statement),
                "decorated_definition" => statement
                    .child_by_field_name("definition")
                    .filter(|d| d.kind() == "function_definition"),
                _ => None,
            };
            if let Some(def) = def {
                let name = def
                    .child_by_field_name("name")
                    .map(|n| ctx.handler.node_text(n, ctx.code))
                    .unwrap_or_default();
                if name == "__init__" {
                    return Some(def);
                }
            }
        }
        None
    }
}

impl Default for PythonPropertyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for PythonPropertyExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Property
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let mut out = Vec::new();
        for class_node in class_nodes(ctx.tree.root_node()) {
            let Some(container) = container_path(ctx, class_node) else {
                continue;
            };
            if !class_filter_matches(ctx, &container) {
                continue;
            }
            let Some(ctor) = Self::constructor_of(ctx, class_node) else {
                continue;
            };
            let Some(body) = ctor.child_by_field_name("body") else {
                continue;
            };
            let mut seen: Vec<String> = Vec::new();
            let mut stack = vec![body];
            while let Some(node) = stack.pop() {
                if node.kind() == "assignment" {
                    if let Some(record) =
                        instance_assignment(ctx, node, &container, &mut seen)
                    {
                        out.push(record);
                    }
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
        out
    }
}

fn instance_assignment(
    ctx: &ExtractionContext<'_>,
    assignment: Node<'_>,
    container: &str,
    seen: &mut Vec<String>,
) -> Option<RawElement> {
    let left = assignment.child_by_field_name("left")?;
    if left.kind() != "attribute" {
        return None;
    }
    let object = left.child_by_field_name("object")?;
    if object.kind() != "identifier" || ctx.handler.node_text(object, ctx.code) != "self" {
        return None;
    }
    let attribute = left.child_by_field_name("attribute")?;
    let name = ctx.handler.node_text(attribute, ctx.code).to_string();
    if is_private(&name) && !ctx.config.extract.include_private_members {
        return None;
    }
    if seen.contains(&name) {
        return None;
    }
    seen.push(name.clone());

    let mut record = RawElement::new(ElementKind::Property, name, span_of(assignment));
    record.content = ctx.handler.node_text(assignment, ctx.code).to_string();
    record.class_name = Some(container.to_string());
    record.value_type = assignment
        .child_by_field_name("type")
        .map(|t| ctx.handler.node_text(t, ctx.code).to_string());
    if let Some(value) = assignment.child_by_field_name("right") {
        record.additional_data.insert(
            "value".to_string(),
            Value::String(ctx.handler.node_text(value, ctx.code).to_string()),
        );
    }
    Some(record)
}
