//! Field and property-signature extraction for TypeScript.
//!
//! Walk-based: class bodies yield `public_field_definition` members
//! (static or instance), interface bodies yield `property_signature`
//! members. Constructor assignments to `this.<name>` count as instance
//! properties when no field declares them.

use super::{CLASS_LIKE_KINDS, annotation_text, container_chain, container_name, decorators_of, keyword_children};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::typescript::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use serde_json::Value;
use tree_sitter::Node;

fn is_private_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('#')
}

fn class_like_nodes<'t>(root: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if CLASS_LIKE_KINDS.contains(&node.kind()) {
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

fn qualified_path(ctx: &ExtractionContext<'_>, node: Node<'_>) -> Option<String> {
    let name = container_name(ctx, node)?;
    Some(match container_chain(ctx, node) {
        Some(outer) => format!("{outer}.{name}"),
        None => name,
    })
}

fn filter_matches(ctx: &ExtractionContext<'_>, container: &str) -> bool {
    ctx.class_name
        .is_none_or(|f| container == f || container.rsplit('.').next() == Some(f))
}

fn field_record(
    ctx: &ExtractionContext<'_>,
    field: Node<'_>,
    container: &str,
    kind: ElementKind,
) -> Option<RawElement> {
    let name_node = field.child_by_field_name("name")?;
    let name = ctx.handler.node_text(name_node, ctx.code).to_string();
    if is_private_name(&name) && !ctx.config.extract.include_private_members {
        return None;
    }
    let decorators = decorators_of(ctx, field);
    let (span, extended_content) = super::include_decorators(ctx.code, span_of(field), &decorators);
    let mut record = RawElement::new(kind, name, span);
    record.content = extended_content
        .unwrap_or_else(|| ctx.handler.node_text(field, ctx.code).to_string());
    record.class_name = Some(container.to_string());
    record.value_type = field
        .child_by_field_name("type")
        .map(|t| annotation_text(ctx, t));
    if let Some(value) = field.child_by_field_name("value") {
        record.additional_data.insert(
            "value".to_string(),
            Value::String(ctx.handler.node_text(value, ctx.code).to_string()),
        );
    }
    if kind == ElementKind::StaticProperty {
        record
            .additional_data
            .insert("is_static".to_string(), Value::Bool(true));
    }
    record.decorators = decorators;
    Some(record)
}

/// Collect field members of every class/interface body, split by
/// staticness.
fn collect_fields(ctx: &ExtractionContext<'_>, want_static: bool) -> Vec<RawElement> {
    let mut out = Vec::new();
    for class_like in class_like_nodes(ctx.tree.root_node()) {
        let Some(container) = qualified_path(ctx, class_like) else {
            continue;
        };
        if !filter_matches(ctx, &container) {
            continue;
        }
        let Some(body) = class_like.child_by_field_name("body") else {
            continue;
        };
        for member in ctx.handler.named_children(body) {
            match member.kind() {
                "public_field_definition" => {
                    let is_static = keyword_children(ctx, member).iter().any(|k| k == "static");
                    if is_static != want_static {
                        continue;
                    }
                    let kind = if is_static {
                        ElementKind::StaticProperty
                    } else {
                        ElementKind::Property
                    };
                    if let Some(record) = field_record(ctx, member, &container, kind) {
                        out.push(record);
                    }
                }
                // Interface members are instance-shaped.
                "property_signature" if !want_static => {
                    if let Some(record) =
                        field_record(ctx, member, &container, ElementKind::Property)
                    {
                        out.push(record);
                    }
                }
                _ => {}
            }
        }
        if !want_static {
            collect_constructor_assignments(ctx, class_like, &container, &mut out);
        }
    }
    out
}

/// `this.<name> = ...` assignments inside a constructor become properties
/// when no declared field already names them.
fn collect_constructor_assignments(
    ctx: &ExtractionContext<'_>,
    class_like: Node<'_>,
    container: &str,
    out: &mut Vec<RawElement>,
) {
    let Some(body) = class_like.child_by_field_name("body") else {
        return;
    };
    let ctor = ctx.handler.named_children(body).into_iter().find(|m| {
        m.kind() == "method_definition"
            && m.child_by_field_name("name")
                .map(|n| ctx.handler.node_text(n, ctx.code) == "constructor")
                .unwrap_or(false)
    });
    let Some(ctor) = ctor else { return };
    let Some(ctor_body) = ctor.child_by_field_name("body") else {
        return;
    };

    let declared: Vec<String> = out
        .iter()
        .filter(|r| r.class_name.as_deref() == Some(container))
        .map(|r| r.name.clone())
        .collect();

    let mut stack = vec![ctor_body];
    while let Some(node) = stack.pop() {
        if node.kind() == "assignment_expression" {
            if let Some(record) = this_assignment(ctx, node, container) {
                if !declared.contains(&record.name)
                    && !out.iter().any(|r| {
                        r.name == record.name && r.class_name.as_deref() == Some(container)
                    })
                {
                    out.push(record);
                }
            }
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            if !matches!(
                child.kind(),
                "function_declaration" | "arrow_function" | "function_expression" | "class_declaration"
            ) {
                stack.push(child);
            }
        }
    }
}

fn this_assignment(
    ctx: &ExtractionContext<'_>,
    assignment: Node<'_>,
    container: &str,
) -> Option<RawElement> {
    let left = assignment.child_by_field_name("left")?;
    if left.kind() != "member_expression" {
        return None;
    }
    let object = left.child_by_field_name("object")?;
    if object.kind() != "this" {
        return None;
    }
    let property = left.child_by_field_name("property")?;
    let name = ctx.handler.node_text(property, ctx.code).to_string();
    if is_private_name(&name) && !ctx.config.extract.include_private_members {
        return None;
    }
    let mut record = RawElement::new(ElementKind::Property, name, span_of(assignment));
    record.content = ctx.handler.node_text(assignment, ctx.code).to_string();
    record.class_name = Some(container.to_string());
    if let Some(value) = assignment.child_by_field_name("right") {
        record.additional_data.insert(
            "value".to_string(),
            Value::String(ctx.handler.node_text(value, ctx.code).to_string()),
        );
    }
    Some(record)
}

pub struct TypeScriptPropertyExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptPropertyExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Property)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptPropertyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptPropertyExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Property
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        collect_fields(ctx, false)
    }
}

pub struct TypeScriptStaticPropertyExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptStaticPropertyExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::StaticProperty)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptStaticPropertyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptStaticPropertyExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::StaticProperty
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        collect_fields(ctx, true)
    }
}
