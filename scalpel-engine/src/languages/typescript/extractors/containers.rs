//! Class and interface extraction for TypeScript.
//!
//! The reported range includes export/ambient wrappers; members are
//! extracted separately and attached by the post-processor.

use super::{ProcessedNodes, container_chain, decorators_of, inside_callable, range_node};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::typescript::fallback;
use crate::languages::typescript::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use serde_json::Value;

fn collect_containers(ctx: &ExtractionContext<'_>, kind: ElementKind) -> Vec<RawElement> {
    let (query, expected_capture) = match kind {
        ElementKind::Interface => (queries::INTERFACE_QUERY, "interface_def"),
        _ => (queries::CLASS_QUERY, "class_def"),
    };
    let root = ctx.tree.root_node();
    let captures = ctx.handler.run_query(query, root, ctx.code);
    let mut processed = ProcessedNodes::new();
    let mut out = Vec::new();

    for (node, capture) in captures {
        if capture != expected_capture || !processed.insert(node) {
            continue;
        }
        if inside_callable(node) {
            continue;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            continue;
        };
        let name = ctx.handler.node_text(name_node, ctx.code).to_string();
        let wrapper = range_node(node);
        let mut record = RawElement::new(kind, name, span_of(wrapper));
        record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
        record.definition_start_line = node.start_position().row + 1;
        record.definition_start_col = node.start_position().column;
        record.class_name = container_chain(ctx, node);
        record.decorators = decorators_of(ctx, node);
        if node.kind() == "abstract_class_declaration" {
            record
                .additional_data
                .insert("is_abstract".to_string(), Value::Bool(true));
        }
        out.push(record);
    }

    if out.is_empty() {
        out = fallback::containers_by_regex(ctx, kind);
    }
    out
}

pub struct TypeScriptClassExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptClassExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Class)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptClassExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptClassExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Class
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        collect_containers(ctx, ElementKind::Class)
    }
}

pub struct TypeScriptInterfaceExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptInterfaceExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Interface)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptInterfaceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptInterfaceExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Interface
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        collect_containers(ctx, ElementKind::Interface)
    }
}
