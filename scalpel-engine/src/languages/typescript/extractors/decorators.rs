//! Standalone decorator extraction for TypeScript.

use super::{ProcessedNodes, decorator_name};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::typescript::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;

pub struct TypeScriptDecoratorExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptDecoratorExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Decorator)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptDecoratorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptDecoratorExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Decorator
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let root = ctx.tree.root_node();
        let captures = ctx
            .handler
            .run_query(queries::DECORATOR_QUERY, root, ctx.code);
        let mut processed = ProcessedNodes::new();
        let mut out = Vec::new();
        for (node, _capture) in captures {
            if !processed.insert(node) {
                continue;
            }
            let name = decorator_name(ctx, node);
            let mut record = RawElement::new(ElementKind::Decorator, name, span_of(node));
            record.content = ctx.handler.node_text(node, ctx.code).to_string();
            // Target: decorators are children of the decorated definition.
            record.class_name = node
                .parent()
                .and_then(|p| p.child_by_field_name("name"))
                .map(|n| ctx.handler.node_text(n, ctx.code).to_string());
            out.push(record);
        }
        out
    }
}
