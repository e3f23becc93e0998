//! Standalone decorator extraction for Python.
//!
//! Decorators also ride along on the records of their targets; this
//! extractor exists so decorators are addressable as elements of their
//! own kind, with the target name recorded as the parent.

use super::{ProcessedNodes, decorator_name};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::python::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;

pub struct PythonDecoratorExtractor {
    descriptor: ElementDescriptor,
}

impl PythonDecoratorExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Decorator)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for PythonDecoratorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for PythonDecoratorExtractor {
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
            // Target: the definition wrapped by the same decorated_definition.
            record.class_name = node
                .parent()
                .filter(|p| p.kind() == "decorated_definition")
                .and_then(|p| p.child_by_field_name("definition"))
                .and_then(|d| d.child_by_field_name("name"))
                .map(|n| ctx.handler.node_text(n, ctx.code).to_string());
            out.push(record);
        }
        out
    }
}
