//! Class extraction for Python.
//!
//! Members are not extracted here; the method/property extractors handle
//! them and the post-processor attaches them by container name.

use super::{ProcessedNodes, class_chain, decorators_of, nearest_scope, range_node};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::python::fallback;
use crate::languages::python::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use serde_json::Value;

pub struct PythonClassExtractor {
    descriptor: ElementDescriptor,
}

impl PythonClassExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Class)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for PythonClassExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for PythonClassExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Class
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let root = ctx.tree.root_node();
        let captures = ctx.handler.run_query(queries::CLASS_QUERY, root, ctx.code);
        let mut processed = ProcessedNodes::new();
        let mut out = Vec::new();

        for (node, capture) in captures {
            if capture != "class_def" || !processed.insert(node) {
                continue;
            }
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            // Classes nested inside function bodies are local helpers.
            if nearest_scope(node)
                .map(|s| s.kind() == "function_definition")
                .unwrap_or(false)
            {
                continue;
            }
            let name = ctx.handler.node_text(name_node, ctx.code).to_string();
            let wrapper = range_node(node);
            let mut record = RawElement::new(ElementKind::Class, name, span_of(wrapper));
            record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
            record.definition_start_line = node.start_position().row + 1;
            record.definition_start_col = node.start_position().column;
            record.class_name = class_chain(ctx, node);
            record.decorators = decorators_of(ctx, node);
            if let Some(bases) = node.child_by_field_name("superclasses") {
                let text = ctx.handler.node_text(bases, ctx.code);
                record.additional_data.insert(
                    "base_classes".to_string(),
                    Value::String(text.trim_matches(['(', ')']).to_string()),
                );
            }
            out.push(record);
        }

        if out.is_empty() {
            out = fallback::classes_by_regex(ctx);
        }
        out
    }
}
