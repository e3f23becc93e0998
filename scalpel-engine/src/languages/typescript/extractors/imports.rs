//! Import statement extraction for TypeScript.

use super::ProcessedNodes;
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::typescript::fallback;
use crate::languages::typescript::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;

pub struct TypeScriptImportExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptImportExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Import)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptImportExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Import
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let root = ctx.tree.root_node();
        let captures = ctx.handler.run_query(queries::IMPORT_QUERY, root, ctx.code);
        let mut processed = ProcessedNodes::new();
        let mut out = Vec::new();
        for (node, _capture) in captures {
            if !processed.insert(node) {
                continue;
            }
            // Module specifier as the statement name.
            let name = node
                .child_by_field_name("source")
                .map(|s| {
                    ctx.handler
                        .node_text(s, ctx.code)
                        .trim_matches(['\'', '"'])
                        .to_string()
                })
                .unwrap_or_else(|| ctx.handler.node_text(node, ctx.code).to_string());
            let mut record = RawElement::new(ElementKind::Import, name, span_of(node));
            record.content = ctx.handler.node_text(node, ctx.code).to_string();
            out.push(record);
        }
        if out.is_empty() {
            out = fallback::imports_by_regex(ctx);
        }
        out
    }
}
