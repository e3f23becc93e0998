//! Import statement extraction for Python.
//!
//! Emits one record per statement; collapsing into the synthetic
//! `imports` aggregate happens in the post-processor.

use super::ProcessedNodes;
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::python::fallback;
use crate::languages::python::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;

pub struct PythonImportExtractor {
    descriptor: ElementDescriptor,
}

impl PythonImportExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Import)
                .expect("descriptor table entry"),
        }
    }

    /// Best-effort name: the module path for `from X import ...`, the
    /// first module for `import X, Y`.
    fn statement_name(ctx: &ExtractionContext<'_>, node: tree_sitter::Node<'_>) -> String {
        match node.kind() {
            "import_from_statement" => node
                .child_by_field_name("module_name")
                .map(|m| ctx.handler.node_text(m, ctx.code).to_string())
                .unwrap_or_else(|| {
                    fallback::import_name_from_text(ctx.handler.node_text(node, ctx.code))
                }),
            "future_import_statement" => "__future__".to_string(),
            _ => fallback::import_name_from_text(ctx.handler.node_text(node, ctx.code)),
        }
    }
}

impl Default for PythonImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for PythonImportExtractor {
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
            let name = Self::statement_name(ctx, node);
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
