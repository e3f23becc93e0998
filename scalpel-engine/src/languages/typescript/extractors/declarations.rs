//! Enum, type alias and namespace extraction for TypeScript.
//!
//! Enums and aliases are query-based; namespaces are walk-based because
//! `namespace`/`module`/`declare module` shapes differ per dialect and a
//! single query cannot cover them robustly.

use super::{ProcessedNodes, container_chain, container_name, inside_callable, range_node};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::typescript::fallback;
use crate::languages::typescript::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use tree_sitter::Node;

pub struct TypeScriptEnumExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptEnumExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Enum).expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptEnumExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptEnumExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Enum
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let root = ctx.tree.root_node();
        let captures = ctx.handler.run_query(queries::ENUM_QUERY, root, ctx.code);
        let mut processed = ProcessedNodes::new();
        let mut out = Vec::new();
        for (node, capture) in captures {
            if capture != "enum_def" || !processed.insert(node) {
                continue;
            }
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            let name = ctx.handler.node_text(name_node, ctx.code).to_string();
            let wrapper = range_node(node);
            let mut record = RawElement::new(ElementKind::Enum, name, span_of(wrapper));
            record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
            record.definition_start_line = node.start_position().row + 1;
            record.definition_start_col = node.start_position().column;
            record.class_name = container_chain(ctx, node);
            out.push(record);
        }
        if out.is_empty() {
            out = fallback::containers_by_regex(ctx, ElementKind::Enum);
        }
        out
    }
}

pub struct TypeScriptTypeAliasExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptTypeAliasExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::TypeAlias)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptTypeAliasExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptTypeAliasExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::TypeAlias
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let root = ctx.tree.root_node();
        let captures = ctx
            .handler
            .run_query(queries::TYPE_ALIAS_QUERY, root, ctx.code);
        let mut processed = ProcessedNodes::new();
        let mut out = Vec::new();
        for (node, capture) in captures {
            if capture != "type_alias_def" || !processed.insert(node) {
                continue;
            }
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            let name = ctx.handler.node_text(name_node, ctx.code).to_string();
            let wrapper = range_node(node);
            let mut record = RawElement::new(ElementKind::TypeAlias, name, span_of(wrapper));
            record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
            record.definition_start_line = node.start_position().row + 1;
            record.definition_start_col = node.start_position().column;
            record.class_name = container_chain(ctx, node);
            record.value_type = node
                .child_by_field_name("value")
                .map(|v| ctx.handler.node_text(v, ctx.code).to_string());
            out.push(record);
        }
        if out.is_empty() {
            out = fallback::containers_by_regex(ctx, ElementKind::TypeAlias);
        }
        out
    }
}

pub struct TypeScriptNamespaceExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptNamespaceExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Namespace)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptNamespaceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptNamespaceExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Namespace
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        let mut out = Vec::new();
        let mut stack = vec![ctx.tree.root_node()];
        while let Some(node) = stack.pop() {
            if matches!(node.kind(), "internal_module" | "module") && !inside_callable(node) {
                if let Some(name) = container_name(ctx, node) {
                    let wrapper = range_node(node);
                    let mut record =
                        RawElement::new(ElementKind::Namespace, name, span_of(wrapper));
                    record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
                    record.definition_start_line = node.start_position().row + 1;
                    record.definition_start_col = node.start_position().column;
                    record.class_name = container_chain(ctx, node);
                    out.push(record);
                }
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}
