//! Function, method, getter and setter extraction for TypeScript.
//!
//! Functions cover declarations, generators and named arrow functions;
//! methods cover class `method_definition`s and interface
//! `method_signature`s. Accessors are recognized by the `get`/`set`
//! keyword and carried as provisional methods with a marker; the
//! post-processor finalizes the kind.

use super::{
    ProcessedNodes, container_chain, decorators_of, inside_callable, inside_class_like,
    keyword_children, parameters_of, range_node, return_info_of,
};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::typescript::fallback;
use crate::languages::typescript::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use serde_json::Value;
use tree_sitter::Node;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Method,
    Getter,
    Setter,
}

/// `lexical_declaration -> variable_declarator` holding an arrow function.
fn arrow_declarator(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| {
        c.kind() == "variable_declarator"
            && c.child_by_field_name("value")
                .is_some_and(|v| v.kind() == "arrow_function")
    })
}

fn collect_functions(ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
    let root = ctx.tree.root_node();
    let captures = ctx
        .handler
        .run_query(queries::FUNCTION_QUERY, root, ctx.code);
    let mut processed = ProcessedNodes::new();
    let mut out = Vec::new();

    for (node, capture) in captures {
        let is_arrow = capture == "arrow_function_def";
        if !(capture == "function_def" || is_arrow) || !processed.insert(node) {
            continue;
        }
        if inside_class_like(node) || inside_callable(node) {
            continue;
        }
        let (name, callable) = if is_arrow {
            let Some(declarator) = arrow_declarator(node) else {
                continue;
            };
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            let Some(arrow) = declarator.child_by_field_name("value") else {
                continue;
            };
            (
                ctx.handler.node_text(name_node, ctx.code).to_string(),
                arrow,
            )
        } else {
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            (ctx.handler.node_text(name_node, ctx.code).to_string(), node)
        };

        let chain = container_chain(ctx, node);
        let wrapper = range_node(node);
        let mut record = RawElement::new(ElementKind::Function, name, span_of(wrapper));
        record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
        record.definition_start_line = node.start_position().row + 1;
        record.definition_start_col = node.start_position().column;
        record.class_name = chain;
        record.parameters = parameters_of(ctx, callable);
        if ctx.config.extract.extract_return_values {
            record.return_info = return_info_of(ctx, callable);
        }
        record.decorators = decorators_of(ctx, node);
        if is_arrow {
            record
                .additional_data
                .insert("is_arrow_function".to_string(), Value::Bool(true));
        }
        out.push(record);
    }

    if out.is_empty() {
        out = fallback::functions_by_regex(ctx);
    }
    out
}

fn collect_members(ctx: &ExtractionContext<'_>, mode: Mode) -> Vec<RawElement> {
    let root = ctx.tree.root_node();
    let captures = ctx.handler.run_query(queries::METHOD_QUERY, root, ctx.code);
    let mut processed = ProcessedNodes::new();
    let mut out = Vec::new();

    for (node, capture) in captures {
        if !(capture == "method_def" || capture == "method_sig") || !processed.insert(node) {
            continue;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            continue;
        };
        let name = ctx.handler.node_text(name_node, ctx.code).to_string();
        let Some(chain) = container_chain(ctx, node) else {
            // Object-literal methods are not class members.
            continue;
        };
        if let Some(filter) = ctx.class_name {
            let matches_filter = chain == filter || chain.rsplit('.').next() == Some(filter);
            if !matches_filter {
                continue;
            }
        }

        let keywords = keyword_children(ctx, node);
        let is_getter = keywords.iter().any(|k| k == "get");
        let is_setter = keywords.iter().any(|k| k == "set");
        match mode {
            Mode::Getter if !is_getter => continue,
            Mode::Setter if !is_setter => continue,
            _ => {}
        }

        let kind = match mode {
            Mode::Getter => ElementKind::PropertyGetter,
            Mode::Setter => ElementKind::PropertySetter,
            _ => ElementKind::Method,
        };
        let decorators = decorators_of(ctx, node);
        let (span, extended_content) = super::include_decorators(ctx.code, span_of(node), &decorators);
        let mut record = RawElement::new(kind, name, span);
        record.content = extended_content
            .unwrap_or_else(|| ctx.handler.node_text(node, ctx.code).to_string());
        record.definition_start_line = node.start_position().row + 1;
        record.definition_start_col = node.start_position().column;
        record.class_name = Some(chain);
        record.parameters = parameters_of(ctx, node);
        if ctx.config.extract.extract_return_values {
            record.return_info = return_info_of(ctx, node);
        }
        record.decorators = decorators;
        if keywords.iter().any(|k| k == "static") {
            record
                .additional_data
                .insert("is_static".to_string(), Value::Bool(true));
        }
        if mode == Mode::Method && is_getter {
            record
                .additional_data
                .insert("accessor".to_string(), Value::String("get".to_string()));
        }
        if mode == Mode::Method && is_setter {
            record
                .additional_data
                .insert("accessor".to_string(), Value::String("set".to_string()));
        }
        out.push(record);
    }
    out
}

macro_rules! member_extractor {
    ($name:ident, $mode:expr, $kind:expr) => {
        pub struct $name {
            descriptor: ElementDescriptor,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    descriptor: queries::descriptor_for($kind).expect("descriptor table entry"),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ElementExtractor for $name {
            fn kind(&self) -> ElementKind {
                $kind
            }

            fn descriptor(&self) -> &ElementDescriptor {
                &self.descriptor
            }

            fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
                collect_members(ctx, $mode)
            }
        }
    };
}

member_extractor!(TypeScriptMethodExtractor, Mode::Method, ElementKind::Method);
member_extractor!(
    TypeScriptGetterExtractor,
    Mode::Getter,
    ElementKind::PropertyGetter
);
member_extractor!(
    TypeScriptSetterExtractor,
    Mode::Setter,
    ElementKind::PropertySetter
);

pub struct TypeScriptFunctionExtractor {
    descriptor: ElementDescriptor,
}

impl TypeScriptFunctionExtractor {
    pub fn new() -> Self {
        Self {
            descriptor: queries::descriptor_for(ElementKind::Function)
                .expect("descriptor table entry"),
        }
    }
}

impl Default for TypeScriptFunctionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementExtractor for TypeScriptFunctionExtractor {
    fn kind(&self) -> ElementKind {
        ElementKind::Function
    }

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement> {
        collect_functions(ctx)
    }
}
