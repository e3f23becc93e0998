//! Function, method, getter and setter extraction for Python.
//!
//! All four kinds share one query over `function_definition` nodes; the
//! difference is pure classification:
//! - no enclosing scope        -> function
//! - enclosing class           -> method (provisional)
//! - `@property` decorator     -> property getter
//! - `@<name>.setter`          -> property setter
//! - enclosing function        -> nested helper, skipped everywhere
//!
//! Final getter/setter resolution against plain methods happens in the
//! post-processor; the dedicated getter/setter extractors exist so that
//! targeted searches need not extract every member.

use super::{
    ProcessedNodes, class_chain, decorators_of, nearest_scope, parameters_of, range_node,
    return_info_of,
};
use crate::engine::ast::span_of;
use crate::engine::traits::{ElementExtractor, ExtractionContext};
use crate::languages::python::fallback;
use crate::languages::python::queries;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::raw::RawElement;
use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Function,
    Method,
    Getter,
    Setter,
}

fn collect_callables(ctx: &ExtractionContext<'_>, mode: Mode) -> Vec<RawElement> {
    let root = ctx.tree.root_node();
    let captures = ctx
        .handler
        .run_query(queries::FUNCTION_QUERY, root, ctx.code);

    let mut processed = ProcessedNodes::new();
    let mut out = Vec::new();

    for (node, capture) in captures {
        if capture != "function_def" || !processed.insert(node) {
            continue;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            continue;
        };
        let name = ctx.handler.node_text(name_node, ctx.code).to_string();

        let scope = nearest_scope(node);
        let in_class = scope.map(|s| s.kind() == "class_definition").unwrap_or(false);
        let in_function = scope
            .map(|s| s.kind() == "function_definition")
            .unwrap_or(false);
        if in_function {
            continue;
        }

        let decorators = decorators_of(ctx, node);
        let is_getter = decorators.iter().any(|d| d.name == "property");
        let is_setter = decorators.iter().any(|d| d.name == format!("{name}.setter"));

        let kind = match mode {
            Mode::Function => {
                if in_class {
                    continue;
                }
                ElementKind::Function
            }
            Mode::Method => {
                if !in_class {
                    continue;
                }
                ElementKind::Method
            }
            Mode::Getter => {
                if !in_class || !is_getter {
                    continue;
                }
                ElementKind::PropertyGetter
            }
            Mode::Setter => {
                if !in_class || !is_setter {
                    continue;
                }
                ElementKind::PropertySetter
            }
        };

        let class_name = if in_class { class_chain(ctx, node) } else { None };
        if let Some(filter) = ctx.class_name {
            let matches_filter = class_name
                .as_deref()
                .is_some_and(|c| c == filter || c.rsplit('.').next() == Some(filter));
            if !matches_filter {
                continue;
            }
        }

        let wrapper = range_node(node);
        let mut record = RawElement::new(kind, name, span_of(wrapper));
        record.content = ctx.handler.node_text(wrapper, ctx.code).to_string();
        record.definition_start_line = node.start_position().row + 1;
        record.definition_start_col = node.start_position().column;
        record.class_name = class_name;
        record.parameters = parameters_of(ctx, node, in_class);
        if ctx.config.extract.extract_return_values {
            record.return_info = return_info_of(ctx, node);
        }
        if decorators
            .iter()
            .any(|d| matches!(d.name.as_str(), "staticmethod" | "classmethod"))
        {
            record
                .additional_data
                .insert("is_static".to_string(), Value::Bool(true));
        }
        record.decorators = decorators;
        out.push(record);
    }

    if out.is_empty() {
        out = fallback::callables_by_regex(ctx, mode_to_kind(mode));
    }
    out
}

fn mode_to_kind(mode: Mode) -> ElementKind {
    match mode {
        Mode::Function => ElementKind::Function,
        Mode::Method => ElementKind::Method,
        Mode::Getter => ElementKind::PropertyGetter,
        Mode::Setter => ElementKind::PropertySetter,
    }
}

macro_rules! callable_extractor {
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
                collect_callables(ctx, $mode)
            }
        }
    };
}

callable_extractor!(PythonFunctionExtractor, Mode::Function, ElementKind::Function);
callable_extractor!(PythonMethodExtractor, Mode::Method, ElementKind::Method);
callable_extractor!(
    PythonGetterExtractor,
    Mode::Getter,
    ElementKind::PropertyGetter
);
callable_extractor!(
    PythonSetterExtractor,
    Mode::Setter,
    ElementKind::PropertySetter
);
