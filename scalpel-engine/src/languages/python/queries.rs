//! Tree-sitter queries and regex fallbacks for Python.
//!
//! Queries stay deliberately small: one pattern per element family, with
//! wrapper resolution (decorated definitions) and classification handled
//! in the extractors. A pattern that fails to compile against the active
//! grammar is skipped and the regex fallback takes over.

use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::language::LanguageKind;

pub const IMPORT_QUERY: &str = "\
(import_statement) @import_stmt
(import_from_statement) @import_stmt
(future_import_statement) @import_stmt";

pub const FUNCTION_QUERY: &str =
    "(function_definition name: (identifier) @function_name) @function_def";

pub const CLASS_QUERY: &str = "(class_definition name: (identifier) @class_name) @class_def";

pub const DECORATOR_QUERY: &str = "(decorator) @decorator_node";

pub const IMPORT_PATTERN: &str =
    r"(?m)^(?:from[ \t]+[\w.]+[ \t]+import[ \t]+.+|import[ \t]+[\w.]+(?:[ \t]*,[ \t]*[\w.]+)*)";

pub const FUNCTION_PATTERN: &str = r"(?m)^(?:async[ \t]+)?def[ \t]+([A-Za-z_]\w*)[ \t]*\(";

pub const METHOD_PATTERN: &str = r"(?m)^[ \t]+(?:async[ \t]+)?def[ \t]+([A-Za-z_]\w*)[ \t]*\(";

pub const CLASS_PATTERN: &str = r"(?m)^class[ \t]+([A-Za-z_]\w*)";

pub const DECORATOR_PATTERN: &str = r"(?m)^[ \t]*@([\w.]+)";

/// Descriptor table for Python. Getter/setter extraction shares the
/// function query; the extractors classify by decorator. Property and
/// static-property extraction walk class bodies directly.
pub fn descriptor_for(kind: ElementKind) -> Option<ElementDescriptor> {
    let lang = LanguageKind::Python;
    match kind {
        ElementKind::Import => Some(ElementDescriptor::query_based(
            lang,
            kind,
            IMPORT_QUERY,
            Some(IMPORT_PATTERN),
        )),
        ElementKind::Function => Some(ElementDescriptor::query_based(
            lang,
            kind,
            FUNCTION_QUERY,
            Some(FUNCTION_PATTERN),
        )),
        ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter => Some(
            ElementDescriptor::query_based(lang, kind, FUNCTION_QUERY, Some(METHOD_PATTERN)),
        ),
        ElementKind::Class => Some(ElementDescriptor::query_based(
            lang,
            kind,
            CLASS_QUERY,
            Some(CLASS_PATTERN),
        )),
        ElementKind::Decorator => Some(ElementDescriptor::query_based(
            lang,
            kind,
            DECORATOR_QUERY,
            Some(DECORATOR_PATTERN),
        )),
        ElementKind::Property | ElementKind::StaticProperty => {
            Some(ElementDescriptor::custom(lang, kind))
        }
        _ => None,
    }
}
