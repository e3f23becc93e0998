//! Tree-sitter queries and regex fallbacks for TypeScript.
//!
//! Export wrappers are resolved by parent inspection in the extractors
//! rather than doubled query patterns, so each query stays a single
//! pattern per node shape. Namespaces and field properties are walk-based
//! (`custom_extract`): their grammar shapes vary too much across dialects
//! for one query to be worth it.

use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::language::LanguageKind;

pub const IMPORT_QUERY: &str = "(import_statement) @import_stmt";

pub const FUNCTION_QUERY: &str = "\
(function_declaration name: (identifier) @function_name) @function_def
(generator_function_declaration name: (identifier) @function_name) @function_def
(lexical_declaration (variable_declarator name: (identifier) @function_name value: (arrow_function))) @arrow_function_def";

pub const CLASS_QUERY: &str = "\
(class_declaration name: (type_identifier) @class_name) @class_def
(abstract_class_declaration name: (type_identifier) @class_name) @class_def";

pub const INTERFACE_QUERY: &str =
    "(interface_declaration name: (type_identifier) @interface_name) @interface_def";

pub const METHOD_QUERY: &str = "\
(method_definition name: (property_identifier) @method_name) @method_def
(method_signature name: (property_identifier) @method_name) @method_sig";

pub const DECORATOR_QUERY: &str = "(decorator) @decorator_node";

pub const ENUM_QUERY: &str = "(enum_declaration name: (identifier) @enum_name) @enum_def";

pub const TYPE_ALIAS_QUERY: &str =
    "(type_alias_declaration name: (type_identifier) @type_name) @type_alias_def";

pub const IMPORT_PATTERN: &str = r#"(?m)^[ \t]*import[ \t]+(?:[^;'"]+[ \t]+from[ \t]+)?['"][^'"]+['"]"#;

pub const FUNCTION_PATTERN: &str =
    r"(?m)^(?:export[ \t]+)?(?:async[ \t]+)?function[ \t]*\*?[ \t]*([A-Za-z_$][\w$]*)";

pub const ARROW_FUNCTION_PATTERN: &str =
    r"(?m)^(?:export[ \t]+)?(?:const|let|var)[ \t]+([A-Za-z_$][\w$]*)[^=\n]*=[^=\n]*=>";

pub const CLASS_PATTERN: &str =
    r"(?m)^(?:export[ \t]+)?(?:default[ \t]+)?(?:abstract[ \t]+)?class[ \t]+([A-Za-z_$][\w$]*)";

pub const INTERFACE_PATTERN: &str =
    r"(?m)^(?:export[ \t]+)?interface[ \t]+([A-Za-z_$][\w$]*)";

pub const ENUM_PATTERN: &str =
    r"(?m)^(?:export[ \t]+)?(?:const[ \t]+)?enum[ \t]+([A-Za-z_$][\w$]*)";

pub const TYPE_ALIAS_PATTERN: &str = r"(?m)^(?:export[ \t]+)?type[ \t]+([A-Za-z_$][\w$]*)[ \t]*=";

pub const NAMESPACE_PATTERN: &str =
    r#"(?m)^(?:export[ \t]+)?(?:declare[ \t]+)?(?:namespace|module)[ \t]+([A-Za-z_$][\w$.]*|'[^']+'|"[^"]+")"#;

pub const DECORATOR_PATTERN: &str = r"(?m)^[ \t]*@([\w.]+)";

/// Descriptor table for TypeScript.
pub fn descriptor_for(kind: ElementKind) -> Option<ElementDescriptor> {
    let lang = LanguageKind::TypeScript;
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
        ElementKind::Class => Some(ElementDescriptor::query_based(
            lang,
            kind,
            CLASS_QUERY,
            Some(CLASS_PATTERN),
        )),
        ElementKind::Interface => Some(ElementDescriptor::query_based(
            lang,
            kind,
            INTERFACE_QUERY,
            Some(INTERFACE_PATTERN),
        )),
        ElementKind::Method | ElementKind::PropertyGetter | ElementKind::PropertySetter => {
            Some(ElementDescriptor::query_based(lang, kind, METHOD_QUERY, None))
        }
        ElementKind::Decorator => Some(ElementDescriptor::query_based(
            lang,
            kind,
            DECORATOR_QUERY,
            Some(DECORATOR_PATTERN),
        )),
        ElementKind::Enum => Some(ElementDescriptor::query_based(
            lang,
            kind,
            ENUM_QUERY,
            Some(ENUM_PATTERN),
        )),
        ElementKind::TypeAlias => Some(ElementDescriptor::query_based(
            lang,
            kind,
            TYPE_ALIAS_QUERY,
            Some(TYPE_ALIAS_PATTERN),
        )),
        ElementKind::Namespace | ElementKind::Property | ElementKind::StaticProperty => {
            Some(ElementDescriptor::custom(lang, kind))
        }
        _ => None,
    }
}
