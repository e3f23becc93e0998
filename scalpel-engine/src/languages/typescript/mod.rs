//! TypeScript language service (also serving the TSX/JS/JSX dialects).

pub mod detector;
pub mod extractors;
pub mod fallback;
pub mod formatter;
pub mod manipulators;
pub mod postprocess;
pub mod queries;

use crate::config::EngineConfig;
use crate::engine::ast::AstHandler;
use crate::engine::traits::{
    ElementExtractor, ElementManipulator, LanguageDetector, LanguageService, PostProcessor,
};
use crate::formatting::CodeFormatter;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::ElementKind;
use crate::model::language::LanguageKind;
use detector::TypeScriptDetector;
use formatter::TypeScriptFormatter;
use manipulators::TypeScriptManipulator;
use once_cell::sync::Lazy;
use postprocess::TypeScriptPostProcessor;
use regex::Regex;
use std::collections::HashMap;

pub const SUPPORTED_KINDS: &[ElementKind] = &[
    ElementKind::Import,
    ElementKind::Class,
    ElementKind::Interface,
    ElementKind::Function,
    ElementKind::Method,
    ElementKind::PropertyGetter,
    ElementKind::PropertySetter,
    ElementKind::Property,
    ElementKind::StaticProperty,
    ElementKind::Decorator,
    ElementKind::Enum,
    ElementKind::TypeAlias,
    ElementKind::Namespace,
];

const FILE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

pub struct TypeScriptLanguageService {
    handler: AstHandler,
    /// TSX grammar for the JSX-bearing dialects.
    tsx_handler: AstHandler,
    descriptors: HashMap<ElementKind, ElementDescriptor>,
    extractors: HashMap<ElementKind, Box<dyn ElementExtractor>>,
    manipulators: HashMap<ElementKind, Box<dyn ElementManipulator>>,
    post_processor: TypeScriptPostProcessor,
    formatter: TypeScriptFormatter,
    detector: TypeScriptDetector,
}

impl TypeScriptLanguageService {
    pub fn new(config: &EngineConfig) -> Self {
        let handler = AstHandler::new(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into());
        let tsx_handler = AstHandler::new(tree_sitter_typescript::LANGUAGE_TSX.into());

        let mut descriptors = HashMap::new();
        for &kind in SUPPORTED_KINDS {
            if let Some(descriptor) = queries::descriptor_for(kind) {
                descriptors.insert(kind, descriptor);
            }
        }

        let mut extractors: HashMap<ElementKind, Box<dyn ElementExtractor>> = HashMap::new();
        extractors.insert(
            ElementKind::Import,
            Box::new(extractors::TypeScriptImportExtractor::new()),
        );
        extractors.insert(
            ElementKind::Class,
            Box::new(extractors::TypeScriptClassExtractor::new()),
        );
        extractors.insert(
            ElementKind::Interface,
            Box::new(extractors::TypeScriptInterfaceExtractor::new()),
        );
        extractors.insert(
            ElementKind::Function,
            Box::new(extractors::TypeScriptFunctionExtractor::new()),
        );
        extractors.insert(
            ElementKind::Method,
            Box::new(extractors::TypeScriptMethodExtractor::new()),
        );
        extractors.insert(
            ElementKind::PropertyGetter,
            Box::new(extractors::TypeScriptGetterExtractor::new()),
        );
        extractors.insert(
            ElementKind::PropertySetter,
            Box::new(extractors::TypeScriptSetterExtractor::new()),
        );
        extractors.insert(
            ElementKind::Property,
            Box::new(extractors::TypeScriptPropertyExtractor::new()),
        );
        extractors.insert(
            ElementKind::StaticProperty,
            Box::new(extractors::TypeScriptStaticPropertyExtractor::new()),
        );
        extractors.insert(
            ElementKind::Decorator,
            Box::new(extractors::TypeScriptDecoratorExtractor::new()),
        );
        extractors.insert(
            ElementKind::Enum,
            Box::new(extractors::TypeScriptEnumExtractor::new()),
        );
        extractors.insert(
            ElementKind::TypeAlias,
            Box::new(extractors::TypeScriptTypeAliasExtractor::new()),
        );
        extractors.insert(
            ElementKind::Namespace,
            Box::new(extractors::TypeScriptNamespaceExtractor::new()),
        );

        let mut manipulators: HashMap<ElementKind, Box<dyn ElementManipulator>> = HashMap::new();
        for &kind in SUPPORTED_KINDS {
            if kind != ElementKind::Decorator {
                manipulators.insert(kind, Box::new(TypeScriptManipulator::new(kind)));
            }
        }

        Self {
            handler,
            tsx_handler,
            descriptors,
            extractors,
            manipulators,
            post_processor: TypeScriptPostProcessor,
            formatter: TypeScriptFormatter::new(config.format.typescript_indent),
            detector: TypeScriptDetector,
        }
    }
}

impl LanguageService for TypeScriptLanguageService {
    fn language(&self) -> LanguageKind {
        LanguageKind::TypeScript
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn supported_kinds(&self) -> &'static [ElementKind] {
        SUPPORTED_KINDS
    }

    fn handler(&self) -> &AstHandler {
        &self.handler
    }

    fn handler_for_extension(&self, ext: &str) -> &AstHandler {
        match ext.to_ascii_lowercase().as_str() {
            "tsx" | "jsx" => &self.tsx_handler,
            _ => &self.handler,
        }
    }

    fn descriptor(&self, kind: ElementKind) -> Option<&ElementDescriptor> {
        self.descriptors.get(&kind)
    }

    fn extractor(&self, kind: ElementKind) -> Option<&dyn ElementExtractor> {
        self.extractors.get(&kind).map(|e| e.as_ref())
    }

    fn manipulator(&self, kind: ElementKind) -> Option<&dyn ElementManipulator> {
        self.manipulators.get(&kind).map(|m| m.as_ref())
    }

    fn post_processor(&self) -> &dyn PostProcessor {
        &self.post_processor
    }

    fn formatter(&self) -> &dyn CodeFormatter {
        &self.formatter
    }

    fn detector(&self) -> &dyn LanguageDetector {
        &self.detector
    }

    fn detect_element_kind(&self, snippet: &str) -> Option<ElementKind> {
        detect_snippet_kind(snippet)
    }
}

static METHOD_SHAPE_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^(?:(?:public|private|protected|static|async|override)\s+)*[\w$]+\s*(?:<[^>]*>)?\([^)]*\)\s*(?::[^({]+)?\{").ok()
});

/// Classify a free-standing snippet by declaration shape, skipping
/// leading decorator lines so the declaration below them decides.
fn detect_snippet_kind(snippet: &str) -> Option<ElementKind> {
    let trimmed = snippet.trim();
    if trimmed.is_empty() {
        return None;
    }
    let first_decl = trimmed
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('@'))
        .unwrap_or_default();
    let code = if first_decl.is_empty() { trimmed } else { first_decl };
    let matches = |p: &str| -> bool {
        Regex::new(p).ok().map(|r| r.is_match(code)).unwrap_or(false)
    };

    if matches(r"^import\s") {
        return Some(ElementKind::Import);
    }
    if matches(r"^(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+[\w$]+") {
        return Some(ElementKind::Class);
    }
    if matches(r"^(?:export\s+)?interface\s+[\w$]+") {
        return Some(ElementKind::Interface);
    }
    if matches(r"^(?:export\s+)?(?:const\s+)?enum\s+[\w$]+") {
        return Some(ElementKind::Enum);
    }
    if matches(r"^(?:export\s+)?type\s+[\w$]+\s*=") {
        return Some(ElementKind::TypeAlias);
    }
    if matches(r"^(?:export\s+)?(?:declare\s+)?(?:namespace|module)\s") {
        return Some(ElementKind::Namespace);
    }
    if matches(r"(?m)^\s*(?:static\s+)?get\s+[\w$]+\s*\(") {
        return Some(ElementKind::PropertyGetter);
    }
    if matches(r"(?m)^\s*(?:static\s+)?set\s+[\w$]+\s*\(") {
        return Some(ElementKind::PropertySetter);
    }
    if matches(r"^(?:export\s+)?(?:async\s+)?function\b") {
        return Some(ElementKind::Function);
    }
    if matches(r"^(?:export\s+)?(?:const|let|var)\s+[\w$]+[^=\n]*=[^=\n]*=>") {
        return Some(ElementKind::Function);
    }
    if matches(r"^static\s+[\w$]+\s*[:=]") {
        return Some(ElementKind::StaticProperty);
    }
    if METHOD_SHAPE_RE
        .as_ref()
        .map(|r| r.is_match(code))
        .unwrap_or(false)
    {
        return Some(ElementKind::Method);
    }
    if matches(r"^(?:readonly\s+)?[\w$]+\s*[?!]?\s*[:=]") {
        return Some(ElementKind::Property);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_kinds() {
        assert_eq!(
            detect_snippet_kind("import { a } from './a';"),
            Some(ElementKind::Import)
        );
        assert_eq!(
            detect_snippet_kind("export class K {\n  m() { return 1; }\n}"),
            Some(ElementKind::Class)
        );
        assert_eq!(
            detect_snippet_kind("interface I {\n  x: number;\n}"),
            Some(ElementKind::Interface)
        );
        assert_eq!(
            detect_snippet_kind("type Pair = [number, number];"),
            Some(ElementKind::TypeAlias)
        );
        assert_eq!(
            detect_snippet_kind("enum Color { Red, Green }"),
            Some(ElementKind::Enum)
        );
        assert_eq!(
            detect_snippet_kind("namespace Util {\n}"),
            Some(ElementKind::Namespace)
        );
        assert_eq!(
            detect_snippet_kind("function f(x: number) { return x; }"),
            Some(ElementKind::Function)
        );
        assert_eq!(
            detect_snippet_kind("const f = (x: number) => x + 1;"),
            Some(ElementKind::Function)
        );
        assert_eq!(
            detect_snippet_kind("get x(): number { return this._x; }"),
            Some(ElementKind::PropertyGetter)
        );
        assert_eq!(
            detect_snippet_kind("set x(v: number) { this._x = v; }"),
            Some(ElementKind::PropertySetter)
        );
        assert_eq!(
            detect_snippet_kind("m(a: string): void {\n  run(a);\n}"),
            Some(ElementKind::Method)
        );
        assert_eq!(
            detect_snippet_kind("static MAX = 10;"),
            Some(ElementKind::StaticProperty)
        );
        assert_eq!(
            detect_snippet_kind("@Component()\nexport class Widget {}"),
            Some(ElementKind::Class)
        );
        assert_eq!(
            detect_snippet_kind("count: number = 0;"),
            Some(ElementKind::Property)
        );
    }
}
