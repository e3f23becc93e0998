//! Python language service.

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
use detector::PythonDetector;
use formatter::PythonFormatter;
use manipulators::PythonManipulator;
use once_cell::sync::Lazy;
use postprocess::PythonPostProcessor;
use regex::Regex;
use std::collections::HashMap;

pub const SUPPORTED_KINDS: &[ElementKind] = &[
    ElementKind::Import,
    ElementKind::Class,
    ElementKind::Function,
    ElementKind::Method,
    ElementKind::PropertyGetter,
    ElementKind::PropertySetter,
    ElementKind::Property,
    ElementKind::StaticProperty,
    ElementKind::Decorator,
];

const FILE_EXTENSIONS: &[&str] = &["py"];

pub struct PythonLanguageService {
    handler: AstHandler,
    descriptors: HashMap<ElementKind, ElementDescriptor>,
    extractors: HashMap<ElementKind, Box<dyn ElementExtractor>>,
    manipulators: HashMap<ElementKind, Box<dyn ElementManipulator>>,
    post_processor: PythonPostProcessor,
    formatter: PythonFormatter,
    detector: PythonDetector,
}

impl PythonLanguageService {
    pub fn new(config: &EngineConfig) -> Self {
        let handler = AstHandler::new(tree_sitter_python::LANGUAGE.into());

        let mut descriptors = HashMap::new();
        for &kind in SUPPORTED_KINDS {
            if let Some(descriptor) = queries::descriptor_for(kind) {
                descriptors.insert(kind, descriptor);
            }
        }

        let mut extractors: HashMap<ElementKind, Box<dyn ElementExtractor>> = HashMap::new();
        extractors.insert(
            ElementKind::Import,
            Box::new(extractors::PythonImportExtractor::new()),
        );
        extractors.insert(
            ElementKind::Class,
            Box::new(extractors::PythonClassExtractor::new()),
        );
        extractors.insert(
            ElementKind::Function,
            Box::new(extractors::PythonFunctionExtractor::new()),
        );
        extractors.insert(
            ElementKind::Method,
            Box::new(extractors::PythonMethodExtractor::new()),
        );
        extractors.insert(
            ElementKind::PropertyGetter,
            Box::new(extractors::PythonGetterExtractor::new()),
        );
        extractors.insert(
            ElementKind::PropertySetter,
            Box::new(extractors::PythonSetterExtractor::new()),
        );
        extractors.insert(
            ElementKind::Property,
            Box::new(extractors::PythonPropertyExtractor::new()),
        );
        extractors.insert(
            ElementKind::StaticProperty,
            Box::new(extractors::PythonStaticPropertyExtractor::new()),
        );
        extractors.insert(
            ElementKind::Decorator,
            Box::new(extractors::PythonDecoratorExtractor::new()),
        );

        let mut manipulators: HashMap<ElementKind, Box<dyn ElementManipulator>> = HashMap::new();
        for &kind in SUPPORTED_KINDS {
            if kind != ElementKind::Decorator {
                manipulators.insert(kind, Box::new(PythonManipulator::new(kind)));
            }
        }

        Self {
            handler,
            descriptors,
            extractors,
            manipulators,
            post_processor: PythonPostProcessor,
            formatter: PythonFormatter::new(config.format.python_indent),
            detector: PythonDetector,
        }
    }
}

impl LanguageService for PythonLanguageService {
    fn language(&self) -> LanguageKind {
        LanguageKind::Python
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

static METHOD_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"def\s+\w+\s*\(\s*(?:self|cls)[,\s)]").ok());

/// Classify a free-standing snippet. Decorator markers win over the
/// receiver heuristic so getters/setters are not mistaken for plain
/// methods; other decorators are skipped so the declaration shape below
/// them decides.
fn detect_snippet_kind(snippet: &str) -> Option<ElementKind> {
    let code = snippet.trim();
    if code.is_empty() {
        return None;
    }
    if code.lines().any(|l| l.trim() == "@property") {
        return Some(ElementKind::PropertyGetter);
    }
    if code
        .lines()
        .any(|l| {
            let t = l.trim();
            t.starts_with('@') && t.trim_end_matches('(').ends_with(".setter")
        })
    {
        return Some(ElementKind::PropertySetter);
    }

    // Classify by the first non-decorator line.
    let head = code
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('@'))
        .unwrap_or_default();
    let matches = |p: &str| -> bool {
        Regex::new(p).ok().map(|r| r.is_match(head)).unwrap_or(false)
    };

    if matches(r"^class\s+\w+") {
        return Some(ElementKind::Class);
    }
    let is_method = METHOD_RE
        .as_ref()
        .map(|r| r.is_match(head))
        .unwrap_or(false);
    if is_method {
        return Some(ElementKind::Method);
    }
    if matches(r"^(?:async\s+)?def\s+\w+") {
        return Some(ElementKind::Function);
    }
    if matches(r"^(?:import|from)\s+\w") {
        return Some(ElementKind::Import);
    }
    if matches(r"^self\.\w+\s*[:=]") {
        return Some(ElementKind::Property);
    }
    if matches(r"^[A-Za-z_]\w*\s*(?::[^=]+)?=") {
        return Some(ElementKind::StaticProperty);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_kinds() {
        assert_eq!(
            detect_snippet_kind("class A:\n    pass"),
            Some(ElementKind::Class)
        );
        assert_eq!(
            detect_snippet_kind("def f(x):\n    return x"),
            Some(ElementKind::Function)
        );
        assert_eq!(
            detect_snippet_kind("def m(self):\n    return 1"),
            Some(ElementKind::Method)
        );
        assert_eq!(
            detect_snippet_kind("@property\ndef x(self):\n    return self._x"),
            Some(ElementKind::PropertyGetter)
        );
        assert_eq!(
            detect_snippet_kind("@x.setter\ndef x(self, v):\n    self._x = v"),
            Some(ElementKind::PropertySetter)
        );
        assert_eq!(
            detect_snippet_kind("@cached\ndef f(x):\n    return x"),
            Some(ElementKind::Function)
        );
        assert_eq!(
            detect_snippet_kind("@register\nclass A:\n    pass"),
            Some(ElementKind::Class)
        );
        assert_eq!(
            detect_snippet_kind("import os"),
            Some(ElementKind::Import)
        );
        assert_eq!(
            detect_snippet_kind("MAX_SIZE = 10"),
            Some(ElementKind::StaticProperty)
        );
        assert_eq!(
            detect_snippet_kind("self.count = 0"),
            Some(ElementKind::Property)
        );
    }
}
