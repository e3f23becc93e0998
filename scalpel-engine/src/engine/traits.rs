//! Capability traits binding the engine together.
//!
//! Each language contributes values implementing these traits, registered
//! at startup keyed by `(language, kind)`. Everything is stateless after
//! construction, so services are freely shareable across threads; parse
//! trees are confined to a single extraction call.

use crate::config::EngineConfig;
use crate::engine::ast::AstHandler;
use crate::engine::extraction::ExtractionService;
use crate::formatting::CodeFormatter;
use crate::model::descriptor::ElementDescriptor;
use crate::model::element::{CodeElement, ElementKind};
use crate::model::language::LanguageKind;
use crate::model::raw::{RawBatches, RawElement};
use tree_sitter::Tree;

/// Per-call context handed to extractors: the borrowed parse tree plus
/// the source it was parsed from.
pub struct ExtractionContext<'a> {
    pub code: &'a str,
    pub tree: &'a Tree,
    pub handler: &'a AstHandler,
    pub config: &'a EngineConfig,
    /// Restrict member extraction to one container, when set.
    pub class_name: Option<&'a str>,
}

/// One extractor per (language, kind).
pub trait ElementExtractor: Send + Sync {
    fn kind(&self) -> ElementKind;

    fn descriptor(&self) -> &ElementDescriptor;

    /// Produce raw records for this kind. Never panics: a failed query
    /// falls back to the descriptor's regex, and an empty result is a
    /// valid outcome.
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<RawElement>;
}

/// Per-call context handed to manipulators.
pub struct ManipulationContext<'a> {
    pub extraction: &'a ExtractionService,
    pub formatter: &'a dyn CodeFormatter,
    pub config: &'a EngineConfig,
}

/// One manipulator per (language, kind). All operations return the new
/// source; when a target or parent cannot be located the original source
/// comes back byte-identical (never a partial edit).
pub trait ElementManipulator: Send + Sync {
    fn kind(&self) -> ElementKind;

    /// Replace the named element, or add it when absent and insertion is
    /// legal (parent exists or the element is top-level).
    fn upsert(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        name: &str,
        new_code: &str,
        parent: Option<&str>,
    ) -> String;

    /// Insert a new element at the kind's insertion point.
    fn add(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        new_code: &str,
        parent: Option<&str>,
    ) -> String;

    /// Remove the named element (with its swept decorators/comments).
    fn remove(
        &self,
        ctx: &ManipulationContext<'_>,
        code: &str,
        name: &str,
        parent: Option<&str>,
    ) -> String;
}

/// Language-specific assembler turning flat raw lists into the final
/// hierarchical element list (import aggregation, getter/setter
/// classification, parent/decorator attachment, dedup, sorting).
pub trait PostProcessor: Send + Sync {
    fn assemble(&self, code: &str, raw: &RawBatches, config: &EngineConfig) -> Vec<CodeElement>;
}

/// Heuristic language recognizer; the file-ecosystem collaborator picks
/// the winner when several services can handle the code.
pub trait LanguageDetector: Send + Sync {
    fn language(&self) -> LanguageKind;

    /// Confidence in [0, 1] that `code` is this language.
    fn confidence(&self, code: &str) -> f32;
}

/// Per-language singleton binding parser, descriptors, extractors,
/// manipulators, post-processor and formatter together.
pub trait LanguageService: Send + Sync {
    fn language(&self) -> LanguageKind;

    /// Extensions without the leading dot, e.g. `["py"]`.
    fn file_extensions(&self) -> &'static [&'static str];

    fn supported_kinds(&self) -> &'static [ElementKind];

    /// Handler for the default dialect.
    fn handler(&self) -> &AstHandler;

    /// Dialect-aware handler selection; defaults to the default dialect.
    fn handler_for_extension(&self, _ext: &str) -> &AstHandler {
        self.handler()
    }

    fn descriptor(&self, kind: ElementKind) -> Option<&ElementDescriptor>;

    fn extractor(&self, kind: ElementKind) -> Option<&dyn ElementExtractor>;

    fn manipulator(&self, kind: ElementKind) -> Option<&dyn ElementManipulator>;

    fn post_processor(&self) -> &dyn PostProcessor;

    fn formatter(&self) -> &dyn CodeFormatter;

    fn detector(&self) -> &dyn LanguageDetector;

    /// Classify a free-standing snippet by shape (declaration keyword,
    /// decorator pattern, assignment form). Used when an XPath carries no
    /// explicit kind.
    fn detect_element_kind(&self, snippet: &str) -> Option<ElementKind>;
}
