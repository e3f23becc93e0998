//! Element type descriptors.
//!
//! A descriptor is an immutable `(language, kind)` record carrying the
//! patterns that locate elements of that kind: a tree-sitter query, an
//! optional regex fallback, or a `custom_extract` flag selecting the
//! extractor's own traversal logic. Descriptors are created once at
//! language-service initialization and shared read-only afterwards.

use crate::model::element::ElementKind;
use crate::model::language::LanguageKind;

#[derive(Debug, Clone)]
pub struct ElementDescriptor {
    pub language: LanguageKind,
    pub kind: ElementKind,
    /// S-expression query; `None` when extraction is regex- or walk-based.
    pub query: Option<&'static str>,
    /// Regex fallback applied when the query is absent or yields nothing.
    pub pattern: Option<&'static str>,
    /// When set, the extractor implements its own traversal instead of
    /// interpreting `query`/`pattern` generically.
    pub custom_extract: bool,
}

impl ElementDescriptor {
    pub fn query_based(
        language: LanguageKind,
        kind: ElementKind,
        query: &'static str,
        pattern: Option<&'static str>,
    ) -> Self {
        Self {
            language,
            kind,
            query: Some(query),
            pattern,
            custom_extract: false,
        }
    }

    pub fn custom(language: LanguageKind, kind: ElementKind) -> Self {
        Self {
            language,
            kind,
            query: None,
            pattern: None,
            custom_extract: true,
        }
    }
}
