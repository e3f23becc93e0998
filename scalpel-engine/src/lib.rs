//! Tree-sitter-backed structured code surgery.
//!
//! Given a source file in one of the supported languages, the engine
//! extracts a hierarchical inventory of named code elements (imports,
//! classes, functions, methods, properties, ...) with precise source
//! ranges, and performs targeted format-preserving upsert/remove
//! operations addressed by dotted XPath-like expressions
//! (`ClassName.method_name`, `C.x[property_setter]`).
//!
//! All operations are pure functions of their inputs; nothing is
//! persisted, nothing is thrown past this boundary for recoverable
//! conditions — failed lookups degrade to no-ops that hand the source
//! back byte-identical.
//!
//! ```no_run
//! let code = "class C:\n    def m(self):\n        return 1\n";
//! let tree = scalpel_engine::extract(code, None).unwrap();
//! let range = scalpel_engine::find_by_xpath(code, "C.m", None).unwrap();
//! assert_eq!(range, Some((2, 3)));
//! let _ = tree;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod formatting;
pub mod languages;
pub mod model;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use model::{CodeElement, ElementKind, ElementTree, LanguageKind, Span};

use engine::extraction::ExtractionService;
use engine::manipulation::ManipulationService;
use engine::traits::LanguageService;
use std::path::Path;
use std::sync::Arc;

/// Detect the language of a piece of source code.
pub fn detect_language(code: &str) -> Option<LanguageKind> {
    engine::detection::detect_language(code)
}

/// Language for a file path, by extension.
pub fn language_for_file(path: &Path) -> Result<LanguageKind> {
    engine::detection::language_for_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        Error::UnsupportedExtension(ext)
    })
}

/// All languages the engine is built with.
pub fn supported_languages() -> Vec<LanguageKind> {
    engine::registry::global().languages()
}

fn resolve_service(
    code: &str,
    language: Option<LanguageKind>,
) -> Result<Arc<dyn LanguageService>> {
    let language = match language {
        Some(l) => l,
        None => detect_language(code).ok_or(Error::DetectionFailed)?,
    };
    engine::registry::global()
        .language_service(language)
        .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))
}

fn extraction_for(code: &str, language: Option<LanguageKind>) -> Result<ExtractionService> {
    let service = resolve_service(code, language)?;
    Ok(ExtractionService::new(
        service,
        EngineConfig::load_from_env_or_default().unwrap_or_default(),
    ))
}

fn manipulation_for(code: &str, language: Option<LanguageKind>) -> Result<ManipulationService> {
    let service = resolve_service(code, language)?;
    Ok(ManipulationService::new(
        service,
        EngineConfig::load_from_env_or_default().unwrap_or_default(),
    ))
}

/// Extract the hierarchical element tree of `code`. The language is
/// detected when not supplied.
pub fn extract(code: &str, language: Option<LanguageKind>) -> Result<ElementTree> {
    Ok(extraction_for(code, language)?.extract(code))
}

/// Extract `code` read from `path`: the extension picks the language and
/// its dialect grammar (`.tsx`/`.jsx` parse with the TSX grammar).
pub fn extract_file(path: &Path, code: &str) -> Result<ElementTree> {
    let language = language_for_file(path)?;
    let service = engine::registry::global()
        .language_service(language)
        .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))?;
    let mut extraction = ExtractionService::new(
        service,
        EngineConfig::load_from_env_or_default().unwrap_or_default(),
    );
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        extraction = extraction.with_dialect(ext);
    }
    Ok(extraction.extract(code))
}

/// Locate an element by XPath; `(start_line, end_line)` 1-based
/// inclusive, `None` when the path does not resolve.
pub fn find_by_xpath(
    code: &str,
    xpath: &str,
    language: Option<LanguageKind>,
) -> Result<Option<(usize, usize)>> {
    Ok(extraction_for(code, language)?.find_by_xpath(code, xpath))
}

/// Content slice of the element an XPath addresses.
pub fn get_text_by_xpath(
    code: &str,
    xpath: &str,
    language: Option<LanguageKind>,
) -> Result<Option<String>> {
    Ok(extraction_for(code, language)?.text_by_xpath(code, xpath))
}

/// Stable content hash of the element an XPath addresses; callers use it
/// for optimistic concurrency.
pub fn get_element_hash(
    code: &str,
    xpath: &str,
    language: Option<LanguageKind>,
) -> Result<Option<String>> {
    Ok(extraction_for(code, language)?
        .text_by_xpath(code, xpath)
        .map(|content| engine::hash::hash_content(content.as_bytes())))
}

/// Add or replace the element an XPath addresses; returns the new
/// source, or the original byte-identical when nothing could be done.
pub fn upsert_element_by_xpath(
    code: &str,
    xpath: &str,
    new_code: &str,
    language: Option<LanguageKind>,
) -> Result<String> {
    Ok(manipulation_for(code, language)?.upsert_element_by_xpath(code, xpath, new_code))
}

/// Remove the element an XPath addresses; a missing target is a no-op.
pub fn remove_element_by_xpath(
    code: &str,
    xpath: &str,
    language: Option<LanguageKind>,
) -> Result<String> {
    Ok(manipulation_for(code, language)?.remove_element_by_xpath(code, xpath))
}
