//! Language-scoped extraction orchestrator.
//!
//! For a given language, runs each supported kind's extractor over one
//! parse of the source, hands the flat raw lists to the language
//! post-processor, and answers location queries (`find_element`,
//! `find_by_xpath`) against the raw records and the assembled tree.

use crate::config::EngineConfig;
use crate::engine::traits::{ExtractionContext, LanguageService};
use crate::model::element::{ElementKind, ElementTree};
use crate::model::language::LanguageKind;
use crate::model::raw::{RawBatches, RawElement};
use crate::model::xpath::parse_xpath;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ExtractionService {
    service: Arc<dyn LanguageService>,
    config: EngineConfig,
    /// File extension hint selecting a dialect grammar (e.g. `tsx`).
    dialect: Option<String>,
}

impl ExtractionService {
    pub fn new(service: Arc<dyn LanguageService>, config: EngineConfig) -> Self {
        Self {
            service,
            config,
            dialect: None,
        }
    }

    /// Prefer the dialect grammar registered for a file extension.
    pub fn with_dialect(mut self, extension: &str) -> Self {
        self.dialect = Some(extension.to_ascii_lowercase());
        self
    }

    pub fn language(&self) -> LanguageKind {
        self.service.language()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the extractors for `kinds` over a single parse of `code`.
    fn run_extractors(
        &self,
        code: &str,
        kinds: &[ElementKind],
        class_name: Option<&str>,
    ) -> RawBatches {
        let mut batches = RawBatches::default();
        if code.len() > self.config.limits.max_file_bytes {
            warn!(
                len = code.len(),
                limit = self.config.limits.max_file_bytes,
                "source exceeds max_file_bytes; skipping extraction"
            );
            return batches;
        }
        let handler = match &self.dialect {
            Some(ext) => self.service.handler_for_extension(ext),
            None => self.service.handler(),
        };
        let Some(tree) = handler.parse(code) else {
            warn!(language = %self.language(), "parser returned no tree");
            return batches;
        };
        let ctx = ExtractionContext {
            code,
            tree: &tree,
            handler,
            config: &self.config,
            class_name,
        };
        for &kind in kinds {
            let Some(extractor) = self.service.extractor(kind) else {
                debug!(%kind, "no extractor registered");
                continue;
            };
            let records = extractor.extract(&ctx);
            debug!(%kind, count = records.len(), "extractor finished");
            if let Some(bucket) = batches.bucket_mut(kind) {
                bucket.extend(records);
            }
        }
        batches
    }

    /// Raw records for every supported kind.
    pub fn extract_raw(&self, code: &str) -> RawBatches {
        self.run_extractors(code, self.service.supported_kinds(), None)
    }

    /// Full extraction: raw records assembled into the hierarchical tree
    /// by the language post-processor.
    pub fn extract(&self, code: &str) -> ElementTree {
        info!(language = %self.language(), "starting full extraction");
        let raw = self.extract_raw(code);
        let mut elements = self
            .service
            .post_processor()
            .assemble(code, &raw, &self.config);
        elements.sort_by_key(|e| (e.range.start_line, e.range.start_col));
        for element in &mut elements {
            element.sort_children();
        }
        info!(
            language = %self.language(),
            top_level = elements.len(),
            "extraction complete"
        );
        ElementTree {
            language: self.language(),
            elements,
        }
    }

    /// Locate an element by kind, name and parent; `(start_line,
    /// end_line)` of the best raw match, 1-based inclusive.
    pub fn find_element(
        &self,
        code: &str,
        kind: ElementKind,
        name: Option<&str>,
        parent: Option<&str>,
    ) -> Option<(usize, usize)> {
        let kinds_to_run = expand_search_kinds(kind);
        let raw = self.run_extractors(code, &kinds_to_run, None);

        let is_member_search = kind.is_member();
        let mut matches: Vec<&RawElement> = raw
            .iter_all()
            .filter(|r| kind_matches(kind, r.kind))
            .filter(|r| name.is_none_or(|n| r.name == n))
            .filter(|r| {
                if is_member_search || parent.is_some() {
                    r.class_name.as_deref() == parent
                } else {
                    r.class_name.is_none()
                }
            })
            .collect();

        if matches.is_empty() {
            debug!(%kind, ?name, ?parent, "find_element: no match");
            return None;
        }

        // Specificity first, then the smallest containing range, then the
        // earliest definition.
        matches.sort_by_key(|r| {
            (
                std::cmp::Reverse(r.kind.specificity()),
                r.range.line_count(),
                r.definition_start_line,
            )
        });
        let best = matches[0];
        if matches.len() > 1 {
            debug!(
                %kind,
                ?name,
                candidates = matches.len(),
                picked = %best.kind,
                "find_element: multiple matches, picked most specific"
            );
        }
        Some(best.range.line_range())
    }

    /// Line range spanning the first through last import statement, or
    /// `None` for a file without imports.
    pub fn imports_range(&self, code: &str) -> Option<(usize, usize)> {
        let raw = self.run_extractors(code, &[ElementKind::Import], None);
        let first = raw.imports.iter().map(|r| r.range.start_line).min()?;
        let last = raw.imports.iter().map(|r| r.range.end_line).max()?;
        Some((first, last))
    }

    /// Locate an element through an XPath by extracting the full tree and
    /// resolving against it. Malformed paths are a no-match.
    pub fn find_by_xpath(&self, code: &str, xpath: &str) -> Option<(usize, usize)> {
        let path = parse_xpath(xpath)?;
        let tree = self.extract(code);
        let element = tree.resolve(&path)?;
        let range = element.range;
        if range.start_line == 0 {
            warn!(xpath, "resolved element has an invalid range");
            return None;
        }
        Some(range.line_range())
    }

    /// Content slice of the element an XPath addresses.
    pub fn text_by_xpath(&self, code: &str, xpath: &str) -> Option<String> {
        let path = parse_xpath(xpath)?;
        let tree = self.extract(code);
        tree.resolve(&path).map(|e| e.content.clone())
    }
}

/// Which extractors must run to answer a search for `kind`.
fn expand_search_kinds(kind: ElementKind) -> Vec<ElementKind> {
    match kind {
        k if k.is_member() => {
            let mut kinds = vec![
                ElementKind::Method,
                ElementKind::PropertyGetter,
                ElementKind::PropertySetter,
                ElementKind::StaticProperty,
            ];
            if !kinds.contains(&k) {
                kinds.insert(0, k);
            }
            kinds
        }
        k => vec![k],
    }
}

/// `property` accepts any of the concrete property shapes.
fn kind_matches(wanted: ElementKind, actual: ElementKind) -> bool {
    wanted == actual
        || (wanted == ElementKind::Property
            && matches!(
                actual,
                ElementKind::PropertyGetter
                    | ElementKind::PropertySetter
                    | ElementKind::StaticProperty
            ))
}
