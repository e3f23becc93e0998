//! Top-level manipulation façade.
//!
//! Thin dispatcher over the per-kind manipulators: resolves the element
//! kind (explicit in the XPath, detected from the new-code snippet, or
//! discovered in the extracted tree) and routes the operation. Any
//! failure to resolve returns the original source unchanged.

use crate::config::EngineConfig;
use crate::engine::extraction::ExtractionService;
use crate::engine::traits::{LanguageService, ManipulationContext};
use crate::model::element::ElementKind;
use crate::model::language::LanguageKind;
use crate::model::xpath::{element_info, parse_xpath};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ManipulationService {
    service: Arc<dyn LanguageService>,
    extraction: ExtractionService,
    config: EngineConfig,
}

impl ManipulationService {
    pub fn new(service: Arc<dyn LanguageService>, config: EngineConfig) -> Self {
        let extraction = ExtractionService::new(service.clone(), config.clone());
        Self {
            service,
            extraction,
            config,
        }
    }

    pub fn language(&self) -> LanguageKind {
        self.service.language()
    }

    fn context(&self) -> ManipulationContext<'_> {
        ManipulationContext {
            extraction: &self.extraction,
            formatter: self.service.formatter(),
            config: &self.config,
        }
    }

    /// Add or replace an element of a known kind.
    pub fn upsert_element(
        &self,
        code: &str,
        kind: ElementKind,
        name: &str,
        new_code: &str,
        parent: Option<&str>,
    ) -> String {
        debug!(%kind, name, ?parent, "upsert_element");
        match self.service.manipulator(kind) {
            Some(m) => m.upsert(&self.context(), code, name, new_code, parent),
            None => {
                warn!(%kind, language = %self.language(), "no manipulator registered");
                code.to_string()
            }
        }
    }

    /// Remove an element of a known kind.
    pub fn remove_element(
        &self,
        code: &str,
        kind: ElementKind,
        name: &str,
        parent: Option<&str>,
    ) -> String {
        debug!(%kind, name, ?parent, "remove_element");
        match self.service.manipulator(kind) {
            Some(m) => m.remove(&self.context(), code, name, parent),
            None => {
                warn!(%kind, language = %self.language(), "no manipulator registered");
                code.to_string()
            }
        }
    }

    /// Add or replace the element an XPath addresses. When the path
    /// carries no kind, the kind is detected from the new-code snippet,
    /// falling back to whatever the extracted tree says the target is.
    pub fn upsert_element_by_xpath(&self, code: &str, xpath: &str, new_code: &str) -> String {
        let Some((name, parent, explicit_kind)) = element_info(xpath) else {
            warn!(xpath, "malformed xpath; source unchanged");
            return code.to_string();
        };
        let kind = explicit_kind
            .or_else(|| self.service.detect_element_kind(new_code))
            .or_else(|| self.kind_from_tree(code, xpath));
        match kind {
            Some(kind) => self.upsert_element(code, kind, &name, new_code, parent.as_deref()),
            None => {
                warn!(xpath, "could not determine element kind; source unchanged");
                code.to_string()
            }
        }
    }

    /// Remove the element an XPath addresses. Without an explicit kind
    /// the extracted tree decides; a missing element is a no-op.
    pub fn remove_element_by_xpath(&self, code: &str, xpath: &str) -> String {
        let Some((name, parent, explicit_kind)) = element_info(xpath) else {
            warn!(xpath, "malformed xpath; source unchanged");
            return code.to_string();
        };
        let kind = explicit_kind.or_else(|| self.kind_from_tree(code, xpath));
        match kind {
            Some(kind) => self.remove_element(code, kind, &name, parent.as_deref()),
            None => {
                debug!(xpath, "element not found; nothing to remove");
                code.to_string()
            }
        }
    }

    /// Kind of the element the XPath resolves to in the extracted tree.
    fn kind_from_tree(&self, code: &str, xpath: &str) -> Option<ElementKind> {
        let path = parse_xpath(xpath)?;
        let tree = self.extraction.extract(code);
        tree.resolve(&path).map(|e| e.kind)
    }
}
