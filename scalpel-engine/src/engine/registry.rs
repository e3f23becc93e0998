//! Central registry for language services.
//!
//! Two-phase lifecycle: a mutable *build* phase ([`RegistryBuilder`])
//! where languages register themselves, and a read-only *serve* phase
//! ([`Registry`]) entered through [`RegistryBuilder::finalize`]. The
//! process-wide instance is built lazily on first access and never
//! mutated afterwards, so lookups are lock-free.

use crate::engine::traits::LanguageService;
use crate::model::language::LanguageKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Default)]
pub struct RegistryBuilder {
    services: HashMap<LanguageKind, Arc<dyn LanguageService>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language service. Re-registration under an existing
    /// language logs a warning and overwrites.
    pub fn register_service(&mut self, service: Arc<dyn LanguageService>) {
        let language = service.language();
        if self.services.contains_key(&language) {
            warn!(%language, "language service already registered; overwriting");
        } else {
            debug!(%language, "registered language service");
        }
        self.services.insert(language, service);
    }

    /// Seal the registry; no registration is possible afterwards.
    pub fn finalize(self) -> Registry {
        Registry {
            services: self.services,
        }
    }
}

pub struct Registry {
    services: HashMap<LanguageKind, Arc<dyn LanguageService>>,
}

impl Registry {
    pub fn language_service(&self, language: LanguageKind) -> Option<Arc<dyn LanguageService>> {
        self.services.get(&language).cloned()
    }

    /// Find the service claiming a file extension (without the dot).
    pub fn service_for_extension(&self, ext: &str) -> Option<Arc<dyn LanguageService>> {
        let ext = ext.to_ascii_lowercase();
        let mut found: Vec<_> = self
            .services
            .values()
            .filter(|s| s.file_extensions().contains(&ext.as_str()))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.language().as_str());
        found.into_iter().next()
    }

    /// Registered languages in stable order.
    pub fn languages(&self) -> Vec<LanguageKind> {
        let mut langs: Vec<_> = self.services.keys().copied().collect();
        langs.sort_by_key(|l| l.as_str());
        langs
    }

    pub fn services(&self) -> impl Iterator<Item = &Arc<dyn LanguageService>> {
        self.services.values()
    }
}

static GLOBAL: Lazy<Registry> = Lazy::new(|| {
    let mut builder = RegistryBuilder::new();
    crate::languages::register_all(&mut builder);
    builder.finalize()
});

/// The process-wide registry, built on first use.
pub fn global() -> &'static Registry {
    &GLOBAL
}
