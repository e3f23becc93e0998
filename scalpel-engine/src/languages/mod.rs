//! Language registrations.
//!
//! A new language plugs in here: provide a detector, a service, a
//! formatter variant, a descriptor table, extractors for every supported
//! kind and a post-processor, then add the service to `register_all`.

pub mod assembly;
pub mod python;
pub mod typescript;

use crate::config::EngineConfig;
use crate::engine::registry::RegistryBuilder;
use std::sync::Arc;
use tracing::warn;

/// Build and register every bundled language service. Called once when
/// the global registry is first touched.
pub fn register_all(builder: &mut RegistryBuilder) {
    let config = EngineConfig::load_from_env_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "invalid engine configuration; using defaults");
        EngineConfig::default()
    });
    builder.register_service(Arc::new(python::PythonLanguageService::new(&config)));
    builder.register_service(Arc::new(typescript::TypeScriptLanguageService::new(&config)));
}
