//! Language detection across registered services.

use crate::engine::registry;
use crate::model::language::LanguageKind;
use std::path::Path;
use tracing::debug;

/// Minimum confidence a detector must reach to win.
const CONFIDENCE_FLOOR: f32 = 0.15;

/// Ask every registered detector and pick the highest scorer above the
/// floor. Ties break on the language tag for determinism.
pub fn detect_language(code: &str) -> Option<LanguageKind> {
    let mut scores: Vec<(LanguageKind, f32)> = registry::global()
        .services()
        .map(|s| (s.language(), s.detector().confidence(code)))
        .collect();
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.as_str().cmp(b.0.as_str()))
    });
    debug!(?scores, "language detection scores");
    scores
        .first()
        .filter(|(_, score)| *score >= CONFIDENCE_FLOOR)
        .map(|(lang, _)| *lang)
}

/// Map a file path to a language via its extension.
pub fn language_for_path(path: &Path) -> Option<LanguageKind> {
    let ext = path.extension()?.to_str()?;
    registry::global()
        .service_for_extension(ext)
        .map(|s| s.language())
}
